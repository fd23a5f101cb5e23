use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a001_equipment::Equipment;
use crate::domain::a003_location::Location;
use crate::domain::a005_work_order::{WorkOrder, WorkOrderStatus};
use crate::domain::common::AggregateRoot;
use crate::system::users::User;

// ============================================================================
// ID Type
// ============================================================================

crate::string_id!(
    /// Идентификатор организации (арендатора)
    OrganizationId
);

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Basic,
    Pro,
    Enterprise,
}

impl SubscriptionTier {
    pub const ALL: [SubscriptionTier; 4] = [
        SubscriptionTier::Free,
        SubscriptionTier::Basic,
        SubscriptionTier::Pro,
        SubscriptionTier::Enterprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Basic => "basic",
            SubscriptionTier::Pro => "pro",
            SubscriptionTier::Enterprise => "enterprise",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "Free",
            SubscriptionTier::Basic => "Basic",
            SubscriptionTier::Pro => "Pro",
            SubscriptionTier::Enterprise => "Enterprise",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == code)
    }
}

/// Отрасли для выпадающего списка формы
pub const INDUSTRIES: [&str; 9] = [
    "Manufacturing",
    "Healthcare",
    "Energy & Utilities",
    "Transportation",
    "Hospitality",
    "Retail",
    "Technology",
    "Construction",
    "Other",
];

// ============================================================================
// Aggregate Root
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub postal_code: String,
    pub subscription_tier: SubscriptionTier,
    #[serde(default)]
    pub subscription_expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    /// Новая организация всегда активна
    pub fn from_dto(id: OrganizationId, dto: &OrganizationDto, now: DateTime<Utc>) -> Self {
        let mut org = Self {
            id,
            name: String::new(),
            slug: String::new(),
            industry: String::new(),
            description: String::new(),
            email: String::new(),
            phone: String::new(),
            website: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            country: String::new(),
            postal_code: String::new(),
            subscription_tier: SubscriptionTier::Free,
            subscription_expires_at: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        org.apply(dto, now);
        org.is_active = true;
        org
    }

    pub fn apply(&mut self, dto: &OrganizationDto, now: DateTime<Utc>) {
        self.name = dto.name.trim().to_string();
        self.slug = dto.effective_slug();
        self.industry = dto.industry.trim().to_string();
        self.description = dto.description.trim().to_string();
        self.email = dto.email.trim().to_string();
        self.phone = dto.phone.trim().to_string();
        self.website = dto.website.trim().to_string();
        self.address = dto.address.trim().to_string();
        self.city = dto.city.trim().to_string();
        self.state = dto.state.trim().to_string();
        self.country = dto.country.trim().to_string();
        self.postal_code = dto.postal_code.trim().to_string();
        self.subscription_tier = dto.subscription_tier;
        self.is_active = dto.is_active;
        self.updated_at = now;
    }

    /// "Chicago, IL, USA" без пустых частей
    pub fn location_label(&self) -> String {
        [&self.city, &self.state, &self.country]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn subscription_expired(&self, now: DateTime<Utc>) -> bool {
        self.subscription_expires_at.map(|at| at < now).unwrap_or(false)
    }

    /// Поиск по названию и отрасли
    pub fn matches_search(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.industry.to_lowercase().contains(&needle)
    }

    pub fn to_dto(&self) -> OrganizationDto {
        OrganizationDto {
            id: Some(self.id.0.clone()),
            name: self.name.clone(),
            slug: self.slug.clone(),
            industry: self.industry.clone(),
            description: self.description.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            website: self.website.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            country: self.country.clone(),
            postal_code: self.postal_code.clone(),
            subscription_tier: self.subscription_tier,
            is_active: self.is_active,
        }
    }
}

impl AggregateRoot for Organization {
    type Id = OrganizationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn aggregate_index() -> &'static str {
        "a008"
    }

    fn collection_name() -> &'static str {
        "organization"
    }

    fn element_name() -> &'static str {
        "Organization"
    }

    fn list_name() -> &'static str {
        "Organizations"
    }

    fn api_path() -> &'static str {
        "/organizations"
    }
}

/// "Acme Manufacturing, Inc." -> "acme-manufacturing-inc"
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            slug.push(ch);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationDto {
    pub id: Option<String>,
    pub name: String,
    /// Пустой slug выводится из названия
    pub slug: String,
    pub industry: String,
    pub description: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub subscription_tier: SubscriptionTier,
    pub is_active: bool,
}

impl Default for OrganizationDto {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            slug: String::new(),
            industry: String::new(),
            description: String::new(),
            email: String::new(),
            phone: String::new(),
            website: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            country: String::new(),
            postal_code: String::new(),
            subscription_tier: SubscriptionTier::Free,
            is_active: true,
        }
    }
}

impl OrganizationDto {
    pub fn effective_slug(&self) -> String {
        match self.slug.trim() {
            "" => slugify(&self.name),
            explicit => slugify(explicit),
        }
    }

    /// Проверка формы; slug должен быть уникален среди прочих организаций
    pub fn validate(&self, existing: &[Organization]) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Organization name is required".into());
        }
        let email = self.email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            return Err("Invalid email address".into());
        }
        let slug = self.effective_slug();
        if slug.is_empty() {
            return Err("Organization slug is required".into());
        }
        let taken = existing
            .iter()
            .filter(|o| Some(o.id.as_str()) != self.id.as_deref())
            .any(|o| o.slug == slug);
        if taken {
            return Err(format!("Organization slug '{}' is already in use", slug));
        }
        Ok(())
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

// ============================================================================
// Stats
// ============================================================================

/// Сводка `GET /organizations/:id/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationStats {
    pub total_equipment: usize,
    pub total_users: usize,
    pub total_locations: usize,
    pub active_workorders: usize,
    pub overdue_workorders: usize,
    pub completed_this_month: usize,
    pub equipment_health_avg: f64,
}

impl OrganizationStats {
    /// Наряд считается выполненным в этом месяце по сроку исполнения
    pub fn compute(
        equipment: &[Equipment],
        users: &[User],
        locations: &[Location],
        orders: &[WorkOrder],
        now: DateTime<Utc>,
    ) -> Self {
        let health_avg = if equipment.is_empty() {
            0.0
        } else {
            let sum: u32 = equipment.iter().map(|e| u32::from(e.health_score)).sum();
            (f64::from(sum) / equipment.len() as f64 * 10.0).round() / 10.0
        };
        let same_month =
            |at: DateTime<Utc>| at.year() == now.year() && at.month() == now.month();
        Self {
            total_equipment: equipment.len(),
            total_users: users.iter().filter(|u| u.is_active).count(),
            total_locations: locations.len(),
            active_workorders: orders.iter().filter(|wo| !wo.status.is_closed()).count(),
            overdue_workorders: orders.iter().filter(|wo| wo.is_overdue(now)).count(),
            completed_this_month: orders
                .iter()
                .filter(|wo| wo.status == WorkOrderStatus::Completed && same_month(wo.due_date))
                .count(),
            equipment_health_avg: health_avg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn acme() -> Organization {
        let dto = OrganizationDto {
            name: "Acme Manufacturing".into(),
            industry: "Manufacturing".into(),
            email: "ops@acme.example".into(),
            city: "New York".into(),
            state: "NY".into(),
            subscription_tier: SubscriptionTier::Enterprise,
            ..Default::default()
        };
        Organization::from_dto(OrganizationId::new("1"), &dto, Utc::now())
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Acme Manufacturing, Inc."), "acme-manufacturing-inc");
        assert_eq!(slugify("  Global   Logistics  "), "global-logistics");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_from_dto_derives_slug() {
        let org = acme();
        assert_eq!(org.slug, "acme-manufacturing");
        assert!(org.is_active);
        assert_eq!(org.location_label(), "New York, NY");
        assert_eq!(org.subscription_tier.label(), "Enterprise");
    }

    #[test]
    fn test_validate_rules() {
        let existing = vec![acme()];
        let mut dto = OrganizationDto {
            name: "Acme  Manufacturing".into(),
            ..Default::default()
        };
        assert_eq!(
            dto.validate(&existing),
            Err("Organization slug 'acme-manufacturing' is already in use".to_string())
        );
        // Своя запись не конфликтует сама с собой
        let own = existing[0].to_dto();
        assert!(own.validate(&existing).is_ok());

        dto.name = "Bright Health".into();
        dto.email = "not-an-email".into();
        assert_eq!(dto.validate(&existing), Err("Invalid email address".to_string()));
        dto.email.clear();
        assert!(dto.validate(&existing).is_ok());
        dto.name = " ".into();
        assert_eq!(
            dto.validate(&existing),
            Err("Organization name is required".to_string())
        );
    }

    #[test]
    fn test_search_matches_name_or_industry() {
        let org = acme();
        assert!(org.matches_search("acme"));
        assert!(org.matches_search("MANUFACT"));
        assert!(!org.matches_search("health"));
        assert!(org.matches_search(""));
    }

    #[test]
    fn test_subscription_expiry() {
        let mut org = acme();
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        assert!(!org.subscription_expired(now));
        org.subscription_expires_at = Some(Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap());
        assert!(org.subscription_expired(now));
    }

    #[test]
    fn test_stats_on_empty_data() {
        let stats = OrganizationStats::compute(&[], &[], &[], &[], Utc::now());
        assert_eq!(stats, OrganizationStats::default());
    }
}
