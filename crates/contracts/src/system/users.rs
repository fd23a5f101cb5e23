use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::string_id!(
    /// Идентификатор пользователя
    UserId
);

/// Роль пользователя; порядок совпадает с иерархией (1 = super_admin)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    Manager,
    Technician,
    Operator,
    #[default]
    Viewer,
}

impl UserRole {
    pub const ALL: [UserRole; 6] = [
        UserRole::SuperAdmin,
        UserRole::Admin,
        UserRole::Manager,
        UserRole::Technician,
        UserRole::Operator,
        UserRole::Viewer,
    ];

    pub fn id(&self) -> u8 {
        match self {
            UserRole::SuperAdmin => 1,
            UserRole::Admin => 2,
            UserRole::Manager => 3,
            UserRole::Technician => 4,
            UserRole::Operator => 5,
            UserRole::Viewer => 6,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.id() == id)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "super_admin",
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Technician => "technician",
            UserRole::Operator => "operator",
            UserRole::Viewer => "viewer",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == code)
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "Super Admin",
            UserRole::Admin => "Organization Admin",
            UserRole::Manager => "Manager",
            UserRole::Technician => "Technician",
            UserRole::Operator => "Operator",
            UserRole::Viewer => "Viewer",
        }
    }

    /// Стартовая страница роли после входа
    pub fn home_route(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "/dashboard/super-admin",
            UserRole::Admin => "/dashboard/admin",
            UserRole::Manager => "/dashboard/manager",
            UserRole::Technician => "/dashboard/technician",
            UserRole::Operator => "/dashboard/operator",
            UserRole::Viewer => "/dashboard/viewer",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::SuperAdmin | UserRole::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// "Имя Фамилия", при пустом имени берётся email
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }

    pub fn from_dto(id: UserId, dto: &CreateUserDto, now: DateTime<Utc>) -> Self {
        Self {
            id,
            email: dto.email.trim().to_lowercase(),
            first_name: dto.first_name.trim().to_string(),
            last_name: dto.last_name.trim().to_string(),
            phone: dto
                .phone
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from),
            role: dto.role,
            is_active: true,
            created_at: now,
            last_login: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateUserDto {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: UserRole,
}

impl CreateUserDto {
    /// `existing` нужен для проверки уникальности email
    pub fn validate(&self, existing: &[User]) -> Result<(), String> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err("A valid email is required".into());
        }
        if self.first_name.trim().is_empty() {
            return Err("First name is required".into());
        }
        if self.password.len() < 6 {
            return Err("Password must be at least 6 characters".into());
        }
        if existing.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(format!("User with email '{}' already exists", email));
        }
        Ok(())
    }
}

/// Частичное обновление профиля (`PUT /users/:id`); роль меняется отдельно
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UpdateUserDto {
    pub fn apply(&self, target: &mut User) {
        if let Some(v) = &self.first_name {
            target.first_name = v.trim().to_string();
        }
        if let Some(v) = &self.last_name {
            target.last_name = v.trim().to_string();
        }
        if let Some(v) = &self.phone {
            let v = v.trim();
            target.phone = (!v.is_empty()).then(|| v.to_string());
        }
        if let Some(v) = self.is_active {
            target.is_active = v;
        }
    }
}

/// Тело `PUT /users/:id/role`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: UserRole,
}

/// Фильтр списка пользователей
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub search: String,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        if let Some(role) = self.role {
            if user.role != role {
                return false;
            }
        }
        if let Some(active) = self.is_active {
            if user.is_active != active {
                return false;
            }
        }
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        user.display_name().to_lowercase().contains(&needle)
            || user.email.to_lowercase().contains(&needle)
    }

    pub fn apply(&self, users: &[User]) -> Vec<User> {
        users.iter().filter(|u| self.matches(u)).cloned().collect()
    }

    /// Параметры строки запроса для `GET /users`
    pub fn query_params(&self) -> Vec<(&'static str, Option<String>)> {
        let search = self.search.trim();
        vec![
            ("role", self.role.map(|r| r.as_str().to_string())),
            ("is_active", self.is_active.map(|a| a.to_string())),
            ("search", (!search.is_empty()).then(|| search.to_string())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: &str, last: &str, email: &str, role: UserRole, active: bool) -> User {
        User {
            id: UserId::new(email),
            email: email.into(),
            first_name: first.into(),
            last_name: last.into(),
            phone: None,
            role,
            is_active: active,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    fn team() -> Vec<User> {
        vec![
            user("Alex", "Johnson", "alex@cmms.local", UserRole::Technician, true),
            user("Maria", "Garcia", "maria@cmms.local", UserRole::Manager, true),
            user("Tom", "Wilson", "tom@cmms.local", UserRole::Technician, false),
        ]
    }

    #[test]
    fn test_role_ids_and_labels() {
        assert_eq!(UserRole::SuperAdmin.id(), 1);
        assert_eq!(UserRole::from_id(6), Some(UserRole::Viewer));
        assert_eq!(UserRole::from_id(7), None);
        assert_eq!(UserRole::Admin.label(), "Organization Admin");
        assert_eq!(UserRole::Manager.home_route(), "/dashboard/manager");
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::Manager.is_admin());
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        assert_eq!(team()[0].display_name(), "Alex Johnson");
        let anon = user(" ", "", "ops@cmms.local", UserRole::Operator, true);
        assert_eq!(anon.display_name(), "ops@cmms.local");
        let single = user("Maria", "", "m@cmms.local", UserRole::Operator, true);
        assert_eq!(single.display_name(), "Maria");
    }

    #[test]
    fn test_filter() {
        let users = team();
        let f = UserFilter {
            role: Some(UserRole::Technician),
            ..Default::default()
        };
        assert_eq!(f.apply(&users).len(), 2);

        let f = UserFilter {
            role: Some(UserRole::Technician),
            is_active: Some(true),
            ..Default::default()
        };
        assert_eq!(f.apply(&users)[0].first_name, "Alex");

        let f = UserFilter {
            search: "GARCIA".into(),
            ..Default::default()
        };
        assert_eq!(f.apply(&users).len(), 1);

        let f = UserFilter {
            search: "cmms.local".into(),
            ..Default::default()
        };
        assert_eq!(f.apply(&users).len(), 3);
    }

    #[test]
    fn test_filter_query_params_skip_unset() {
        let f = UserFilter {
            is_active: Some(false),
            ..Default::default()
        };
        let params = f.query_params();
        assert_eq!(params[0], ("role", None));
        assert_eq!(params[1], ("is_active", Some("false".to_string())));
        assert_eq!(params[2], ("search", None));
    }

    #[test]
    fn test_create_validation() {
        let users = team();
        let mut dto = CreateUserDto {
            email: "new@cmms.local".into(),
            password: "secret1".into(),
            first_name: "New".into(),
            ..Default::default()
        };
        assert!(dto.validate(&users).is_ok());
        dto.email = "ALEX@cmms.local".into();
        assert!(dto.validate(&users).is_err());
        dto.email = "new@cmms.local".into();
        dto.password = "123".into();
        assert!(dto.validate(&users).is_err());
    }

    #[test]
    fn test_update_patch() {
        let mut u = team()[0].clone();
        UpdateUserDto {
            phone: Some("  ".into()),
            is_active: Some(false),
            ..Default::default()
        }
        .apply(&mut u);
        assert_eq!(u.phone, None);
        assert!(!u.is_active);
        assert_eq!(u.first_name, "Alex");
    }
}
