use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a003_location::LocationId;
use crate::domain::a005_work_order::WorkOrder;
use crate::domain::common::AggregateRoot;
use crate::system::users::{User, UserId};

// ============================================================================
// ID Type
// ============================================================================

crate::string_id!(
    /// Идентификатор бригады
    TeamId
);

// ============================================================================
// Members
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamMemberRole {
    Leader,
    #[default]
    Member,
}

impl TeamMemberRole {
    pub const ALL: [TeamMemberRole; 2] = [TeamMemberRole::Leader, TeamMemberRole::Member];

    pub fn as_str(&self) -> &'static str {
        match self {
            TeamMemberRole::Leader => "leader",
            TeamMemberRole::Member => "member",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TeamMemberRole::Leader => "Leader",
            TeamMemberRole::Member => "Member",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub user_id: UserId,
    pub user_name: String,
    #[serde(default)]
    pub email: String,
    pub role: TeamMemberRole,
    pub joined_at: DateTime<Utc>,
}

impl TeamMember {
    fn from_user(user: &User, role: TeamMemberRole, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user.id.clone(),
            user_name: user.display_name(),
            email: user.email.clone(),
            role,
            joined_at: now,
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Ремонтная бригада: руководитель, участники, базовая локация
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub leader_id: Option<UserId>,
    #[serde(default)]
    pub leader_name: Option<String>,
    #[serde(default)]
    pub location_id: Option<LocationId>,
    #[serde(default)]
    pub location_name: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub members: Vec<TeamMember>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// Новая бригада; руководитель сразу входит в состав
    pub fn from_dto(
        id: TeamId,
        dto: &TeamDto,
        leader: Option<&User>,
        location_name: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut team = Self {
            id,
            name: String::new(),
            description: None,
            leader_id: None,
            leader_name: None,
            location_id: None,
            location_name: None,
            is_active: true,
            members: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        team.update(dto, leader, location_name, now);
        team.is_active = true;
        team
    }

    /// Полное обновление карточки (`PUT /teams/:id`)
    pub fn update(
        &mut self,
        dto: &TeamDto,
        leader: Option<&User>,
        location_name: Option<String>,
        now: DateTime<Utc>,
    ) {
        self.name = dto.name.trim().to_string();
        self.description = non_empty(&dto.description);
        self.location_id = non_empty(&dto.location_id).map(LocationId::new);
        self.location_name = self.location_id.as_ref().and(location_name);
        self.is_active = dto.is_active;
        self.set_leader(leader, now);
        self.updated_at = now;
    }

    pub fn members_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m.user_id.as_str() == user_id)
    }

    /// Смена руководителя: прежний остаётся участником, новый добавляется при необходимости
    pub fn set_leader(&mut self, leader: Option<&User>, now: DateTime<Utc>) {
        for member in &mut self.members {
            member.role = TeamMemberRole::Member;
        }
        match leader {
            Some(user) => {
                match self.members.iter_mut().find(|m| m.user_id == user.id) {
                    Some(member) => member.role = TeamMemberRole::Leader,
                    None => self
                        .members
                        .push(TeamMember::from_user(user, TeamMemberRole::Leader, now)),
                }
                self.leader_id = Some(user.id.clone());
                self.leader_name = Some(user.display_name());
            }
            None => {
                self.leader_id = None;
                self.leader_name = None;
            }
        }
    }

    pub fn add_member(
        &mut self,
        user: &User,
        role: TeamMemberRole,
        now: DateTime<Utc>,
    ) -> Result<(), String> {
        if self.is_member(user.id.as_str()) {
            return Err(format!("{} is already a member of this team", user.display_name()));
        }
        if !user.is_active {
            return Err("Inactive users cannot join a team".into());
        }
        self.members
            .push(TeamMember::from_user(user, TeamMemberRole::Member, now));
        if role == TeamMemberRole::Leader {
            self.set_leader(Some(user), now);
        }
        self.updated_at = now;
        Ok(())
    }

    /// Удаление участника; уход руководителя оставляет бригаду без руководителя
    pub fn remove_member(&mut self, user_id: &str, now: DateTime<Utc>) -> Result<TeamMember, String> {
        let index = self
            .members
            .iter()
            .position(|m| m.user_id.as_str() == user_id)
            .ok_or_else(|| "User is not a member of this team".to_string())?;
        let removed = self.members.remove(index);
        if self.leader_id.as_ref() == Some(&removed.user_id) {
            self.leader_id = None;
            self.leader_name = None;
        }
        self.updated_at = now;
        Ok(removed)
    }

    /// Активные пользователи, которых ещё нет в бригаде
    pub fn available_users<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users
            .iter()
            .filter(|u| u.is_active && !self.is_member(u.id.as_str()))
            .collect()
    }

    /// Наряды, назначенные участникам бригады (по имени исполнителя)
    pub fn work_orders(&self, orders: &[WorkOrder]) -> Vec<WorkOrder> {
        orders
            .iter()
            .filter(|wo| {
                wo.assignee_name()
                    .map(|name| self.members.iter().any(|m| m.user_name == name))
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }

    /// Поиск по названию и описанию
    pub fn matches_search(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(&needle))
                .unwrap_or(false)
    }

    pub fn to_dto(&self) -> TeamDto {
        TeamDto {
            id: Some(self.id.0.clone()),
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
            leader_id: self
                .leader_id
                .as_ref()
                .map(|id| id.0.clone())
                .unwrap_or_default(),
            location_id: self
                .location_id
                .as_ref()
                .map(|id| id.0.clone())
                .unwrap_or_default(),
            is_active: self.is_active,
        }
    }
}

impl AggregateRoot for Team {
    type Id = TeamId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn aggregate_index() -> &'static str {
        "a007"
    }

    fn collection_name() -> &'static str {
        "team"
    }

    fn element_name() -> &'static str {
        "Team"
    }

    fn list_name() -> &'static str {
        "Teams"
    }

    fn api_path() -> &'static str {
        "/teams"
    }
}

// ============================================================================
// DTOs
// ============================================================================

/// Форма бригады; пустые `leader_id`/`location_id` означают «не задано»
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamDto {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub leader_id: String,
    pub location_id: String,
    pub is_active: bool,
}

impl Default for TeamDto {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            leader_id: String::new(),
            location_id: String::new(),
            is_active: true,
        }
    }
}

impl TeamDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Team name is required".into());
        }
        Ok(())
    }

    pub fn leader_id(&self) -> Option<&str> {
        let id = self.leader_id.trim();
        (!id.is_empty()).then_some(id)
    }
}

/// Тело `POST /teams/:id/members`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<TeamMemberRole>,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a005_work_order::{Assignee, WorkOrderDto, WorkOrderId};
    use crate::system::users::UserRole;

    fn user(id: &str, first: &str, last: &str, active: bool) -> User {
        User {
            id: UserId::new(id),
            email: format!("{}@cmms.local", first.to_lowercase()),
            first_name: first.into(),
            last_name: last.into(),
            phone: None,
            role: UserRole::Technician,
            is_active: active,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    fn crew() -> Team {
        let dto = TeamDto {
            name: " HVAC Crew ".into(),
            description: "Rooftop units".into(),
            location_id: "1".into(),
            ..Default::default()
        };
        let alex = user("4", "Alex", "Johnson", true);
        Team::from_dto(
            TeamId::new("1"),
            &dto,
            Some(&alex),
            Some("Main Warehouse".into()),
            Utc::now(),
        )
    }

    #[test]
    fn test_create_adds_leader_as_member() {
        let team = crew();
        assert_eq!(team.name, "HVAC Crew");
        assert_eq!(team.leader_name.as_deref(), Some("Alex Johnson"));
        assert_eq!(team.members_count(), 1);
        assert_eq!(team.members[0].role, TeamMemberRole::Leader);
        assert_eq!(team.location_name.as_deref(), Some("Main Warehouse"));
        assert!(team.is_active);
    }

    #[test]
    fn test_add_member_rules() {
        let mut team = crew();
        let maria = user("3", "Maria", "Garcia", true);
        assert!(team.add_member(&maria, TeamMemberRole::Member, Utc::now()).is_ok());
        assert_eq!(team.members_count(), 2);

        assert_eq!(
            team.add_member(&maria, TeamMemberRole::Member, Utc::now()),
            Err("Maria Garcia is already a member of this team".to_string())
        );
        let tom = user("7", "Tom", "Wilson", false);
        assert!(team.add_member(&tom, TeamMemberRole::Member, Utc::now()).is_err());
        assert_eq!(team.members_count(), 2);
    }

    #[test]
    fn test_new_leader_demotes_previous() {
        let mut team = crew();
        let maria = user("3", "Maria", "Garcia", true);
        team.add_member(&maria, TeamMemberRole::Leader, Utc::now()).unwrap();
        assert_eq!(team.leader_id.as_ref().map(|id| id.as_str()), Some("3"));
        let leaders: Vec<_> = team
            .members
            .iter()
            .filter(|m| m.role == TeamMemberRole::Leader)
            .map(|m| m.user_name.as_str())
            .collect();
        assert_eq!(leaders, vec!["Maria Garcia"]);
    }

    #[test]
    fn test_removing_leader_clears_leader() {
        let mut team = crew();
        let removed = team.remove_member("4", Utc::now()).unwrap();
        assert_eq!(removed.user_name, "Alex Johnson");
        assert_eq!(team.leader_id, None);
        assert_eq!(team.leader_name, None);
        assert!(team.remove_member("4", Utc::now()).is_err());
    }

    #[test]
    fn test_available_users_skip_members_and_inactive() {
        let team = crew();
        let users = vec![
            user("4", "Alex", "Johnson", true),
            user("3", "Maria", "Garcia", true),
            user("7", "Tom", "Wilson", false),
        ];
        let names: Vec<String> = team
            .available_users(&users)
            .iter()
            .map(|u| u.display_name())
            .collect();
        assert_eq!(names, vec!["Maria Garcia"]);
    }

    #[test]
    fn test_team_work_orders_follow_member_names() {
        let team = crew();
        let order = |id: &str, assignee: Option<&str>| {
            let dto = WorkOrderDto {
                title: format!("Order {}", id),
                due_date: "2025-03-01".into(),
                ..Default::default()
            };
            let mut wo = WorkOrder::from_dto(WorkOrderId::new(id), &dto, Utc::now()).unwrap();
            wo.assignee = assignee.map(Assignee::named);
            wo
        };
        let orders = vec![
            order("WO-1", Some("Alex Johnson")),
            order("WO-2", Some("Sarah Johnson")),
            order("WO-3", None),
        ];
        let mine = team.work_orders(&orders);
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id.as_str(), "WO-1");
    }

    #[test]
    fn test_search_and_validation() {
        let team = crew();
        assert!(team.matches_search("rooftop"));
        assert!(team.matches_search("hvac"));
        assert!(!team.matches_search("fleet"));

        let mut dto = team.to_dto();
        assert_eq!(dto.leader_id(), Some("4"));
        assert!(dto.validate().is_ok());
        dto.name = "  ".into();
        assert_eq!(dto.validate(), Err("Team name is required".to_string()));
    }
}
