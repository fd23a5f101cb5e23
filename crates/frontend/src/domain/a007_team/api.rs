use chrono::Utc;
use contracts::domain::a005_work_order::WorkOrder;
use contracts::domain::a007_team::{AddMemberRequest, Team, TeamDto, TeamId, TeamMemberRole};
use contracts::shared::endpoints::{fill, teams as ep, users as users_ep, with_id};
use contracts::system::audit::AuditAction;
use contracts::system::users::User;

use crate::shared::api_client::{self, ApiError};
use crate::shared::config::{use_mock, MockOp};
use crate::shared::mock_store::{self, MockDb};
use crate::system::auth::storage;

pub async fn fetch_teams() -> Result<Vec<Team>, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::List, |db| Ok(db.teams.list())).await;
    }
    api_client::get(ep::LIST).await
}

pub async fn fetch_team(id: String) -> Result<Team, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Get, move |db| db.teams.get(&id)).await;
    }
    api_client::get(&with_id(ep::ITEM, &id)).await
}

pub async fn create_team(dto: TeamDto) -> Result<Team, ApiError> {
    dto.validate()?;
    if use_mock() {
        let actor = storage::get_user();
        return mock_store::call(MockOp::Mutate, move |db| create_in(db, actor.as_ref(), &dto)).await;
    }
    api_client::post(ep::LIST, &dto).await
}

pub async fn update_team(id: String, dto: TeamDto) -> Result<Team, ApiError> {
    dto.validate()?;
    if use_mock() {
        let actor = storage::get_user();
        return mock_store::call(MockOp::Mutate, move |db| update_in(db, actor.as_ref(), &id, &dto))
            .await;
    }
    api_client::put(&with_id(ep::ITEM, &id), &dto).await
}

pub async fn delete_team(id: String) -> Result<(), ApiError> {
    if use_mock() {
        let actor = storage::get_user();
        return mock_store::call(MockOp::Mutate, move |db| {
            let team = db.teams.get(&id)?;
            db.teams.remove(&id)?;
            let details = format!("Deleted team {}", team.name);
            db.audit(actor.as_ref(), AuditAction::Delete, "team", Some(&id), details);
            Ok(())
        })
        .await;
    }
    api_client::delete(&with_id(ep::ITEM, &id)).await
}

pub async fn add_member(id: String, user_id: String, role: TeamMemberRole) -> Result<Team, ApiError> {
    if use_mock() {
        let actor = storage::get_user();
        return mock_store::call(MockOp::Mutate, move |db| {
            add_member_in(db, actor.as_ref(), &id, &user_id, role)
        })
        .await;
    }
    let request = AddMemberRequest {
        user_id,
        role: Some(role),
    };
    api_client::post(&with_id(ep::MEMBERS, &id), &request).await
}

/// DELETE ничего не возвращает, поэтому бригада перечитывается
pub async fn remove_member(id: String, user_id: String) -> Result<Team, ApiError> {
    if use_mock() {
        let actor = storage::get_user();
        return mock_store::call(MockOp::Mutate, move |db| {
            remove_member_in(db, actor.as_ref(), &id, &user_id)
        })
        .await;
    }
    api_client::delete(&fill(ep::MEMBER, &[("id", id.as_str()), ("userId", user_id.as_str())])).await?;
    api_client::get(&with_id(ep::ITEM, &id)).await
}

pub async fn fetch_team_work_orders(id: String) -> Result<Vec<WorkOrder>, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::List, move |db| {
            let team = db.teams.get(&id)?;
            Ok(team.work_orders(db.work_orders.rows()))
        })
        .await;
    }
    api_client::get(&with_id(ep::WORK_ORDERS, &id)).await
}

/// Кандидаты в бригаду: активные пользователи вне её состава
pub async fn fetch_available_users(id: String) -> Result<Vec<User>, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::List, move |db| {
            let team = db.teams.get(&id)?;
            Ok(team.available_users(db.users.rows()).into_iter().cloned().collect())
        })
        .await;
    }
    let team: Team = api_client::get(&with_id(ep::ITEM, &id)).await?;
    let users: Vec<User> = api_client::get(users_ep::LIST).await?;
    Ok(team.available_users(&users).into_iter().cloned().collect())
}

// ----------------------------------------------------------------------------
// Mock-операции над базой
// ----------------------------------------------------------------------------

fn leader_for(db: &MockDb, dto: &TeamDto) -> Result<Option<User>, ApiError> {
    match dto.leader_id() {
        Some(id) => db
            .users
            .get(id)
            .map(Some)
            .map_err(|_| ApiError::Validation("Selected leader does not exist".into())),
        None => Ok(None),
    }
}

fn location_name(db: &MockDb, dto: &TeamDto) -> Option<String> {
    db.locations.find(dto.location_id.trim()).map(|l| l.name.clone())
}

fn create_in(db: &mut MockDb, actor: Option<&User>, dto: &TeamDto) -> Result<Team, ApiError> {
    let leader = leader_for(db, dto)?;
    let id = TeamId::new(db.teams.next_id());
    let team = Team::from_dto(id, dto, leader.as_ref(), location_name(db, dto), Utc::now());
    let team = db.teams.insert(team);
    let details = format!("Created team {}", team.name);
    db.audit(actor, AuditAction::Create, "team", Some(team.id.as_str()), details);
    Ok(team)
}

fn update_in(
    db: &mut MockDb,
    actor: Option<&User>,
    id: &str,
    dto: &TeamDto,
) -> Result<Team, ApiError> {
    let leader = leader_for(db, dto)?;
    let location = location_name(db, dto);
    let team = db.teams.update_with(id, |team| {
        team.update(dto, leader.as_ref(), location, Utc::now());
        Ok(())
    })?;
    let details = format!("Updated team {}", team.name);
    db.audit(actor, AuditAction::Update, "team", Some(id), details);
    Ok(team)
}

fn add_member_in(
    db: &mut MockDb,
    actor: Option<&User>,
    id: &str,
    user_id: &str,
    role: TeamMemberRole,
) -> Result<Team, ApiError> {
    let user = db.users.get(user_id)?;
    let team = db
        .teams
        .update_with(id, |team| team.add_member(&user, role, Utc::now()))?;
    let details = format!("Added {} to {}", user.display_name(), team.name);
    db.audit(actor, AuditAction::Assignment, "team", Some(id), details);
    Ok(team)
}

fn remove_member_in(
    db: &mut MockDb,
    actor: Option<&User>,
    id: &str,
    user_id: &str,
) -> Result<Team, ApiError> {
    let mut removed = None;
    let team = db.teams.update_with(id, |team| {
        removed = Some(team.remove_member(user_id, Utc::now())?);
        Ok(())
    })?;
    if let Some(member) = removed {
        let details = format!("Removed {} from {}", member.user_name, team.name);
        db.audit(actor, AuditAction::Assignment, "team", Some(id), details);
    }
    Ok(team)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::mock_seed;

    fn db() -> MockDb {
        mock_seed::seed(Utc::now())
    }

    #[test]
    fn test_create_resolves_leader_and_location() {
        let mut db = db();
        let audit_before = db.audit_logs.len();
        let dto = TeamDto {
            name: "Night Shift".into(),
            leader_id: "3".into(),
            location_id: "2".into(),
            ..Default::default()
        };
        let team = create_in(&mut db, None, &dto).unwrap();
        assert_eq!(team.id.as_str(), "4");
        assert_eq!(team.leader_name.as_deref(), Some("Maria Garcia"));
        assert_eq!(team.location_name.as_deref(), Some("Downtown Office"));
        assert_eq!(db.audit_logs.len(), audit_before + 1);

        let missing = TeamDto {
            name: "Ghosts".into(),
            leader_id: "99".into(),
            ..Default::default()
        };
        assert_eq!(
            create_in(&mut db, None, &missing),
            Err(ApiError::Validation("Selected leader does not exist".into()))
        );
    }

    #[test]
    fn test_update_replaces_leader() {
        let mut db = db();
        let mut dto = db.teams.get("1").unwrap().to_dto();
        dto.leader_id = "5".into();
        let team = update_in(&mut db, None, "1", &dto).unwrap();
        assert_eq!(team.leader_name.as_deref(), Some("Omar Haddad"));
        assert!(team.is_member("4"));
        assert_eq!(update_in(&mut db, None, "77", &dto), Err(ApiError::NotFound));
    }

    #[test]
    fn test_member_management_is_audited() {
        let mut db = db();
        let admin = db.users.get("2").unwrap();
        let team = add_member_in(&mut db, Some(&admin), "1", "6", TeamMemberRole::Member).unwrap();
        assert_eq!(team.members_count(), 3);
        let last = db.audit_logs.get(&db.audit_logs.len().to_string()).unwrap();
        assert_eq!(last.details, "Added Victor Lee to HVAC Crew");
        assert_eq!(last.user_name, "Priya Patel");

        // дубль и неактивный пользователь отклоняются без записи в журнал
        let logged = db.audit_logs.len();
        assert!(add_member_in(&mut db, None, "1", "6", TeamMemberRole::Member).is_err());
        assert!(add_member_in(&mut db, None, "1", "7", TeamMemberRole::Member).is_err());
        assert_eq!(db.audit_logs.len(), logged);

        let team = remove_member_in(&mut db, None, "1", "4").unwrap();
        assert_eq!(team.leader_id, None);
        assert!(remove_member_in(&mut db, None, "1", "4").is_err());
    }
}
