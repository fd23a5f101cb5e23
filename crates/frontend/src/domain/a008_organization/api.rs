use chrono::Utc;
use contracts::domain::a008_organization::{
    Organization, OrganizationDto, OrganizationId, OrganizationStats,
};
use contracts::shared::endpoints::{organizations as ep, with_id};
use contracts::system::audit::{AuditAction, AuditLog};
use contracts::system::users::User;

use crate::shared::api_client::{self, ApiError};
use crate::shared::config::{use_mock, MockOp};
use crate::shared::mock_store::{self, MockDb};
use crate::system::audit_log::api as audit_api;
use crate::system::auth::storage;

pub async fn fetch_organizations() -> Result<Vec<Organization>, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::List, |db| Ok(db.organizations.list())).await;
    }
    api_client::get(ep::LIST).await
}

pub async fn fetch_organization(id: String) -> Result<Organization, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Get, move |db| db.organizations.get(&id)).await;
    }
    api_client::get(&with_id(ep::ITEM, &id)).await
}

pub async fn create_organization(dto: OrganizationDto) -> Result<Organization, ApiError> {
    if use_mock() {
        let actor = storage::get_user();
        return mock_store::call(MockOp::Mutate, move |db| create_in(db, actor.as_ref(), &dto)).await;
    }
    dto.validate(&[])?;
    api_client::post(ep::LIST, &dto).await
}

pub async fn update_organization(id: String, dto: OrganizationDto) -> Result<Organization, ApiError> {
    if use_mock() {
        let actor = storage::get_user();
        return mock_store::call(MockOp::Mutate, move |db| update_in(db, actor.as_ref(), &id, dto))
            .await;
    }
    dto.validate(&[])?;
    api_client::put(&with_id(ep::ITEM, &id), &dto).await
}

pub async fn delete_organization(id: String) -> Result<(), ApiError> {
    if use_mock() {
        let actor = storage::get_user();
        return mock_store::call(MockOp::Mutate, move |db| {
            let org = db.organizations.get(&id)?;
            db.organizations.remove(&id)?;
            let details = format!("Deleted organization {}", org.name);
            db.audit(actor.as_ref(), AuditAction::Delete, "organization", Some(&id), details);
            Ok(())
        })
        .await;
    }
    api_client::delete(&with_id(ep::ITEM, &id)).await
}

/// В mock-режиме одна организация на всю базу, поэтому сводка общая
pub async fn fetch_stats(id: String) -> Result<OrganizationStats, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Get, move |db| {
            db.organizations.get(&id)?;
            Ok(stats_in(db))
        })
        .await;
    }
    api_client::get(&with_id(ep::STATS, &id)).await
}

/// Последние события по организации из журнала аудита
pub async fn fetch_activity(id: String) -> Result<Vec<AuditLog>, ApiError> {
    audit_api::fetch_resource_history("organization".to_string(), id).await
}

// ----------------------------------------------------------------------------
// Mock-операции над базой
// ----------------------------------------------------------------------------

fn stats_in(db: &MockDb) -> OrganizationStats {
    OrganizationStats::compute(
        db.equipment.rows(),
        db.users.rows(),
        db.locations.rows(),
        db.work_orders.rows(),
        Utc::now(),
    )
}

fn create_in(
    db: &mut MockDb,
    actor: Option<&User>,
    dto: &OrganizationDto,
) -> Result<Organization, ApiError> {
    dto.validate(db.organizations.rows())?;
    let id = OrganizationId::new(db.organizations.next_id());
    let org = db.organizations.insert(Organization::from_dto(id, dto, Utc::now()));
    let details = format!("Created organization {}", org.name);
    db.audit(actor, AuditAction::Create, "organization", Some(org.id.as_str()), details);
    Ok(org)
}

/// Проверка уникальности идёт от id из пути, а не из тела
fn update_in(
    db: &mut MockDb,
    actor: Option<&User>,
    id: &str,
    mut dto: OrganizationDto,
) -> Result<Organization, ApiError> {
    dto.id = Some(id.to_string());
    dto.validate(db.organizations.rows())?;
    let org = db.organizations.update_with(id, |org| {
        org.apply(&dto, Utc::now());
        Ok(())
    })?;
    let details = format!("Updated organization {}", org.name);
    db.audit(actor, AuditAction::Update, "organization", Some(id), details);
    Ok(org)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::mock_seed;
    use contracts::system::audit::resource_history;

    fn db() -> MockDb {
        mock_seed::seed(Utc::now())
    }

    #[test]
    fn test_create_rejects_taken_slug() {
        let mut db = db();
        let dto = OrganizationDto {
            name: "Acme Manufacturing".into(),
            ..Default::default()
        };
        assert_eq!(
            create_in(&mut db, None, &dto),
            Err(ApiError::Validation(
                "Organization slug 'acme-manufacturing' is already in use".into()
            ))
        );

        let dto = OrganizationDto {
            name: "Northwind Energy".into(),
            industry: "Energy & Utilities".into(),
            ..Default::default()
        };
        let org = create_in(&mut db, None, &dto).unwrap();
        assert_eq!(org.id.as_str(), "5");
        assert_eq!(org.slug, "northwind-energy");
        let history = resource_history(db.audit_logs.rows(), "organization", "5");
        assert_eq!(history[0].action, AuditAction::Create);
    }

    #[test]
    fn test_update_keeps_own_slug_and_uses_path_id() {
        let mut db = db();
        let mut dto = db.organizations.get("1").unwrap().to_dto();
        dto.phone = "+1 212 555 0100".into();
        let org = update_in(&mut db, None, "1", dto.clone()).unwrap();
        assert_eq!(org.phone, "+1 212 555 0100");

        // тело с чужим id не обходит проверку уникальности
        dto.id = Some("2".into());
        dto.slug.clear();
        dto.name = "Global Logistics Inc".into();
        assert!(update_in(&mut db, None, "1", dto).is_err());
    }

    #[test]
    fn test_stats_cover_whole_mock_database() {
        let db = db();
        let stats = stats_in(&db);
        assert_eq!(stats.total_equipment, 4);
        assert_eq!(stats.total_users, 6);
        assert_eq!(stats.total_locations, 3);
        assert_eq!(stats.active_workorders, 5);
        assert_eq!(stats.equipment_health_avg, 69.3);
    }
}
