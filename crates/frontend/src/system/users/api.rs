use chrono::Utc;
use contracts::shared::endpoints::{users as ep, with_id};
use contracts::system::audit::AuditAction;
use contracts::system::users::{
    ChangeRoleRequest, CreateUserDto, UpdateUserDto, User, UserFilter, UserId, UserRole,
};

use crate::shared::api_client::{self, build_query, ApiError};
use crate::shared::config::{use_mock, MockOp};
use crate::shared::mock_store;
use crate::system::auth::storage;

/// Fetch users matching the filter
pub async fn fetch_users(filter: UserFilter) -> Result<Vec<User>, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::List, move |db| Ok(filter.apply(db.users.rows()))).await;
    }
    let path = format!("{}{}", ep::LIST, build_query(&filter.query_params()));
    api_client::get(&path).await
}

pub async fn fetch_user(id: String) -> Result<User, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Get, move |db| db.users.get(&id)).await;
    }
    api_client::get(&with_id(ep::ITEM, &id)).await
}

/// Create new user
pub async fn create_user(dto: CreateUserDto) -> Result<User, ApiError> {
    if use_mock() {
        let actor = storage::get_user();
        return mock_store::call(MockOp::Mutate, move |db| {
            dto.validate(db.users.rows())?;
            let id = UserId::new(db.users.next_id());
            let user = db.users.insert(User::from_dto(id, &dto, Utc::now()));
            let details = format!("Created user {}", user.email);
            db.audit(actor.as_ref(), AuditAction::Create, "user", Some(user.id.as_str()), details);
            Ok(user)
        })
        .await;
    }
    api_client::post(ep::LIST, &dto).await
}

/// Update profile fields and the active flag
pub async fn update_user(id: String, dto: UpdateUserDto) -> Result<User, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Mutate, move |db| {
            db.users.update_with(&id, |u| {
                dto.apply(u);
                Ok(())
            })
        })
        .await;
    }
    api_client::put(&with_id(ep::ITEM, &id), &dto).await
}

pub async fn change_role(id: String, role: UserRole) -> Result<User, ApiError> {
    if use_mock() {
        let actor = storage::get_user();
        return mock_store::call(MockOp::Mutate, move |db| {
            let user = db.users.update_with(&id, |u| {
                u.role = role;
                Ok(())
            })?;
            let details = format!("Role of {} set to {}", user.email, role.label());
            db.audit(actor.as_ref(), AuditAction::Update, "user", Some(&id), details);
            Ok(user)
        })
        .await;
    }
    api_client::put(&with_id(ep::CHANGE_ROLE, &id), &ChangeRoleRequest { role }).await
}

pub async fn delete_user(id: String) -> Result<(), ApiError> {
    if use_mock() {
        let actor = storage::get_user();
        return mock_store::call(MockOp::Mutate, move |db| {
            db.users.remove(&id)?;
            let details = format!("Deleted user {}", id);
            db.audit(actor.as_ref(), AuditAction::Delete, "user", Some(&id), details);
            Ok(())
        })
        .await;
    }
    api_client::delete(&with_id(ep::ITEM, &id)).await
}
