use chrono::Utc;
use contracts::shared::endpoints::auth as ep;
use contracts::system::audit::AuditAction;
use contracts::system::auth::{LoginRequest, RefreshRequest, Session, TokenResponse};
use contracts::system::users::User;
use serde_json::Value;

use super::storage;
use crate::shared::api_client::{self, ApiError};
use crate::shared::config::{use_mock, MockOp};
use crate::shared::mock_seed::DEMO_PASSWORD;
use crate::shared::mock_store;

/// Вход по email и паролю; токены и пользователь сохраняются в localStorage
pub async fn login(email: String, password: String) -> Result<Session, ApiError> {
    let request = LoginRequest { email, password };
    request.validate()?;

    let session = if use_mock() {
        mock_login(request).await?
    } else {
        let tokens: TokenResponse = api_client::post(ep::LOGIN, &request).await?;
        storage::save_access_token(&tokens.access_token);
        let user: User = api_client::get(ep::ME).await?;
        Session {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            user,
        }
    };

    storage::save_access_token(&session.access_token);
    storage::save_refresh_token(session.refresh_token.as_deref());
    storage::save_user(&session.user);
    Ok(session)
}

/// Проверка демо-учётки: email без учёта регистра, общий пароль, только активные
fn check_credentials<'a>(users: &'a [User], request: &LoginRequest) -> Result<&'a User, ApiError> {
    let email = request.email.trim().to_lowercase();
    let user = users
        .iter()
        .find(|u| u.email.trim().to_lowercase() == email)
        .filter(|_| request.password == DEMO_PASSWORD)
        .ok_or_else(|| ApiError::Http {
            status: 401,
            message: "Invalid email or password".to_string(),
        })?;
    if !user.is_active {
        return Err(ApiError::Http {
            status: 403,
            message: "This account is disabled".to_string(),
        });
    }
    Ok(user)
}

async fn mock_login(request: LoginRequest) -> Result<Session, ApiError> {
    mock_store::call(MockOp::Get, move |db| {
        let id = check_credentials(db.users.rows(), &request)?.id.clone();
        let user = db.users.update_with(id.as_str(), |u| {
            u.last_login = Some(Utc::now());
            Ok(())
        })?;
        db.audit(Some(&user), AuditAction::Login, "auth", None, "Signed in");
        Ok(Session {
            access_token: format!("mock-access-{}", user.id),
            refresh_token: Some(format!("mock-refresh-{}", user.id)),
            user,
        })
    })
    .await
}

/// Восстановить сессию из localStorage при старте
pub async fn restore_session() -> Option<Session> {
    let access_token = storage::get_access_token()?;

    if use_mock() {
        let cached = storage::get_user()?;
        // пользователь мог быть удалён или отключён в текущей сессии
        let user = mock_store::with_db(|db| db.users.get(cached.id.as_str()).ok())
            .filter(|u| u.is_active)?;
        return Some(Session {
            access_token,
            refresh_token: storage::get_refresh_token(),
            user,
        });
    }

    match api_client::get::<User>(ep::ME).await {
        Ok(user) => {
            storage::save_user(&user);
            Some(Session {
                access_token,
                refresh_token: storage::get_refresh_token(),
                user,
            })
        }
        Err(e) => {
            log::warn!("Stored token rejected: {}", e);
            refresh_session().await
        }
    }
}

async fn refresh_session() -> Option<Session> {
    let refresh_token = storage::get_refresh_token()?;
    let request = RefreshRequest { refresh_token };
    let tokens: TokenResponse = match api_client::post(ep::REFRESH, &request).await {
        Ok(t) => t,
        Err(e) => {
            log::warn!("Token refresh failed: {}", e);
            storage::clear_session();
            return None;
        }
    };
    storage::save_access_token(&tokens.access_token);
    if tokens.refresh_token.is_some() {
        storage::save_refresh_token(tokens.refresh_token.as_deref());
    }
    let user: User = api_client::get(ep::ME).await.ok()?;
    storage::save_user(&user);
    Some(Session {
        access_token: tokens.access_token,
        refresh_token: storage::get_refresh_token(),
        user,
    })
}

/// Выход; ошибка сервера не мешает очистить локальную сессию
pub async fn logout() {
    if use_mock() {
        let actor = storage::get_user();
        mock_store::with_db(|db| {
            db.audit(actor.as_ref(), AuditAction::Logout, "auth", None, "Signed out")
        });
    } else {
        if let Err(e) = api_client::post::<_, Value>(ep::LOGOUT, &serde_json::json!({})).await {
            log::warn!("Logout request failed: {}", e);
        }
    }
    storage::clear_session();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::mock_seed;

    fn request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            password: password.into(),
        }
    }

    fn invalid() -> ApiError {
        ApiError::Http {
            status: 401,
            message: "Invalid email or password".to_string(),
        }
    }

    #[test]
    fn test_demo_password_signs_in_active_user() {
        let users = mock_seed::seed(Utc::now()).users.list();
        let user = check_credentials(&users, &request("manager@cmms.local", DEMO_PASSWORD)).unwrap();
        assert_eq!(user.email, "manager@cmms.local");

        let user = check_credentials(&users, &request("  Manager@CMMS.local ", "demo123")).unwrap();
        assert_eq!(user.display_name(), "Maria Garcia");
    }

    #[test]
    fn test_unknown_email_or_wrong_password() {
        let users = mock_seed::seed(Utc::now()).users.list();
        assert_eq!(
            check_credentials(&users, &request("nobody@cmms.local", DEMO_PASSWORD)),
            Err(invalid())
        );
        assert_eq!(
            check_credentials(&users, &request("manager@cmms.local", "Demo123")),
            Err(invalid())
        );
    }

    #[test]
    fn test_inactive_user_rejected() {
        let users = mock_seed::seed(Utc::now()).users.list();
        let disabled = check_credentials(&users, &request("tom.wilson@cmms.local", DEMO_PASSWORD));
        assert_eq!(
            disabled.unwrap_err().to_string(),
            "This account is disabled"
        );
        // неверный пароль не раскрывает, что учётка отключена
        assert_eq!(
            check_credentials(&users, &request("tom.wilson@cmms.local", "x")),
            Err(invalid())
        );
    }
}
