use serde::{Deserialize, Serialize};

use super::users::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err("Email and password are required".into());
        }
        if !self.email.contains('@') {
            return Err("Enter a valid email address".into());
        }
        Ok(())
    }
}

/// Ответ `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Сессия на клиенте: токены и текущий пользователь (`GET /auth/me`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_validation() {
        let mut req = LoginRequest {
            email: "manager@cmms.local".into(),
            password: "demo123".into(),
        };
        assert!(req.validate().is_ok());
        req.email = "manager".into();
        assert!(req.validate().is_err());
        req.password.clear();
        assert_eq!(
            req.validate(),
            Err("Email and password are required".to_string())
        );
    }

    #[test]
    fn test_token_type_defaults_to_bearer() {
        let token: TokenResponse = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.refresh_token, None);
    }
}
