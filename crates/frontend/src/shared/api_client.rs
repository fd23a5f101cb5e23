//! HTTP клиент REST API.
//!
//! Пути берутся из `contracts::shared::endpoints`, базовый адрес из конфигурации.
//! Каждый запрос несёт `Authorization: Bearer <token>`, если сессия есть.

use std::cell::RefCell;
use std::rc::Rc;

use contracts::shared::api_response::ApiResponse;
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::shared::config::api_base_url;
use crate::system::auth::storage;

/// Ошибки обращения к API (и к mock-сервису)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Session expired. Please log in again.")]
    Unauthorized,

    #[error("You do not have permission to perform this action.")]
    Forbidden,

    #[error("Resource not found.")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Server error. Please try again later.")]
    Server(u16),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("{0}")]
    Mock(String),
}

impl ApiError {
    /// Ошибка по коду ответа и телу
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            422 => ApiError::Validation(validation_message(body)),
            s if s >= 500 => ApiError::Server(s),
            s => ApiError::Http {
                status: s,
                message: detail_message(body).unwrap_or_else(|| format!("Error: {}", s)),
            },
        }
    }
}

impl From<String> for ApiError {
    fn from(message: String) -> Self {
        ApiError::Validation(message)
    }
}

/// FastAPI 422: `detail` массивом `{loc, msg}` или строкой
fn validation_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return "Validation error".to_string();
    };
    match json.get("detail") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) if !items.is_empty() => items
            .iter()
            .map(|item| {
                let loc = item
                    .get("loc")
                    .and_then(Value::as_array)
                    .map(|parts| {
                        parts
                            .iter()
                            .map(|p| match p {
                                Value::String(s) => s.clone(),
                                other => other.to_string(),
                            })
                            .collect::<Vec<_>>()
                            .join(".")
                    })
                    .unwrap_or_default();
                let msg = item.get("msg").and_then(Value::as_str).unwrap_or("invalid");
                format!("{}: {}", loc, msg)
            })
            .collect::<Vec<_>>()
            .join(", "),
        _ => "Validation error".to_string(),
    }
}

fn detail_message(body: &str) -> Option<String> {
    let json = serde_json::from_str::<Value>(body).ok()?;
    ["detail", "message"]
        .iter()
        .find_map(|key| json.get(*key).and_then(Value::as_str))
        .map(String::from)
}

/// Разобрать тело успешного ответа: конверт `ApiResponse` или голые данные.
/// Пустое тело (204) читается как `null`.
pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let json = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str::<Value>(body).map_err(|e| ApiError::Decode(e.to_string()))?
    };

    let is_envelope = json
        .as_object()
        .map(|o| o.get("success").map(Value::is_boolean).unwrap_or(false))
        .unwrap_or(false);

    if is_envelope {
        let envelope: ApiResponse<Value> =
            serde_json::from_value(json).map_err(|e| ApiError::Decode(e.to_string()))?;
        if !envelope.success {
            let message = envelope
                .error
                .or(envelope.message)
                .unwrap_or_else(|| "Request failed".to_string());
            return Err(ApiError::Http { status, message });
        }
        // успешный конверт без data (например, DELETE) читается как null
        let data = envelope.data.unwrap_or(Value::Null);
        return serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()));
    }

    serde_json::from_value(json).map_err(|e| ApiError::Decode(e.to_string()))
}

thread_local! {
    static ON_UNAUTHORIZED: RefCell<Option<Rc<dyn Fn()>>> = RefCell::new(None);
}

/// Обработчик истёкшей сессии (401); регистрирует `AuthProvider`
pub fn set_unauthorized_handler(handler: impl Fn() + 'static) {
    ON_UNAUTHORIZED.with(|h| *h.borrow_mut() = Some(Rc::new(handler)));
}

/// Вызвать обработчик вне заимствования: он может перерегистрировать себя
fn notify_unauthorized() -> bool {
    let handler = ON_UNAUTHORIZED.with(|h| h.borrow().clone());
    match handler {
        Some(handler) => {
            handler();
            true
        }
        None => false,
    }
}

/// Строка запроса из пар; `None` пропускается
pub fn build_query(params: &[(&str, Option<String>)]) -> String {
    let pairs: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_ref()
                .map(|v| format!("{}={}", urlencoding::encode(key), urlencoding::encode(v)))
        })
        .collect();
    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

fn url(path: &str) -> String {
    format!("{}{}", api_base_url().trim_end_matches('/'), path)
}

fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn execute<T: DeserializeOwned>(request: Request) -> Result<T, ApiError> {
    let method = request.method();
    let target = request.url();

    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(format!("Failed to send request: {}", e)))?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if !(200..300).contains(&status) {
        let error = ApiError::from_status(status, &body);
        if error == ApiError::Unauthorized {
            storage::clear_session();
            notify_unauthorized();
        }
        log::warn!("{:?} {} failed: {} ({})", method, target, status, error);
        return Err(error);
    }

    decode_body(status, &body)
}

pub async fn get<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let request = with_auth(Request::get(&url(path)))
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))?;
    execute(request).await
}

pub async fn post<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let request = with_auth(Request::post(&url(path)))
        .json(body)
        .map_err(|e| ApiError::Network(format!("Failed to serialize request: {}", e)))?;
    execute(request).await
}

pub async fn put<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let request = with_auth(Request::put(&url(path)))
        .json(body)
        .map_err(|e| ApiError::Network(format!("Failed to serialize request: {}", e)))?;
    execute(request).await
}

pub async fn delete(path: &str) -> Result<(), ApiError> {
    let request = with_auth(Request::delete(&url(path)))
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))?;
    execute::<Value>(request).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from_status(401, ""), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(403, ""), ApiError::Forbidden);
        assert_eq!(ApiError::from_status(404, "{}"), ApiError::NotFound);
        assert_eq!(ApiError::from_status(503, ""), ApiError::Server(503));
        assert_eq!(
            ApiError::from_status(500, "").to_string(),
            "Server error. Please try again later."
        );
        assert_eq!(
            ApiError::Unauthorized.to_string(),
            "Session expired. Please log in again."
        );
    }

    #[test]
    fn test_validation_detail_array() {
        let body = r#"{"detail":[
            {"loc":["body","email"],"msg":"field required"},
            {"loc":["body","items",0],"msg":"bad value"}
        ]}"#;
        assert_eq!(
            ApiError::from_status(422, body),
            ApiError::Validation("body.email: field required, body.items.0: bad value".into())
        );
        assert_eq!(
            ApiError::from_status(422, r#"{"detail":"Email taken"}"#),
            ApiError::Validation("Email taken".into())
        );
        assert_eq!(
            ApiError::from_status(422, "not json"),
            ApiError::Validation("Validation error".into())
        );
    }

    #[test]
    fn test_other_status_uses_detail_or_code() {
        assert_eq!(
            ApiError::from_status(409, r#"{"detail":"Already exists"}"#).to_string(),
            "Already exists"
        );
        assert_eq!(
            ApiError::from_status(400, r#"{"message":"Bad input"}"#).to_string(),
            "Bad input"
        );
        assert_eq!(ApiError::from_status(418, "").to_string(), "Error: 418");
    }

    #[test]
    fn test_decode_envelope_and_bare_body() {
        let wrapped: Item = decode_body(200, r#"{"success":true,"data":{"id":"1"}}"#).unwrap();
        assert_eq!(wrapped, Item { id: "1".into() });

        let bare: Vec<Item> = decode_body(200, r#"[{"id":"2"}]"#).unwrap();
        assert_eq!(bare.len(), 1);

        let failed = decode_body::<Item>(200, r#"{"success":false,"error":"Nope"}"#);
        assert_eq!(failed.unwrap_err().to_string(), "Nope");
    }

    #[test]
    fn test_empty_body_decodes_as_unit() {
        assert!(decode_body::<()>(204, "").is_ok());
        assert!(decode_body::<()>(200, r#"{"success":true,"message":"Deleted"}"#).is_ok());
        assert!(matches!(decode_body::<Item>(200, "{bad"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_unauthorized_handler_is_notified() {
        use std::cell::Cell;

        ON_UNAUTHORIZED.with(|h| *h.borrow_mut() = None);
        assert!(!notify_unauthorized());

        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        set_unauthorized_handler(move || counter.set(counter.get() + 1));
        assert!(notify_unauthorized());
        assert!(notify_unauthorized());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_build_query_skips_none() {
        assert_eq!(build_query(&[("role", None), ("search", None)]), "");
        assert_eq!(
            build_query(&[
                ("role", Some("technician".into())),
                ("is_active", None),
                ("search", Some("alex j".into())),
            ]),
            "?role=technician&search=alex%20j"
        );
    }
}
