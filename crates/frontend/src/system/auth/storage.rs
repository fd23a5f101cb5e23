use contracts::system::users::User;
use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "access_token";
const REFRESH_TOKEN_KEY: &str = "refresh_token";
const USER_KEY: &str = "user";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Save access token to localStorage
pub fn save_access_token(token: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(ACCESS_TOKEN_KEY, token);
    }
}

/// Get access token from localStorage
pub fn get_access_token() -> Option<String> {
    get_local_storage()?.get_item(ACCESS_TOKEN_KEY).ok()?
}

pub fn save_refresh_token(token: Option<&str>) {
    if let Some(storage) = get_local_storage() {
        let _ = match token {
            Some(t) => storage.set_item(REFRESH_TOKEN_KEY, t),
            None => storage.remove_item(REFRESH_TOKEN_KEY),
        };
    }
}

pub fn get_refresh_token() -> Option<String> {
    get_local_storage()?.get_item(REFRESH_TOKEN_KEY).ok()?
}

/// Пользователь хранится как JSON
pub fn save_user(user: &User) {
    let Ok(json) = serde_json::to_string(user) else {
        log::warn!("Failed to serialize user for storage");
        return;
    };
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(USER_KEY, &json);
    }
}

pub fn get_user() -> Option<User> {
    let json = get_local_storage()?.get_item(USER_KEY).ok()??;
    serde_json::from_str(&json).ok()
}

/// Clear tokens and the cached user
pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(REFRESH_TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}
