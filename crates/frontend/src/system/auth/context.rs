use contracts::system::auth::Session;
use contracts::system::permissions::has_permission;
use contracts::system::users::{User, UserRole};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use crate::shared::api_client::{set_unauthorized_handler, ApiError};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user: Option<User>,
}

impl AuthState {
    pub fn from_session(session: Session) -> Self {
        Self {
            access_token: Some(session.access_token),
            user: Some(session.user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn display_name(&self) -> String {
        self.user
            .as_ref()
            .map(|u| u.display_name())
            .unwrap_or_else(|| "Guest".to_string())
    }

    pub fn can(&self, permission: &str) -> bool {
        self.role()
            .map(|r| has_permission(r, permission))
            .unwrap_or(false)
    }

    pub fn is_admin(&self) -> bool {
        self.role().map(|r| r.is_admin()).unwrap_or(false)
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());
    let (restoring, set_restoring) = signal(true);

    // Try to restore session from localStorage on mount
    Effect::new(move |_| {
        spawn_local(async move {
            if let Some(session) = api::restore_session().await {
                leptos::logging::log!("🔐 Session restored for {}", session.user.email);
                set_auth_state.set(AuthState::from_session(session));
            }
            set_restoring.set(false);
        });
    });

    // 401 от API: хранилище уже очищено клиентом, сбрасываем состояние
    set_unauthorized_handler(move || {
        if auth_state.get_untracked().is_authenticated() {
            log::warn!("Session expired, returning to login");
            set_auth_state.set(AuthState::default());
        }
    });

    provide_context(auth_state);
    provide_context(set_auth_state);
    provide_context(AuthRestoring(restoring));

    children()
}

/// Идёт восстановление сессии (логин-форму пока не показываем)
#[derive(Clone, Copy)]
pub struct AuthRestoring(pub ReadSignal<bool>);

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

pub fn use_auth_restoring() -> ReadSignal<bool> {
    use_context::<AuthRestoring>()
        .map(|r| r.0)
        .expect("AuthProvider not found in component tree")
}

/// Helper: Perform login
pub async fn do_login(
    email: String,
    password: String,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<UserRole, ApiError> {
    let session = api::login(email, password).await?;
    let role = session.user.role;
    leptos::logging::log!("✅ Logged in as {} ({})", session.user.email, role.label());
    set_auth_state.set(AuthState::from_session(session));
    Ok(role)
}

/// Helper: Perform logout
pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    api::logout().await;
    leptos::logging::log!("👋 Logged out");
    set_auth_state.set(AuthState::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use contracts::system::users::UserId;

    fn state(role: UserRole) -> AuthState {
        AuthState {
            access_token: Some("t".into()),
            user: Some(User {
                id: UserId::new("1"),
                email: "m@cmms.local".into(),
                first_name: "Maria".into(),
                last_name: "Garcia".into(),
                phone: None,
                role,
                is_active: true,
                created_at: Utc::now(),
                last_login: None,
            }),
        }
    }

    #[test]
    fn test_guest_has_no_permissions() {
        let guest = AuthState::default();
        assert!(!guest.is_authenticated());
        assert!(!guest.can("equipment:read"));
        assert_eq!(guest.display_name(), "Guest");
    }

    #[test]
    fn test_permissions_follow_role() {
        let manager = state(UserRole::Manager);
        assert!(manager.is_authenticated());
        assert!(manager.can("schedule:create"));
        assert!(!manager.can("user:read"));
        assert!(!manager.is_admin());
        assert_eq!(manager.display_name(), "Maria Garcia");
        assert!(state(UserRole::Admin).is_admin());
    }
}
