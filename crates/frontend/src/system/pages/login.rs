use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::config::use_mock;
use crate::shared::mock_seed::DEMO_PASSWORD;
use crate::system::auth::context::{do_login, use_auth};

#[component]
pub fn LoginPage() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let (_, set_auth_state) = use_auth();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let email_val = email.get();
        let password_val = password.get();

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            // AuthState переключит AppShell на MainLayout
            if let Err(e) = do_login(email_val, password_val, set_auth_state).await {
                log::warn!("Login failed: {}", e);
                set_error_message.set(Some(e.to_string()));
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"CMMS"</h1>
                <h2>"Sign in to your account"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
                            placeholder="you@company.com"
                            value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>

                <Show when=use_mock>
                    <div class="login-info">
                        <p>"Demo mode. Any seeded account works:"</p>
                        <p><strong>"manager@cmms.local"</strong> " / " <strong>{DEMO_PASSWORD}</strong></p>
                        <p>"Also: superadmin, admin, technician, operator, viewer @cmms.local"</p>
                    </div>
                </Show>
            </div>
        </div>
    }
}
