//! Заявка оператора о неисправности оборудования

use contracts::domain::a001_equipment::Equipment;
use contracts::domain::a005_work_order::{ReportIssueRequest, WorkOrder};
use contracts::domain::common::Priority;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_equipment::api::report_issue;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;

#[component]
pub fn ReportIssuePanel(
    equipment: Vec<Equipment>,
    #[prop(into)] on_reported: Callback<WorkOrder>,
) -> impl IntoView {
    let (auth_state, _) = use_auth();
    let equipment_id = RwSignal::new(String::new());
    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let priority = RwSignal::new(Priority::High.as_str().to_string());
    let (error, set_error) = signal::<Option<String>>(None);
    let (sending, set_sending) = signal(false);

    let can_submit = move || {
        !sending.get() && !equipment_id.get().is_empty() && !title.get().trim().is_empty()
    };

    let on_submit = move |_| {
        let request = ReportIssueRequest {
            title: title.get(),
            description: description.get(),
            priority: Priority::from_code(&priority.get()).unwrap_or(Priority::High),
            reporter: auth_state.get().display_name(),
        };
        let id = equipment_id.get();
        set_sending.set(true);
        set_error.set(None);
        spawn_local(async move {
            match report_issue(id, request).await {
                Ok(order) => {
                    leptos::logging::log!("🚨 Issue reported as {}", order.id);
                    title.set(String::new());
                    description.set(String::new());
                    on_reported.run(order);
                }
                Err(e) => set_error.set(Some(format!("Failed to report issue: {}", e))),
            }
            set_sending.set(false);
        });
    };

    view! {
        <div class="dashboard__panel">
            <h3 class="dashboard__panel-title">"Report issue"</h3>
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            <div class="form__group">
                <label class="form__label">"Equipment"</label>
                <select
                    class="form__select"
                    prop:value=move || equipment_id.get()
                    on:change=move |ev| equipment_id.set(event_target_value(&ev))
                >
                    <option value="">"Select equipment..."</option>
                    {equipment
                        .iter()
                        .map(|e| view! { <option value=e.id.to_string()>{e.name.clone()}</option> })
                        .collect_view()}
                </select>
            </div>
            <div class="form__group">
                <label class="form__label">"What happened?"</label>
                <input
                    class="form__input"
                    type="text"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
            </div>
            <div class="form__group">
                <label class="form__label">"Details"</label>
                <textarea
                    class="form__textarea"
                    rows="3"
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                ></textarea>
            </div>
            <div class="form__group">
                <label class="form__label">"Priority"</label>
                <select
                    class="form__select"
                    prop:value=move || priority.get()
                    on:change=move |ev| priority.set(event_target_value(&ev))
                >
                    {Priority::ALL
                        .iter()
                        .map(|p| view! { <option value=p.as_str()>{p.label()}</option> })
                        .collect_view()}
                </select>
            </div>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=on_submit
                disabled=Signal::derive(move || !can_submit())
            >
                {icon("alert")}
                {move || if sending.get() { " Sending..." } else { " Report issue" }}
            </Button>
        </div>
    }
}
