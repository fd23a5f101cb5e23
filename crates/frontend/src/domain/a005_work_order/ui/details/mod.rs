//! Карточка наряда. На канбан-доске открывается в выезжающей панели,
//! из списка или дашборда - во вкладке.

use chrono::Utc;
use contracts::domain::a005_work_order::{allowed_transitions, WorkOrder, WorkOrderStatus};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::{priority_variant, status_variant};
use crate::domain::a005_work_order::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::api_client::ApiError;
use crate::shared::components::ui::Badge as UiBadge;
use crate::shared::date_utils::{due_label, format_datetime};
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;

#[component]
pub fn WorkOrderDetail(
    id: String,
    #[prop(into)] on_close: Callback<()>,
    /// Вызывается после каждого успешного изменения
    #[prop(optional)]
    on_changed: Option<Callback<WorkOrder>>,
) -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();
    let order: RwSignal<Option<WorkOrder>> = RwSignal::new(None);
    let (error, set_error) = signal::<Option<String>>(None);
    let (busy, set_busy) = signal(false);
    let new_comment = RwSignal::new(String::new());

    let can_update = move || auth_state.get().can("workorder:update");

    {
        let id = id.clone();
        spawn_local(async move {
            match api::fetch_work_order(id.clone()).await {
                Ok(wo) => {
                    tabs_store.update_tab_title(
                        &WorkOrder::detail_key(&id),
                        &detail_tab_label(WorkOrder::element_name(), wo.id.as_str()),
                    );
                    order.set(Some(wo));
                }
                Err(e) => {
                    log::warn!("Failed to load work order {}: {}", id, e);
                    set_error.set(Some(format!("Failed to load work order: {}", e)));
                }
            }
        });
    }

    let id = StoredValue::new(id);

    // Общая обработка результата любой команды
    let apply_result = move |result: Result<WorkOrder, ApiError>| {
        set_busy.set(false);
        match result {
            Ok(updated) => {
                set_error.set(None);
                order.set(Some(updated.clone()));
                if let Some(cb) = on_changed {
                    cb.run(updated);
                }
            }
            Err(e) => set_error.set(Some(e.to_string())),
        }
    };

    let change_status = move |target: WorkOrderStatus| {
        set_busy.set(true);
        let id = id.get_value();
        spawn_local(async move {
            leptos::logging::log!("🔄 {} → {}", id, target.as_str());
            apply_result(api::update_status(id, target).await);
        });
    };

    let toggle_task = move |task_id: String, completed: bool| {
        let id = id.get_value();
        spawn_local(async move {
            apply_result(api::toggle_task(id, task_id, !completed).await);
        });
    };

    let submit_comment = move || {
        let message = new_comment.get_untracked();
        if message.trim().is_empty() {
            return;
        }
        let author = auth_state.get_untracked().display_name();
        let id = id.get_value();
        set_busy.set(true);
        spawn_local(async move {
            let result = api::add_comment(id, author, message).await;
            if result.is_ok() {
                new_comment.set(String::new());
            }
            apply_result(result);
        });
    };

    view! {
        <div class="wo-detail">
            <div class="wo-detail__header">
                <div class="wo-detail__header-left">
                    <span class="wo-detail__id">{move || id.get_value()}</span>
                    {move || order.get().map(|wo| view! {
                        <UiBadge variant=priority_variant(wo.priority)>{wo.priority.label()}</UiBadge>
                        <UiBadge variant=status_variant(wo.status)>{wo.status.label()}</UiBadge>
                    })}
                </div>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                    {icon("x")}
                </Button>
            </div>

            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            {move || match order.get() {
                None => view! { <div class="wo-detail__loading"><Spinner /></div> }.into_any(),
                Some(wo) => {
                    let now = Utc::now();
                    let (done, total) = wo.task_progress();
                    let percent = if total == 0 { 0 } else { done * 100 / total };
                    let overdue = wo.is_overdue(now);
                    let status = wo.status;
                    let has_actions = !allowed_transitions(status).is_empty();
                    view! {
                        <div class="wo-detail__body">
                            <h2 class="wo-detail__title">{wo.title.clone()}</h2>
                            <p class="wo-detail__description">{wo.description.clone()}</p>

                            <div class="wo-detail__meta">
                                <div>
                                    <span class="wo-detail__label">"Assignee"</span>
                                    <span>{wo.assignee_name().unwrap_or("Unassigned").to_string()}</span>
                                </div>
                                <div>
                                    <span class="wo-detail__label">"Type"</span>
                                    <span>{wo.work_order_type.label()}</span>
                                </div>
                                <div>
                                    <span class="wo-detail__label">"Due"</span>
                                    <span class:wo-detail__overdue=overdue>
                                        {format!("{} ({})", format_datetime(wo.due_date), due_label(wo.due_date, now))}
                                    </span>
                                </div>
                                <div>
                                    <span class="wo-detail__label">"Equipment"</span>
                                    <span>
                                        {wo.equipment_id.as_ref().map(|e| e.to_string()).unwrap_or_else(|| "—".to_string())}
                                    </span>
                                </div>
                            </div>

                            <Show when=move || can_update() && has_actions>
                                <div class="wo-detail__actions">
                                    {allowed_transitions(status)
                                        .into_iter()
                                        .map(|action| {
                                            let appearance = if action.primary {
                                                ButtonAppearance::Primary
                                            } else {
                                                ButtonAppearance::Secondary
                                            };
                                            view! {
                                                <Button
                                                    appearance=appearance
                                                    disabled=Signal::derive(move || busy.get())
                                                    on_click=move |_| change_status(action.target)
                                                >
                                                    {action.label}
                                                </Button>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            </Show>

                            <div class="wo-detail__section">
                                <h4>{format!("Tasks ({}/{})", done, total)}</h4>
                                <div class="wo-detail__progress">
                                    <div class="wo-detail__progress-fill" style=format!("width: {}%;", percent)></div>
                                </div>
                                <ul class="wo-detail__tasks">
                                    {wo.tasks
                                        .iter()
                                        .map(|task| {
                                            let task_id = task.id.clone();
                                            let completed = task.completed;
                                            view! {
                                                <li class="wo-detail__task" class:wo-detail__task--done=completed>
                                                    <label>
                                                        <input
                                                            type="checkbox"
                                                            prop:checked=completed
                                                            disabled=move || !can_update()
                                                            on:change=move |_| toggle_task(task_id.clone(), completed)
                                                        />
                                                        <span>{task.text.clone()}</span>
                                                    </label>
                                                </li>
                                            }
                                        })
                                        .collect_view()}
                                </ul>
                            </div>

                            <div class="wo-detail__section">
                                <h4>{format!("Comments ({})", wo.comments.len())}</h4>
                                <ul class="wo-detail__comments">
                                    {wo.comments
                                        .iter()
                                        .map(|c| view! {
                                            <li class="wo-detail__comment">
                                                <div class="wo-detail__comment-head">
                                                    <strong>{c.author.clone()}</strong>
                                                    <span class="wo-detail__comment-date">{format_datetime(c.created_at)}</span>
                                                </div>
                                                <div>{c.message.clone()}</div>
                                            </li>
                                        })
                                        .collect_view()}
                                </ul>
                                <div class="wo-detail__comment-form">
                                    <textarea
                                        class="form__textarea"
                                        rows="2"
                                        placeholder="Add a comment..."
                                        prop:value=move || new_comment.get()
                                        on:input=move |ev| new_comment.set(event_target_value(&ev))
                                    ></textarea>
                                    <Button
                                        appearance=ButtonAppearance::Primary
                                        disabled=Signal::derive(move || busy.get() || new_comment.with(|c| c.trim().is_empty()))
                                        on_click=move |_| submit_comment()
                                    >
                                        "Add comment"
                                    </Button>
                                </div>
                            </div>
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
