mod state;

use contracts::system::audit::{AuditAction, AuditLog};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::ui::Badge as UiBadge;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::list_utils::highlight_matches;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::audit_log::api;
use crate::system::auth::guard::RequirePermission;
use state::create_state;

/// Типы ресурсов, которые пишут в журнал
const RESOURCE_TYPES: [&str; 5] = ["auth", "user", "team", "organization", "workorder"];

pub fn action_variant(action: AuditAction) -> &'static str {
    match action {
        AuditAction::Create => "success",
        AuditAction::Update | AuditAction::Assignment => "primary",
        AuditAction::Delete => "error",
        AuditAction::StatusChange => "warning",
        AuditAction::Login | AuditAction::Logout => "neutral",
    }
}

#[component]
pub fn AuditLogPage() -> impl IntoView {
    view! {
        <RequirePermission permission="audit:read">
            <AuditLogList />
        </RequirePermission>
    }
}

#[component]
fn AuditLogList() -> impl IntoView {
    let state = create_state();
    let items: RwSignal<Vec<AuditLog>> = RwSignal::new(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let search_signal = RwSignal::new(String::new());

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        let filter = state.with_untracked(|s| s.filter());
        spawn_local(async move {
            match api::fetch_audit_logs(filter).await {
                Ok(data) => {
                    leptos::logging::log!("📜 Loaded {} audit entries", data.len());
                    items.set(data);
                    state.update(|s| s.is_loaded = true);
                }
                Err(e) => {
                    log::warn!("Failed to load audit log: {}", e);
                    set_error.set(Some(format!("Failed to load audit log: {}", e)));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_data();
        }
    });

    let apply_search = move || {
        state.update(|s| s.search_query = search_signal.get_untracked());
        load_data();
    };

    let reset_filters = move || {
        search_signal.set(String::new());
        state.update(|s| {
            s.search_query.clear();
            s.action.clear();
            s.resource_type.clear();
            s.start_date.clear();
            s.end_date.clear();
        });
        load_data();
    };

    let select_filter = move |apply: fn(&mut state::AuditListState, String)| {
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            state.update(|s| apply(s, value));
            load_data();
        }
    };

    view! {
        <PageFrame page_id="sys_audit_log--list" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Audit Logs"</h1>
                    <UiBadge variant="primary">{move || items.with(|l| l.len()).to_string()}</UiBadge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="filter-panel">
                    <div class="filter-panel-content">
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <div style="flex: 1; max-width: 280px;">
                                <Input value=search_signal placeholder="Action, user or details..." />
                            </div>
                            <select
                                class="form__select"
                                prop:value=move || state.get().action
                                on:change=select_filter(|s, v| s.action = v)
                            >
                                <option value="">"All actions"</option>
                                {AuditAction::ALL
                                    .iter()
                                    .map(|a| view! { <option value=a.as_str()>{a.label()}</option> })
                                    .collect_view()}
                            </select>
                            <select
                                class="form__select"
                                prop:value=move || state.get().resource_type
                                on:change=select_filter(|s, v| s.resource_type = v)
                            >
                                <option value="">"All resources"</option>
                                {RESOURCE_TYPES
                                    .iter()
                                    .map(|r| view! { <option value=*r>{*r}</option> })
                                    .collect_view()}
                            </select>
                            <input
                                class="form__input"
                                type="date"
                                title="From"
                                prop:value=move || state.get().start_date
                                on:change=select_filter(|s, v| s.start_date = v)
                            />
                            <input
                                class="form__input"
                                type="date"
                                title="To"
                                prop:value=move || state.get().end_date
                                on:change=select_filter(|s, v| s.end_date = v)
                            />
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| apply_search()
                                disabled=Signal::derive(move || loading.get())
                            >
                                "Search"
                            </Button>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| reset_filters()>
                                "Reset"
                            </Button>
                        </Flex>
                    </div>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell resizable=false min_width=150.0>"Time"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=160.0>"User"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=120.0>"Action"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=140.0>"Resource"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=240.0>"Details"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=100.0>"IP"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=90.0>"Status"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|log| log.id.clone()
                                children=move |log: AuditLog| {
                                    let query = state.with_untracked(|s| s.search_query.clone());
                                    let role = log.user_role.map(|r| r.label()).unwrap_or_default();
                                    let resource = match &log.resource_id {
                                        Some(id) => format!("{} {}", log.resource_type, id),
                                        None => log.resource_type.clone(),
                                    };
                                    let (status_variant, status) = if log.success {
                                        ("success", "Success")
                                    } else {
                                        ("error", "Failed")
                                    };
                                    let user_name_hl = highlight_matches(&log.user_name, &query);
                                    let details_hl = highlight_matches(&log.details, &query);
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>{format_datetime(log.created_at)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {user_name_hl}
                                                    <div class="dashboard__muted">{role}</div>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <UiBadge variant=action_variant(log.action)>{log.action.label()}</UiBadge>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{resource}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {details_hl}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{log.ip_address.clone().unwrap_or_default()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <UiBadge variant=status_variant>{status}</UiBadge>
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                <Show when=move || state.with(|s| s.is_loaded) && items.with(|l| l.is_empty())>
                    <div class="empty-state">"No audit entries match the current filters."</div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_has_a_badge() {
        let variants: Vec<&str> = AuditAction::ALL.iter().map(|a| action_variant(*a)).collect();
        assert_eq!(variants.len(), 7);
        assert_eq!(action_variant(AuditAction::Delete), "error");
        assert!(variants.iter().all(|v| ["success", "primary", "error", "warning", "neutral"].contains(v)));
    }
}
