mod state;

use chrono::Utc;
use contracts::domain::a005_work_order::{WorkOrder, WorkOrderStatus};
use contracts::domain::common::{AggregateRoot, Priority};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::create::WorkOrderCreateForm;
use super::{priority_variant, status_variant};
use crate::domain::a005_work_order::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{title_for_key, KANBAN_KEY};
use crate::shared::components::ui::Badge as UiBadge;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    cmp_text, get_sort_class, get_sort_indicator, highlight_matches, sort_list, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_auth;
use state::create_state;

impl Sortable for WorkOrder {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "id" => self.id.as_str().cmp(other.id.as_str()),
            "title" => cmp_text(&self.title, &other.title),
            "status" => self.status.as_str().cmp(other.status.as_str()),
            // Critical первым при сортировке по убыванию
            "priority" => self.priority.cmp(&other.priority),
            "assignee" => cmp_text(
                self.assignee_name().unwrap_or_default(),
                other.assignee_name().unwrap_or_default(),
            ),
            "created_at" => self.created_at.cmp(&other.created_at),
            _ => self.due_date.cmp(&other.due_date),
        }
    }
}

#[component]
pub fn WorkOrderList() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();
    let state = create_state();
    let all_items: RwSignal<Vec<WorkOrder>> = RwSignal::new(Vec::new());
    let search = RwSignal::new(String::new());
    let overdue_only = RwSignal::new(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let (show_create, set_show_create) = signal(false);

    let can_create = move || auth_state.get().can("workorder:create");
    let can_delete = move || auth_state.get().can("workorder:delete");

    // Поля ввода синхронизируются в состояние фильтра
    Effect::new(move |_| {
        let query = search.get();
        let overdue = overdue_only.get();
        state.update(|s| {
            s.filter.search = query;
            s.filter.overdue_only = overdue;
        });
    });

    let visible = Memo::new(move |_| {
        let now = Utc::now();
        let (filter, field, ascending) =
            state.with(|s| (s.filter.clone(), s.sort_field.clone(), s.sort_ascending));
        let mut rows: Vec<WorkOrder> = all_items.with(|list| {
            list.iter().filter(|wo| filter.matches(wo, now)).cloned().collect()
        });
        sort_list(&mut rows, &field, ascending);
        rows
    });

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_work_orders().await {
                Ok(data) => {
                    leptos::logging::log!("🧾 Loaded {} work orders", data.len());
                    all_items.set(data);
                }
                Err(e) => {
                    log::warn!("Failed to load work orders: {}", e);
                    set_error.set(Some(format!("Failed to load work orders: {}", e)));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load_data());

    let open_detail = move |id: String| {
        let key = WorkOrder::detail_key(&id);
        tabs_store.open_tab(&key, &title_for_key(&key));
    };

    let on_delete = move |wo: WorkOrder| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(&format!("Delete {}?", wo.id)).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_work_order(wo.id.to_string()).await {
                Ok(()) => all_items.update(|list| list.retain(|x| x.id != wo.id)),
                Err(e) => set_error.set(Some(format!("Failed to delete work order: {}", e))),
            }
        });
    };

    let toggle_sort = move |field: &'static str| {
        move |_| {
            state.update(|s| {
                if s.sort_field == field {
                    s.sort_ascending = !s.sort_ascending;
                } else {
                    s.sort_field = field.to_string();
                    s.sort_ascending = true;
                }
            });
        }
    };

    let sort_header = move |label: &'static str, field: &'static str| {
        view! {
            <div class="table__sortable-header" style="cursor:pointer;" on:click=toggle_sort(field)>
                {label}
                <span class=move || state.with(|s| get_sort_class(&s.sort_field, field))>
                    {move || state.with(|s| get_sort_indicator(&s.sort_field, field, s.sort_ascending))}
                </span>
            </div>
        }
    };

    view! {
        <PageFrame page_id="a005_work_order--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{WorkOrder::list_name()}</h1>
                    <UiBadge variant="primary">{move || visible.get().len().to_string()}</UiBadge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| tabs_store.open_tab(KANBAN_KEY, &title_for_key(KANBAN_KEY))
                    >
                        {icon("kanban")}
                        " Board"
                    </Button>
                    <Show when=can_create>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| set_show_create.set(true)
                        >
                            {icon("plus")}
                            " New work order"
                        </Button>
                    </Show>
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
                        <Flex gap=FlexGap::Small align=FlexAlign::Center>
                            <div style="flex: 1; max-width: 320px;">
                                <Input value=search placeholder="ID, title or assignee..." />
                            </div>
                            <select
                                class="form__select"
                                prop:value=move || state.get().filter.status
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    state.update(|s| s.filter.status = value);
                                }
                            >
                                <option value="">"All statuses"</option>
                                {WorkOrderStatus::ALL
                                    .iter()
                                    .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                    .collect_view()}
                            </select>
                            <select
                                class="form__select"
                                prop:value=move || state.get().filter.priority
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    state.update(|s| s.filter.priority = value);
                                }
                            >
                                <option value="">"All priorities"</option>
                                {Priority::ALL
                                    .iter()
                                    .map(|p| view! { <option value=p.as_str()>{p.label()}</option> })
                                    .collect_view()}
                            </select>
                            <Checkbox checked=overdue_only label="Overdue only" />
                        </Flex>
                    </div>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell resizable=false min_width=90.0>{sort_header("ID", "id")}</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=220.0>{sort_header("Title", "title")}</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=110.0>{sort_header("Status", "status")}</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=90.0>{sort_header("Priority", "priority")}</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=100.0>"Type"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=130.0>{sort_header("Assignee", "assignee")}</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=150.0>{sort_header("Due", "due_date")}</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=70.0>"Tasks"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=50.0></TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|wo| (wo.id.clone(), wo.status, wo.priority, wo.task_progress(), wo.comments.len())
                                children=move |wo: WorkOrder| {
                                    let query = search.get_untracked();
                                    let id = wo.id.to_string();
                                    let overdue = wo.is_overdue(Utc::now());
                                    let (done, total) = wo.task_progress();
                                    let for_delete = wo.clone();
                                    let id_hl = highlight_matches(wo.id.as_str(), &query);
                                    let title_hl = highlight_matches(&wo.title, &query);
                                    let assignee_hl = highlight_matches(wo.assignee_name().unwrap_or("—"), &query);
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a
                                                        href="#"
                                                        class="table__link"
                                                        on:click=move |ev| {
                                                            ev.prevent_default();
                                                            open_detail(id.clone());
                                                        }
                                                    >
                                                        {id_hl}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {title_hl}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <UiBadge variant=status_variant(wo.status)>{wo.status.label()}</UiBadge>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <UiBadge variant=priority_variant(wo.priority)>{wo.priority.label()}</UiBadge>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{wo.work_order_type.label()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {assignee_hl}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class:text-error=overdue>{format_datetime(wo.due_date)}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format!("{}/{}", done, total)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Show when=can_delete>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click={
                                                            let wo = for_delete.clone();
                                                            move |_| on_delete(wo.clone())
                                                        }
                                                        attr:title="Delete"
                                                    >
                                                        {icon("delete")}
                                                    </Button>
                                                </Show>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                <Show when=move || !loading.get() && visible.with(|v| v.is_empty())>
                    <div class="empty-state">"No work orders match the current filters."</div>
                </Show>

                {move || show_create.get().then(|| view! {
                    <WorkOrderCreateForm
                        on_close=move || set_show_create.set(false)
                        on_created=move |wo: WorkOrder| {
                            set_show_create.set(false);
                            all_items.update(|list| list.push(wo));
                        }
                    />
                })}
            </div>
        </PageFrame>
    }
}
