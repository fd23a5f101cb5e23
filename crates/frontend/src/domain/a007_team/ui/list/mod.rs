use contracts::domain::a007_team::Team;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a007_team::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{title_for_key, NEW_ID};
use crate::shared::components::ui::Badge as UiBadge;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    cmp_text, get_sort_class, get_sort_indicator, highlight_matches, sort_list, SortState, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_auth;

impl Sortable for Team {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "leader" => cmp_text(
                self.leader_name.as_deref().unwrap_or_default(),
                other.leader_name.as_deref().unwrap_or_default(),
            ),
            "members" => self.members_count().cmp(&other.members_count()),
            "status" => self.is_active.cmp(&other.is_active),
            _ => cmp_text(&self.name, &other.name),
        }
    }
}

#[component]
pub fn TeamList() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();
    let all_items: RwSignal<Vec<Team>> = RwSignal::new(Vec::new());
    let sort = RwSignal::new(SortState::new("name"));
    let search = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let can_create = move || auth_state.get().can("team:create");
    let can_delete = move || auth_state.get().can("team:delete");

    let visible = Memo::new(move |_| {
        let query = search.get();
        let mut rows: Vec<Team> = all_items
            .get()
            .into_iter()
            .filter(|t| t.matches_search(&query))
            .collect();
        sort.with(|s| sort_list(&mut rows, &s.field, s.ascending));
        rows
    });

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_teams().await {
                Ok(data) => {
                    leptos::logging::log!("👷 Loaded {} teams", data.len());
                    all_items.set(data);
                }
                Err(e) => {
                    log::warn!("Failed to load teams: {}", e);
                    set_error.set(Some(format!("Failed to load teams: {}", e)));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load_data());

    let open_detail = move |id: String| {
        let key = Team::detail_key(&id);
        tabs_store.open_tab(&key, &title_for_key(&key));
    };

    let on_delete = move |item: Team| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!(
                    "Delete team {}? Members stay in the system.",
                    item.name
                ))
                .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_team(item.id.to_string()).await {
                Ok(()) => all_items.update(|list| list.retain(|t| t.id != item.id)),
                Err(e) => set_error.set(Some(format!("Failed to delete team: {}", e))),
            }
        });
    };

    let sort_header = move |label: &'static str, field: &'static str| {
        view! {
            <div
                class="table__sortable-header"
                style="cursor:pointer;"
                on:click=move |_| sort.update(|s| s.toggle(field))
            >
                {label}
                <span class=move || sort.with(|s| get_sort_class(&s.field, field))>
                    {move || sort.with(|s| get_sort_indicator(&s.field, field, s.ascending))}
                </span>
            </div>
        }
    };

    view! {
        <PageFrame page_id="a007_team--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Team::list_name()}</h1>
                    <UiBadge variant="primary">{move || visible.get().len().to_string()}</UiBadge>
                </div>
                <div class="page__header-right">
                    <Show when=can_create>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| open_detail(NEW_ID.to_string())
                        >
                            {icon("plus")}
                            " New team"
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
                        <div style="max-width: 320px;">
                            <Input value=search placeholder="Search teams..." />
                        </div>
                    </div>
                </div>

                <Show
                    when=move || !(loading.get() && all_items.with(|l| l.is_empty()))
                    fallback=|| view! { <div class="page__loading"><Spinner /></div> }
                >
                    <Show
                        when=move || !visible.with(|v| v.is_empty())
                        fallback=|| view! { <div class="empty-state">"No teams found"</div> }
                    >
                        <div class="table-wrapper">
                            <Table attr:style="width: 100%;">
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell resizable=false min_width=200.0>
                                            {sort_header("Team", "name")}
                                        </TableHeaderCell>
                                        <TableHeaderCell resizable=false min_width=160.0>
                                            {sort_header("Leader", "leader")}
                                        </TableHeaderCell>
                                        <TableHeaderCell resizable=false min_width=160.0>"Location"</TableHeaderCell>
                                        <TableHeaderCell resizable=false min_width=90.0>
                                            {sort_header("Members", "members")}
                                        </TableHeaderCell>
                                        <TableHeaderCell resizable=false min_width=90.0>
                                            {sort_header("Status", "status")}
                                        </TableHeaderCell>
                                        <TableHeaderCell resizable=false min_width=60.0></TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    <For
                                        each=move || visible.get()
                                        key=|t| (t.id.clone(), t.updated_at)
                                        children=move |item: Team| {
                                            let query = search.get_untracked();
                                            let id = item.id.to_string();
                                            let for_delete = item.clone();
                                            let (variant, status) = if item.is_active {
                                                ("success", "Active")
                                            } else {
                                                ("neutral", "Inactive")
                                            };
                                            let name_hl = highlight_matches(&item.name, &query);
                                            let members_count = item.members_count();
                                            view! {
                                                <TableRow>
                                                    <TableCell>
                                                        <TableCellLayout truncate=true>
                                                            <a
                                                                href="#"
                                                                class="table__link"
                                                                on:click=move |ev| {
                                                                    ev.prevent_default();
                                                                    open_detail(id.clone());
                                                                }
                                                            >
                                                                {name_hl}
                                                            </a>
                                                            <div class="table__secondary">
                                                                {item.description.clone().unwrap_or_default()}
                                                            </div>
                                                        </TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout truncate=true>
                                                            {item.leader_name.clone().unwrap_or_else(|| "No leader".to_string())}
                                                        </TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout truncate=true>
                                                            {item.location_name.clone().unwrap_or_default()}
                                                        </TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout>{members_count}</TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout>
                                                            <UiBadge variant=variant>{status}</UiBadge>
                                                        </TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <Show when=can_delete>
                                                            <Button
                                                                appearance=ButtonAppearance::Subtle
                                                                on_click={
                                                                    let item = for_delete.clone();
                                                                    move |_| on_delete(item.clone())
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
                    </Show>
                </Show>
            </div>
        </PageFrame>
    }
}
