use contracts::domain::a008_organization::{Organization, SubscriptionTier};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a008_organization::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{title_for_key, NEW_ID};
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::ui::Badge as UiBadge;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    cmp_text, get_sort_class, get_sort_indicator, highlight_matches, sort_list, SortState, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_auth;

impl Sortable for Organization {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "industry" => cmp_text(&self.industry, &other.industry),
            "location" => cmp_text(&self.location_label(), &other.location_label()),
            "tier" => (self.subscription_tier as u8).cmp(&(other.subscription_tier as u8)),
            "created_at" => self.created_at.cmp(&other.created_at),
            _ => cmp_text(&self.name, &other.name),
        }
    }
}

pub fn tier_variant(tier: SubscriptionTier) -> &'static str {
    match tier {
        SubscriptionTier::Enterprise => "primary",
        SubscriptionTier::Pro => "success",
        SubscriptionTier::Basic => "warning",
        SubscriptionTier::Free => "neutral",
    }
}

/// (всего, активных, ожидают активации)
fn counts(orgs: &[Organization]) -> (usize, usize, usize) {
    let active = orgs.iter().filter(|o| o.is_active).count();
    (orgs.len(), active, orgs.len() - active)
}

#[component]
pub fn OrganizationList() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();
    let all_items: RwSignal<Vec<Organization>> = RwSignal::new(Vec::new());
    let sort = RwSignal::new(SortState::new("name"));
    let search = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let can_create = move || auth_state.get().can("organization:create");

    let visible = Memo::new(move |_| {
        let query = search.get();
        let mut rows: Vec<Organization> = all_items
            .get()
            .into_iter()
            .filter(|o| o.matches_search(&query))
            .collect();
        sort.with(|s| sort_list(&mut rows, &s.field, s.ascending));
        rows
    });

    let totals = Memo::new(move |_| all_items.with(|list| counts(list)));
    let loaded = move |value: usize| Signal::derive(move || (!loading.get()).then(|| value.to_string()));

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_organizations().await {
                Ok(data) => {
                    leptos::logging::log!("🏢 Loaded {} organizations", data.len());
                    all_items.set(data);
                }
                Err(e) => {
                    log::warn!("Failed to load organizations: {}", e);
                    set_error.set(Some(format!("Failed to load organizations: {}", e)));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load_data());

    let open_detail = move |id: String| {
        let key = Organization::detail_key(&id);
        tabs_store.open_tab(&key, &title_for_key(&key));
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
        <PageFrame page_id="a008_organization--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Organization::list_name()}</h1>
                    <UiBadge variant="primary">{move || visible.get().len().to_string()}</UiBadge>
                </div>
                <div class="page__header-right">
                    <Show when=can_create>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| open_detail(NEW_ID.to_string())
                        >
                            {icon("plus")}
                            " New organization"
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

                <div class="dashboard__cards">
                    {move || {
                        let (total, active, pending) = totals.get();
                        view! {
                            <StatCard label="Total organizations" icon_name="organization" value=loaded(total) />
                            <StatCard label="Active" icon_name="check" value=loaded(active) status="success" />
                            <StatCard
                                label="Pending activation"
                                icon_name="alert"
                                value=loaded(pending)
                                status={if pending > 0 { "warning" } else { "" }}
                            />
                        }
                    }}
                </div>

                <div class="filter-panel">
                    <div class="filter-panel-content">
                        <div style="max-width: 320px;">
                            <Input value=search placeholder="Name or industry..." />
                        </div>
                    </div>
                </div>

                <Show
                    when=move || !(loading.get() && all_items.with(|l| l.is_empty()))
                    fallback=|| view! { <div class="page__loading"><Spinner /></div> }
                >
                    <div class="table-wrapper">
                        <Table attr:style="width: 100%;">
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell resizable=false min_width=200.0>
                                        {sort_header("Organization", "name")}
                                    </TableHeaderCell>
                                    <TableHeaderCell resizable=false min_width=130.0>
                                        {sort_header("Industry", "industry")}
                                    </TableHeaderCell>
                                    <TableHeaderCell resizable=false min_width=160.0>
                                        {sort_header("Location", "location")}
                                    </TableHeaderCell>
                                    <TableHeaderCell resizable=false min_width=100.0>
                                        {sort_header("Plan", "tier")}
                                    </TableHeaderCell>
                                    <TableHeaderCell resizable=false min_width=90.0>"Status"</TableHeaderCell>
                                    <TableHeaderCell resizable=false min_width=110.0>
                                        {sort_header("Created", "created_at")}
                                    </TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                <For
                                    each=move || visible.get()
                                    key=|o| (o.id.clone(), o.updated_at)
                                    children=move |item: Organization| {
                                        let query = search.get_untracked();
                                        let id = item.id.to_string();
                                        let (variant, status) = if item.is_active {
                                            ("success", "Active")
                                        } else {
                                            ("warning", "Pending")
                                        };
                                        let name_hl = highlight_matches(&item.name, &query);
                                        let industry_hl = highlight_matches(&item.industry, &query);
                                        let location_label = item.location_label();
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
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout truncate=true>
                                                        {industry_hl}
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout truncate=true>{location_label}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        <UiBadge variant=tier_variant(item.subscription_tier)>
                                                            {item.subscription_tier.label()}
                                                        </UiBadge>
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        <UiBadge variant=variant>{status}</UiBadge>
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{format_date(item.created_at)}</TableCellLayout>
                                                </TableCell>
                                            </TableRow>
                                        }
                                    }
                                />
                            </TableBody>
                        </Table>
                    </div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::mock_seed;
    use chrono::Utc;

    #[test]
    fn test_counts_split_active_and_pending() {
        let orgs = mock_seed::seed(Utc::now()).organizations.list();
        assert_eq!(counts(&orgs), (4, 3, 1));
        assert_eq!(counts(&[]), (0, 0, 0));
    }

    #[test]
    fn test_sort_by_plan() {
        let mut orgs = mock_seed::seed(Utc::now()).organizations.list();
        sort_list(&mut orgs, "tier", false);
        assert_eq!(orgs[0].name, "Acme Manufacturing");
        assert_eq!(orgs[3].subscription_tier, SubscriptionTier::Basic);
    }
}
