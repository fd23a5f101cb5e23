use super::view_model::OrganizationDetailsVm;
use crate::domain::a008_organization::ui::list::tier_variant;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::ui::Badge as UiBadge;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use contracts::domain::a008_organization::{
    slugify, Organization, OrganizationDto, OrganizationStats, SubscriptionTier, INDUSTRIES,
};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use std::rc::Rc;
use thaw::*;

fn text_field(
    form: RwSignal<OrganizationDto>,
    label: &'static str,
    get: fn(&OrganizationDto) -> String,
    set: fn(&mut OrganizationDto, String),
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            <input
                class="form__input"
                type="text"
                prop:value=move || form.with(get)
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
            />
        </div>
    }
}

fn stats_cards(stats: OrganizationStats) -> impl IntoView {
    let value = |v: String| Signal::stored(Some(v));
    let overdue_status = if stats.overdue_workorders > 0 { "error" } else { "success" };
    view! {
        <div class="dashboard__cards">
            <StatCard label="Equipment" icon_name="equipment" value=value(stats.total_equipment.to_string()) />
            <StatCard label="Active users" icon_name="users" value=value(stats.total_users.to_string()) />
            <StatCard label="Locations" icon_name="location" value=value(stats.total_locations.to_string()) />
            <StatCard
                label="Active work orders"
                icon_name="work-orders"
                value=value(stats.active_workorders.to_string())
                subtitle=Signal::stored(Some(format!("{} completed this month", stats.completed_this_month)))
            />
            <StatCard
                label="Overdue"
                icon_name="alert"
                value=value(stats.overdue_workorders.to_string())
                status=overdue_status
            />
            <StatCard
                label="Average health"
                icon_name="check"
                value=value(format!("{:.1}%", stats.equipment_health_avg))
            />
        </div>
    }
}

#[component]
pub fn OrganizationDetail(id: Option<String>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let vm = OrganizationDetailsVm::new(id.clone());
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let form = vm.form;

    if let Some(id_val) = id.clone() {
        let tab_key = Organization::detail_key(&id_val);
        Effect::new(move || {
            let name = form.with(|f| f.name.clone());
            if !name.is_empty() {
                tabs_store.update_tab_title(
                    &tab_key,
                    &detail_tab_label(Organization::element_name(), &name),
                );
            }
        });
    }

    let title = if id.is_some() { "Edit organization" } else { "New organization" };
    let is_saving = vm.is_saving;
    let stats = vm.stats;
    let activity = vm.activity;
    let vm_save = vm.clone();
    let vm_valid = vm.clone();

    let handle_save = move |_| {
        let on_saved = Rc::new(move |_| on_close.run(()));
        vm_save.save_command(on_saved);
    };

    // Подсказка slug, пока поле пустое
    let slug_hint = move || form.with(|f| f.effective_slug());

    view! {
        <PageFrame page_id="a008_organization--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h2>{title}</h2>
                    {move || {
                        let tier = form.with(|f| f.subscription_tier);
                        view! { <UiBadge variant=tier_variant(tier)>{tier.label()}</UiBadge> }
                    }}
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=handle_save
                        disabled=Signal::derive(move || is_saving.get() || !vm_valid.is_form_valid()())
                    >
                        {icon("save")}
                        " Save"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        {icon("x")}
                        " Close"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || vm.error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                {move || stats.get().map(stats_cards)}

                <div class="details-section">
                    <h4 class="details-section__title">"Organization"</h4>
                    <div class="details-grid--3col">
                        {text_field(form, "Name", |f| f.name.clone(), |f, v| f.name = v)}
                        <div class="form__group">
                            <label class="form__label">"Slug"</label>
                            <input
                                class="form__input"
                                type="text"
                                prop:placeholder=slug_hint
                                prop:value=move || form.with(|f| f.slug.clone())
                                on:input=move |ev| form.update(|f| f.slug = event_target_value(&ev))
                                on:blur=move |_| form.update(|f| {
                                    if !f.slug.trim().is_empty() {
                                        f.slug = slugify(&f.slug);
                                    }
                                })
                            />
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Industry"</label>
                            <select
                                class="form__select"
                                prop:value=move || form.with(|f| f.industry.clone())
                                on:change=move |ev| form.update(|f| f.industry = event_target_value(&ev))
                            >
                                <option value="">"Select industry"</option>
                                {INDUSTRIES
                                    .iter()
                                    .map(|i| view! { <option value=*i>{*i}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Plan"</label>
                            <select
                                class="form__select"
                                prop:value=move || form.with(|f| f.subscription_tier.as_str())
                                on:change=move |ev| {
                                    if let Some(t) = SubscriptionTier::from_code(&event_target_value(&ev)) {
                                        form.update(|f| f.subscription_tier = t);
                                    }
                                }
                            >
                                {SubscriptionTier::ALL
                                    .iter()
                                    .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="form__group">
                            <label class="form__label">
                                <input
                                    type="checkbox"
                                    prop:checked=move || form.with(|f| f.is_active)
                                    on:change=move |ev| form.update(|f| f.is_active = event_target_checked(&ev))
                                />
                                " Active"
                            </label>
                        </div>
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Description"</label>
                        <textarea
                            class="form__textarea"
                            rows="3"
                            prop:value=move || form.with(|f| f.description.clone())
                            on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                        ></textarea>
                    </div>
                </div>

                <div class="details-section">
                    <h4 class="details-section__title">"Contact"</h4>
                    <div class="details-grid--3col">
                        {text_field(form, "Email", |f| f.email.clone(), |f, v| f.email = v)}
                        {text_field(form, "Phone", |f| f.phone.clone(), |f, v| f.phone = v)}
                        {text_field(form, "Website", |f| f.website.clone(), |f, v| f.website = v)}
                    </div>
                </div>

                <div class="details-section">
                    <h4 class="details-section__title">"Address"</h4>
                    <div class="details-grid--3col">
                        {text_field(form, "Street", |f| f.address.clone(), |f, v| f.address = v)}
                        {text_field(form, "City", |f| f.city.clone(), |f, v| f.city = v)}
                        {text_field(form, "State", |f| f.state.clone(), |f, v| f.state = v)}
                        {text_field(form, "Country", |f| f.country.clone(), |f, v| f.country = v)}
                        {text_field(form, "Postal code", |f| f.postal_code.clone(), |f, v| f.postal_code = v)}
                    </div>
                </div>

                <Show when=move || form.with(|f| f.id.is_some())>
                    <div class="details-section">
                        <h4 class="details-section__title">"Recent activity"</h4>
                        <Show
                            when=move || !activity.with(|a| a.is_empty())
                            fallback=|| view! { <div class="empty-state">"No recorded activity"</div> }
                        >
                            <ul class="dashboard__list">
                                <For
                                    each=move || activity.get()
                                    key=|log| log.id.clone()
                                    children=|log| {
                                        view! {
                                            <li class="dashboard__list-item">
                                                <strong>{log.action.label()}</strong>
                                                " "
                                                {log.details.clone()}
                                                <span class="dashboard__muted">
                                                    {format!(" · {} · {}", log.user_name, format_datetime(log.created_at))}
                                                </span>
                                            </li>
                                        }
                                    }
                                />
                            </ul>
                        </Show>
                    </div>
                </Show>
            </div>
        </PageFrame>
    }
}
