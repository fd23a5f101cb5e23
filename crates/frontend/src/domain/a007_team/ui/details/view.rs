use super::view_model::{leader_choices, TeamDetailsVm};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::components::ui::Badge as UiBadge;
use crate::shared::date_utils::{format_date, format_datetime};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::system::auth::context::use_auth;
use contracts::domain::a007_team::{Team, TeamMember, TeamMemberRole};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use std::rc::Rc;
use thaw::*;

#[component]
pub fn TeamDetail(id: Option<String>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let vm = TeamDetailsVm::new(id.clone());
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();
    let form = vm.form;

    if let Some(id_val) = id.clone() {
        let tab_key = Team::detail_key(&id_val);
        Effect::new(move || {
            let name = form.with(|f| f.name.clone());
            if !name.is_empty() {
                tabs_store.update_tab_title(&tab_key, &detail_tab_label(Team::element_name(), &name));
            }
        });
    }

    let can_edit = move || auth_state.get().can("team:update");
    let title = if id.is_some() { "Edit team" } else { "New team" };
    let is_saving = vm.is_saving;
    let users = vm.users;
    let locations = vm.locations;
    let team = vm.team;
    let available = vm.available;
    let work_orders = vm.work_orders;
    let vm_save = vm.clone();
    let vm_valid = vm.clone();
    let vm_add = vm.clone();
    let vm_remove = vm.clone();

    let handle_save = move |_| {
        let on_saved = Rc::new(move |_| on_close.run(()));
        vm_save.save_command(on_saved);
    };

    let new_member = RwSignal::new(String::new());
    let new_role = RwSignal::new(TeamMemberRole::Member);
    let on_add_member = move |_| {
        let user_id = new_member.get_untracked();
        if user_id.is_empty() {
            return;
        }
        vm_add.add_member_command(user_id, new_role.get_untracked());
        new_member.set(String::new());
    };

    let member_row = move |member: TeamMember| {
        let vm_remove = vm_remove.clone();
        let user_id = member.user_id.to_string();
        let is_leader = member.role == TeamMemberRole::Leader;
        view! {
            <TableRow>
                <TableCell>
                    <TableCellLayout truncate=true>{member.user_name.clone()}</TableCellLayout>
                </TableCell>
                <TableCell>
                    <TableCellLayout truncate=true>{member.email.clone()}</TableCellLayout>
                </TableCell>
                <TableCell>
                    <TableCellLayout>
                        <UiBadge variant=if is_leader { "primary" } else { "neutral" }>
                            {member.role.label()}
                        </UiBadge>
                    </TableCellLayout>
                </TableCell>
                <TableCell>
                    <TableCellLayout>{format_date(member.joined_at)}</TableCellLayout>
                </TableCell>
                <TableCell>
                    <Show when=can_edit>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click={
                                let vm_remove = vm_remove.clone();
                                let user_id = user_id.clone();
                                move |_| vm_remove.remove_member_command(user_id.clone())
                            }
                            attr:title="Remove from team"
                        >
                            {icon("delete")}
                        </Button>
                    </Show>
                </TableCell>
            </TableRow>
        }
    };

    view! {
        <PageFrame page_id="a007_team--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h2>{title}</h2>
                </div>
                <div class="page__header-right">
                    <Show when=can_edit>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=handle_save.clone()
                            disabled=Signal::derive({
                                let vm_valid = vm_valid.clone();
                                move || is_saving.get() || !vm_valid.is_form_valid()()
                            })
                        >
                            {icon("save")}
                            " Save"
                        </Button>
                    </Show>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        {icon("x")}
                        " Close"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || vm.error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <div class="details-section">
                    <h4 class="details-section__title">"Team"</h4>
                    <div class="details-grid--3col">
                        <div class="form__group">
                            <label class="form__label">"Name"</label>
                            <input
                                class="form__input"
                                type="text"
                                placeholder="e.g. HVAC Crew"
                                prop:value=move || form.with(|f| f.name.clone())
                                on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                            />
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Leader"</label>
                            <select
                                class="form__select"
                                prop:value=move || form.with(|f| f.leader_id.clone())
                                on:change=move |ev| form.update(|f| f.leader_id = event_target_value(&ev))
                            >
                                <option value="">"No leader"</option>
                                {move || {
                                    users
                                        .with(|list| leader_choices(list))
                                        .into_iter()
                                        .map(|(id, name)| view! { <option value=id>{name}</option> })
                                        .collect_view()
                                }}
                            </select>
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Base location"</label>
                            <select
                                class="form__select"
                                prop:value=move || form.with(|f| f.location_id.clone())
                                on:change=move |ev| form.update(|f| f.location_id = event_target_value(&ev))
                            >
                                <option value="">"Not assigned"</option>
                                {move || {
                                    locations
                                        .get()
                                        .into_iter()
                                        .map(|l| view! { <option value=l.id.to_string()>{l.name}</option> })
                                        .collect_view()
                                }}
                            </select>
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

                <Show when=move || team.with(|t| t.is_some())>
                    {
                    let on_add_member = on_add_member.clone();
                    let member_row = member_row.clone();
                    view! {
                    <div class="details-section">
                        <h4 class="details-section__title">
                            {move || format!("Members ({})", team.with(|t| t.as_ref().map(|t| t.members_count()).unwrap_or(0)))}
                        </h4>
                        <Show when=can_edit>
                            {
                            let on_add_member = on_add_member.clone();
                            view! {
                            <Flex gap=FlexGap::Small align=FlexAlign::End>
                                <div class="form__group">
                                    <label class="form__label">"Add member"</label>
                                    <select
                                        class="form__select"
                                        prop:value=move || new_member.get()
                                        on:change=move |ev| new_member.set(event_target_value(&ev))
                                    >
                                        <option value="">"Select a user..."</option>
                                        {move || {
                                            available
                                                .get()
                                                .into_iter()
                                                .map(|u| view! { <option value=u.id.to_string()>{u.display_name()}</option> })
                                                .collect_view()
                                        }}
                                    </select>
                                </div>
                                <div class="form__group">
                                    <label class="form__label">"Role"</label>
                                    <select
                                        class="form__select"
                                        prop:value=move || new_role.get().as_str()
                                        on:change=move |ev| {
                                            if let Some(r) = TeamMemberRole::from_code(&event_target_value(&ev)) {
                                                new_role.set(r);
                                            }
                                        }
                                    >
                                        {TeamMemberRole::ALL
                                            .iter()
                                            .map(|r| view! { <option value=r.as_str()>{r.label()}</option> })
                                            .collect_view()}
                                    </select>
                                </div>
                                <Button
                                    appearance=ButtonAppearance::Primary
                                    on_click=on_add_member.clone()
                                    disabled=Signal::derive(move || new_member.with(|m| m.is_empty()))
                                >
                                    {icon("plus")}
                                    " Add"
                                </Button>
                            </Flex>
                            }
                            }
                        </Show>
                        <Show
                            when=move || team.with(|t| t.as_ref().is_some_and(|t| !t.members.is_empty()))
                            fallback=|| view! { <div class="empty-state">"No members yet"</div> }
                        >
                            {
                            let member_row = member_row.clone();
                            view! {
                            <Table attr:style="width: 100%;">
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell resizable=false min_width=160.0>"Name"</TableHeaderCell>
                                        <TableHeaderCell resizable=false min_width=180.0>"Email"</TableHeaderCell>
                                        <TableHeaderCell resizable=false min_width=90.0>"Role"</TableHeaderCell>
                                        <TableHeaderCell resizable=false min_width=110.0>"Joined"</TableHeaderCell>
                                        <TableHeaderCell resizable=false min_width=60.0></TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    <For
                                        each=move || team.with(|t| t.as_ref().map(|t| t.members.clone()).unwrap_or_default())
                                        key=|m| (m.user_id.clone(), m.role)
                                        children=member_row.clone()
                                    />
                                </TableBody>
                            </Table>
                            }
                            }
                        </Show>
                    </div>

                    <div class="details-section">
                        <h4 class="details-section__title">"Work orders"</h4>
                        <Show
                            when=move || !work_orders.with(|w| w.is_empty())
                            fallback=|| view! { <div class="empty-state">"No work orders assigned to this team"</div> }
                        >
                            <ul class="dashboard__list">
                                <For
                                    each=move || work_orders.get()
                                    key=|wo| wo.id.clone()
                                    children=move |wo| {
                                        view! {
                                            <li class="dashboard__list-item">
                                                <strong>{wo.id.to_string()}</strong>
                                                " "
                                                {wo.title.clone()}
                                                " · "
                                                {wo.assignee_name().unwrap_or_default().to_string()}
                                                " · "
                                                <UiBadge variant="neutral">{wo.status.label()}</UiBadge>
                                                <span class="dashboard__muted">{format!(" due {}", format_datetime(wo.due_date))}</span>
                                            </li>
                                        }
                                    }
                                />
                            </ul>
                        </Show>
                    </div>
                    }
                    }
                </Show>
            </div>
        </PageFrame>
    }
}
