use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

/// Полоса открытых вкладок над контентом
#[component]
pub fn TabBar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="tab-bar">
            <For
                each=move || ctx.opened.get()
                key=|tab| (tab.key.clone(), tab.title.clone())
                children=move |tab| {
                    let key_for_active = tab.key.clone();
                    let key_for_switch = tab.key.clone();
                    let key_for_close = tab.key.clone();
                    view! {
                        <div
                            class="tab-bar__item"
                            class:tab-bar__item--active=move || {
                                ctx.active.get().as_deref() == Some(key_for_active.as_str())
                            }
                            on:click=move |_| ctx.activate_tab(&key_for_switch)
                        >
                            <span class="tab-bar__title">{tab.title.clone()}</span>
                            <button
                                class="tab-bar__close"
                                title="Close"
                                on:click=move |ev: ev::MouseEvent| {
                                    ev.stop_propagation();
                                    ctx.close_tab(&key_for_close);
                                }
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[component]
pub fn Center(children: Children) -> impl IntoView {
    view! {
        <div data-zone="center" class="app-tabs" style="flex: 1; overflow: auto;">
            <TabBar />
            {children()}
        </div>
    }
}
