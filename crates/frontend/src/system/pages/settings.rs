use leptos::prelude::*;
use thaw::*;

use crate::shared::config::{api_base_url, config, set_api_base_url, set_mock_enabled};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;

/// Источник данных: mock-сервис или REST API
#[component]
pub fn SettingsPage() -> impl IntoView {
    let current = config();
    let mock_enabled = RwSignal::new(current.mock.enabled);
    let base_url = RwSignal::new(api_base_url());
    let (saved, set_saved) = signal(false);

    let latency = current.mock.latency;
    let latency_rows = vec![
        ("List", latency.list),
        ("Get", latency.get),
        ("Create / update / delete", latency.mutate),
        ("Kanban board", latency.kanban_list),
        ("Kanban move", latency.kanban_update),
        ("Kanban card", latency.kanban_get),
        ("Locations list", latency.locations_list),
    ];

    let on_save = move |_| {
        set_mock_enabled(mock_enabled.get_untracked());
        set_api_base_url(&base_url.get_untracked());
        base_url.set(api_base_url());
        set_saved.set(true);
    };

    view! {
        <PageFrame page_id="sys_settings--system" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Settings"</h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=on_save>
                        {icon("save")}
                        " Save"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <Show when=move || saved.get()>
                    <div class="alert alert--success">
                        "Settings saved. Reload open tabs to fetch data from the new source."
                    </div>
                </Show>

                <div class="form__group">
                    <Checkbox checked=mock_enabled label="Use mock data (in-memory, simulated latency)" />
                </div>
                <div class="form__group" style="max-width: 420px;">
                    <Label>"API base URL"</Label>
                    <Input value=base_url placeholder="http://localhost:8000/api/v1" />
                </div>

                <h3>"Mock latency, ms"</h3>
                <table class="simple-table">
                    <tbody>
                        {latency_rows
                            .into_iter()
                            .map(|(label, ms)| view! {
                                <tr>
                                    <td>{label}</td>
                                    <td>{ms}</td>
                                </tr>
                            })
                            .collect_view()}
                    </tbody>
                </table>
            </div>
        </PageFrame>
    }
}
