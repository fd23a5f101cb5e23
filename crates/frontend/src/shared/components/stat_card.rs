use crate::shared::icons::icon;
use leptos::prelude::*;

/// Карточка KPI на дашборде
#[component]
pub fn StatCard(
    /// Label displayed above the value
    label: &'static str,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// Уже отформатированное значение (None = загрузка)
    #[prop(into)]
    value: Signal<Option<String>>,
    /// "success", "warning", "error" или "" для нейтрального
    #[prop(optional, into)]
    status: Signal<&'static str>,
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let status_class = move || match status.get() {
        "success" => "stat-card stat-card--success",
        "error" => "stat-card stat-card--error",
        "warning" => "stat-card stat-card--warning",
        _ => "stat-card",
    };

    view! {
        <div class=status_class>
            <div class="stat-card__icon">
                {icon(icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">
                    {move || value.get().unwrap_or_else(|| "—".to_string())}
                </div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}
