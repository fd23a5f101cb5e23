use leptos::prelude::*;

/// Badge component with different variants
#[component]
pub fn Badge(
    /// "primary", "success", "warning", "error", "neutral" (default)
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    children: Children,
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("neutral") {
        "primary" => "badge--primary",
        "success" => "badge--success",
        "warning" => "badge--warning",
        "error" => "badge--error",
        _ => "badge--neutral",
    };

    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <span class=move || format!("badge {} {}", variant_class(), additional_class())>
            {children()}
        </span>
    }
}

/// Полоса состояния 0..=100 с цветом по уровню (good/fair/poor)
#[component]
pub fn HealthBar(score: u8, level: &'static str) -> impl IntoView {
    let width = format!("width: {}%;", score.min(100));
    view! {
        <div class="health-bar" title=format!("Health {}%", score)>
            <div class=format!("health-bar__fill health-bar__fill--{}", level) style=width></div>
            <span class="health-bar__value">{format!("{}%", score)}</span>
        </div>
    }
}
