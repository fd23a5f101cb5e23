//! Модальное окно корректировки остатка

use contracts::domain::a004_part::{AdjustStockRequest, Part, MAX_STOCK_DELTA};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a004_part::api;
use crate::shared::icons::icon;

/// Разбор количества из поля ввода: "+5", "-3", "12"
fn parse_delta(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    trimmed
        .strip_prefix('+')
        .unwrap_or(trimmed)
        .parse::<i64>()
        .ok()
        .filter(|d| *d != 0 && d.unsigned_abs() <= MAX_STOCK_DELTA.unsigned_abs())
}

#[component]
pub fn AdjustStockModal<F1, F2>(part: Part, on_close: F1, on_adjusted: F2) -> impl IntoView
where
    F1: Fn() + 'static + Copy + Send + Sync,
    F2: Fn(Part) + 'static + Copy + Send + Sync,
{
    let delta = RwSignal::new(String::new());
    let reason = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let title = format!("Adjust stock: {}", part.name);
    let on_hand = part.quantity_on_hand;
    let part_id = part.id.to_string();

    let preview = move || match parse_delta(&delta.get()) {
        Some(d) => match part.stock_after(d) {
            Some(next) => format!("{} → {}", on_hand, next),
            None => "Out of range".to_string(),
        },
        None => String::new(),
    };

    let on_save = move |_| {
        let Some(value) = parse_delta(&delta.get()) else {
            set_error.set(Some("Enter a non-zero quantity, e.g. +10 or -2".into()));
            return;
        };
        let request = AdjustStockRequest {
            delta: value,
            reason: Some(reason.get()).filter(|r| !r.trim().is_empty()),
        };
        let id = part_id.clone();
        set_saving.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::adjust_stock(id, request).await {
                Ok(updated) => {
                    leptos::logging::log!(
                        "📦 Stock of {} adjusted by {}: {} on hand",
                        updated.part_number,
                        value,
                        updated.quantity_on_hand
                    );
                    on_adjusted(updated);
                }
                Err(e) => {
                    set_error.set(Some(e.to_string()));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close()>
            <div class="modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close()>
                        {icon("x")}
                    </Button>
                </div>

                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
                    <p>{format!("On hand: {}", on_hand)}</p>
                    <div class="form__group">
                        <Label>"Quantity change *"</Label>
                        <Input value=delta placeholder="+10 or -2" />
                        <span class="form__hint">{preview}</span>
                    </div>
                    <div class="form__group">
                        <Label>"Reason"</Label>
                        <Input value=reason placeholder="Used on WO-1002" />
                    </div>
                </div>

                <div class="modal-footer">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close()>
                        "Cancel"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=on_save
                        disabled=Signal::derive(move || saving.get())
                    >
                        {move || if saving.get() { "Saving..." } else { "Apply" }}
                    </Button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delta() {
        assert_eq!(parse_delta("+5"), Some(5));
        assert_eq!(parse_delta(" -3 "), Some(-3));
        assert_eq!(parse_delta("12"), Some(12));
        assert_eq!(parse_delta("0"), None);
        assert_eq!(parse_delta("ten"), None);
        assert_eq!(parse_delta(""), None);
    }

    #[test]
    fn test_parse_delta_rejects_out_of_range() {
        assert_eq!(parse_delta("4294967295"), Some(MAX_STOCK_DELTA));
        assert_eq!(parse_delta("-4294967295"), Some(-MAX_STOCK_DELTA));
        assert_eq!(parse_delta("4294967296"), None);
        assert_eq!(parse_delta("9223372036854775807"), None);
        assert_eq!(parse_delta("-9223372036854775808"), None);
    }
}
