use crate::shared::icons::icon;
use leptos::prelude::*;

/// Summary card with an icon, a label and a preformatted value
#[component]
pub fn StatCard(
    /// Label displayed above the value
    label: &'static str,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// Already formatted value
    #[prop(into)]
    value: Signal<String>,
    /// Dimmed while the numbers are being reloaded
    #[prop(into, optional)]
    loading: Signal<bool>,
) -> impl IntoView {
    let card_class = move || {
        if loading.get() {
            "stat-card stat-card--loading"
        } else {
            "stat-card"
        }
    };

    view! {
        <div class=card_class>
            <div class="stat-card__icon">
                {icon(icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{move || value.get()}</div>
            </div>
        </div>
    }
}
