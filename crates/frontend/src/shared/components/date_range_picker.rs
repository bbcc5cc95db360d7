use chrono::{Datelike, NaiveDate};
use leptos::prelude::*;
use thaw::*;

use crate::shared::date_utils::{
    default_spend_range, format_date_input, month_bounds, parse_date_input,
    previous_month_bounds, today,
};

/// Two date inputs plus quick-range buttons.
///
/// Either bound may be empty; an empty input is reported as `None`.
/// Quick buttons: "30D" (last 30 days), "0M" (current month),
/// "-1M" (month before the current "from" date, or before today).
#[component]
pub fn DateRangePicker(
    #[prop(into)]
    date_from: Signal<Option<NaiveDate>>,

    #[prop(into)]
    date_to: Signal<Option<NaiveDate>>,

    /// Called with the new (from, to) pair
    on_change: Callback<(Option<NaiveDate>, Option<NaiveDate>)>,

    #[prop(optional)]
    label: Option<String>,
) -> impl IntoView {
    let on_from_change = move |raw: String| {
        on_change.run((parse_date_input(&raw), date_to.get_untracked()));
    };

    let on_to_change = move |raw: String| {
        on_change.run((date_from.get_untracked(), parse_date_input(&raw)));
    };

    let on_last_30_days = move |_| {
        let (from, to) = default_spend_range(today());
        on_change.run((Some(from), Some(to)));
    };

    let on_current_month = move |_| {
        let now = today();
        if let Some((from, to)) = month_bounds(now.year(), now.month()) {
            on_change.run((Some(from), Some(to)));
        }
    };

    let on_previous_month = move |_| {
        let anchor = date_from.get_untracked().unwrap_or_else(today);
        if let Some((from, to)) = previous_month_bounds(anchor) {
            on_change.run((Some(from), Some(to)));
        }
    };

    view! {
        <Flex vertical=true gap=FlexGap::Small>
            {label.map(|l| view! { <Label>{l}</Label> })}

            <Flex class="date-range-picker" align=FlexAlign::Center gap=FlexGap::Small>
                <input
                    type="date"
                    class="date-range-picker__input"
                    prop:value=move || format_date_input(date_from.get())
                    on:input=move |ev| on_from_change(event_target_value(&ev))
                />

                <div>"—"</div>

                <input
                    type="date"
                    class="date-range-picker__input"
                    prop:value=move || format_date_input(date_to.get())
                    on:input=move |ev| on_to_change(event_target_value(&ev))
                />

                <div class="date-range-picker-compact">
                    <ButtonGroup>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            on_click=on_previous_month
                        >
                            "-1M"
                        </Button>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            on_click=on_current_month
                        >
                            "0M"
                        </Button>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            on_click=on_last_30_days
                        >
                            "30D"
                        </Button>
                    </ButtonGroup>
                </div>
            </Flex>
        </Flex>
    }
}
