use leptos::prelude::*;
use thaw::*;

use crate::shared::icons::icon;

const TAB_CUSTOMERS: &str = "customers";
const TAB_SPEND: &str = "spend";

/// Two-tab layout of the customers screen.
///
/// Holds no data: shows the last refresh time it is given and forwards
/// clicks on "Refresh" to `on_refresh`. Both panels stay mounted; the
/// inactive one is hidden.
#[component]
pub fn CustomersTabs<L, S>(
    list: L,
    spend: S,
    #[prop(into)] last_refreshed: Signal<Option<String>>,
    #[prop(into)] refreshing: Signal<bool>,
    on_refresh: Callback<()>,
) -> impl IntoView
where
    L: Fn() -> AnyView + 'static + Send,
    S: Fn() -> AnyView + 'static + Send,
{
    let active_tab = RwSignal::new(TAB_CUSTOMERS);

    let tab_button = move |key: &'static str, title: &'static str, icon_name: &'static str| {
        view! {
            <Button
                appearance=Signal::derive(move || {
                    if active_tab.get() == key {
                        ButtonAppearance::Primary
                    } else {
                        ButtonAppearance::Subtle
                    }
                })
                size=ButtonSize::Small
                on_click=move |_| active_tab.set(key)
            >
                <span class="tab-icon">{icon(icon_name)}</span>
                {title}
            </Button>
        }
    };

    let panel_style = move |key: &'static str| {
        move || {
            if active_tab.get() == key {
                "display: block;"
            } else {
                "display: none;"
            }
        }
    };

    view! {
        <div class="customers-tabs">
            <Flex
                gap=FlexGap::Small
                align=FlexAlign::Center
                class="customers-tabs__bar"
                style="justify-content: space-between;"
            >
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    {tab_button(TAB_CUSTOMERS, "Customers", "users")}
                    {tab_button(TAB_SPEND, "Spend Report", "dollar-sign")}
                </Flex>
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <span class="customers-tabs__refreshed">
                        {move || match last_refreshed.get() {
                            Some(at) => format!("Last refreshed: {}", at),
                            None => "Not loaded yet".to_string(),
                        }}
                    </span>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        size=ButtonSize::Small
                        on_click=move |_| on_refresh.run(())
                        disabled=refreshing
                    >
                        {icon("refresh")}
                        {move || if refreshing.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </Flex>
            </Flex>

            <div class="customers-tabs__panel" style=panel_style(TAB_CUSTOMERS)>
                {list()}
            </div>
            <div class="customers-tabs__panel" style=panel_style(TAB_SPEND)>
                {spend()}
            </div>
        </div>
    }
}
