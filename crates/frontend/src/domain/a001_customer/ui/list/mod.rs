pub mod state;

use contracts::domain::a001_customer::{Customer, CustomerStatus};
use leptos::prelude::*;
use thaw::*;

use crate::domain::a001_customer::ui::state::row_key;
use crate::shared::components::table::format_usd;
use crate::shared::export::export_to_csv;
use crate::shared::icons::icon;
use state::{count_label, filter_customers, max_budget_label, text_or_dash};

/// Searchable table of customers. Filtering happens in memory on every keystroke.
#[component]
pub fn CustomersListPanel(
    #[prop(into)] customers: Signal<Vec<Customer>>,
    /// Load counter of `customers`, used in the row keys
    #[prop(into)] generation: Signal<u64>,
    #[prop(into)] loading: Signal<bool>,
) -> impl IntoView {
    let search = RwSignal::new(String::new());

    let filtered = Memo::new(move |_| {
        let query = search.get();
        customers.with(|all| filter_customers(all, &query))
    });

    let counter = move || {
        let total = customers.with(|c| c.len());
        count_label(filtered.with(|f| f.len()), total)
    };

    let on_export = move |_| {
        let rows = filtered.get_untracked();
        if let Err(e) = export_to_csv(&rows, "customers.csv") {
            log::warn!("Customer export skipped: {}", e);
        }
    };

    view! {
        <div class="customers-list">
            <div class="filter-panel">
                <div class="filter-panel-header">
                    <div class="filter-panel-header__left">
                        {icon("filter")}
                        <span class="filter-panel__title">"Search"</span>
                    </div>
                    <div class="filter-panel-header__center">
                        <span class="filter-panel__counter">{counter}</span>
                    </div>
                    <div class="filter-panel-header__right">
                        <Button
                            appearance=ButtonAppearance::Subtle
                            size=ButtonSize::Small
                            on_click=on_export
                            disabled=Signal::derive(move || filtered.with(|f| f.is_empty()))
                        >
                            {icon("download")}
                            " Export CSV"
                        </Button>
                    </div>
                </div>

                <div class="filter-panel-content">
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <div style="flex: 1; max-width: 320px;">
                            <Input value=search placeholder="Customer ID or alias..." />
                        </div>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| search.set(String::new())
                        >
                            "Clear"
                        </Button>
                    </Flex>
                </div>
            </div>

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=160.0>"Customer ID"</TableHeaderCell>
                            <TableHeaderCell min_width=120.0>"Alias"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Spend"</TableHeaderCell>
                            <TableHeaderCell min_width=110.0>"Max Budget"</TableHeaderCell>
                            <TableHeaderCell min_width=90.0>"Status"</TableHeaderCell>
                            <TableHeaderCell min_width=120.0>"Allowed Region"</TableHeaderCell>
                            <TableHeaderCell min_width=140.0>"Default Model"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <Show when=move || loading.get() && customers.with(|c| c.is_empty())>
                            <TableRow>
                                <TableCell attr:colspan="7">
                                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                                        <Spinner size=SpinnerSize::Tiny />
                                        <span>"Loading customers..."</span>
                                    </Flex>
                                </TableCell>
                            </TableRow>
                        </Show>
                        <Show when=move || !loading.get() && filtered.with(|f| f.is_empty())>
                            <TableRow>
                                <TableCell attr:colspan="7">
                                    <TableCellLayout>"No customers found"</TableCellLayout>
                                </TableCell>
                            </TableRow>
                        </Show>
                        <For
                            each=move || {
                                let current = generation.get();
                                filtered
                                    .get()
                                    .into_iter()
                                    .map(|c| (current, c))
                                    .collect::<Vec<_>>()
                            }
                            key=|(current, c)| row_key(*current, &c.user_id)
                            children=move |(_, customer)| view! { <CustomerRow customer=customer /> }
                        />
                    </TableBody>
                </Table>
            </div>
        </div>
    }
}

#[component]
fn CustomerRow(customer: Customer) -> impl IntoView {
    let status = customer.status();
    let badge_color = match status {
        CustomerStatus::Active => BadgeColor::Success,
        CustomerStatus::Blocked => BadgeColor::Danger,
    };
    let max_budget = max_budget_label(&customer);

    view! {
        <TableRow>
            <TableCell>
                <TableCellLayout truncate=true>
                    <span style="font-weight: 500;">{customer.user_id.clone()}</span>
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout truncate=true>
                    {text_or_dash(customer.alias.as_deref())}
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{format_usd(customer.spend)}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{max_budget}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>
                    <Badge appearance=BadgeAppearance::Tint color=badge_color>
                        {status.label()}
                    </Badge>
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout truncate=true>
                    {text_or_dash(customer.allowed_model_region.as_deref())}
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout truncate=true>
                    {text_or_dash(customer.default_model.as_deref())}
                </TableCellLayout>
            </TableCell>
        </TableRow>
    }
}
