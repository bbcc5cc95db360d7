mod details;
pub mod state;

use chrono::NaiveDate;
use contracts::domain::a001_customer::SpendRecord;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_customer::api;
use crate::domain::a001_customer::ui::list::state::text_or_dash;
use crate::domain::a001_customer::ui::state::{row_key, LoadOutcome};
use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::table::{format_count, format_usd};
use crate::shared::components::table_totals_row::TableTotalsRow;
use crate::shared::date_utils::today;
use crate::shared::export::{export_to_csv, CsvExportable};
use crate::shared::icons::icon;
use details::CustomerSpendDetailsDialog;
use state::{create_state, SpendPanelState};

impl CsvExportable for SpendRecord {
    fn headers() -> Vec<&'static str> {
        vec![
            "Customer ID",
            "Alias",
            "Total Spend (USD)",
            "Requests",
            "Tokens",
            "Prompt Tokens",
            "Completion Tokens",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.user_id.clone(),
            self.alias.clone().unwrap_or_default(),
            format!("{:.2}", self.total_spend),
            self.total_requests.to_string(),
            self.total_tokens.to_string(),
            self.total_prompt_tokens.to_string(),
            self.total_completion_tokens.to_string(),
        ]
    }
}

/// Alias cell; blank and absent aliases show a dash like the customer list
pub fn alias_label(record: &SpendRecord) -> String {
    text_or_dash(record.alias.as_deref())
}

/// Spend report for a date range with expandable per-model rows.
///
/// Owns its date range, page and report. Fetches on mount, on "Apply Filter"
/// (back to page 1) and on page changes; editing the dates alone does not fetch.
#[component]
pub fn CustomerSpendPanel(#[prop(into)] access_token: Signal<Option<String>>) -> impl IntoView {
    let state = create_state(today());
    let detail_open = RwSignal::new(false);
    let detail_id = RwSignal::new(None::<String>);

    let load = move || {
        let token = access_token.get_untracked();
        let Some((ticket, token, query)) =
            state.try_update(|s| s.begin_load(token.as_deref())).flatten()
        else {
            return;
        };

        spawn_local(async move {
            let result = api::fetch_spend_report(&token, &query).await;
            match state.try_update(|s| s.finish_load(ticket, result)) {
                Some(LoadOutcome::Applied) => {
                    let count = state.with_untracked(|s| s.report.records.len());
                    log::info!("Loaded spend report: {} customers", count);
                }
                Some(LoadOutcome::Failed(e)) => {
                    log::error!("Failed to load spend report: {}", e);
                }
                Some(LoadOutcome::Stale) => {
                    log::debug!("Dropped spend report response #{}: superseded", ticket);
                }
                None => {}
            }
        });
    };

    Effect::new(move |_| {
        if access_token.with(|t| t.is_some()) {
            load();
        }
    });

    let date_from = Signal::derive(move || state.with(|s| s.date_from));
    let date_to = Signal::derive(move || state.with(|s| s.date_to));
    let loading = Signal::derive(move || state.with(|s| s.loading));
    let totals = Memo::new(move |_| state.with(SpendPanelState::totals));
    let records = Memo::new(move |_| state.with(|s| s.report.records.clone()));
    let generation = Signal::derive(move || state.with(|s| s.generation));

    let on_apply = move |_| {
        state.update(SpendPanelState::apply_filter);
        load();
    };

    let on_page_change = Callback::new(move |page: u32| {
        state.update(|s| s.set_page(page));
        load();
    });

    let on_page_size_change = Callback::new(move |size: u32| {
        state.update(|s| s.set_page_size(size));
        load();
    });

    let on_range_change = Callback::new(move |(from, to): (Option<NaiveDate>, Option<NaiveDate>)| {
        state.update(|s| s.set_range(from, to));
    });

    let on_export = move |_| {
        let rows = records.get_untracked();
        if let Err(e) = export_to_csv(&rows, "customer_spend.csv") {
            log::warn!("Spend export skipped: {}", e);
        }
    };

    let on_open_detail = Callback::new(move |id: String| {
        detail_id.set(Some(id));
        detail_open.set(true);
    });

    let on_toggle = Callback::new(move |id: String| {
        state.update(|s| s.toggle_expanded(&id));
    });

    view! {
        <div class="customer-spend">
            <div class="filter-panel">
                <div class="filter-panel-content">
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <DateRangePicker
                            date_from=date_from
                            date_to=date_to
                            on_change=on_range_change
                            label="Period".to_string()
                        />
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=on_apply
                            disabled=loading
                        >
                            {icon("filter")}
                            " Apply Filter"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=on_export
                            disabled=Signal::derive(move || records.with(|r| r.is_empty()))
                        >
                            {icon("download")}
                            " Export CSV"
                        </Button>
                    </Flex>
                </div>
                <div class="filter-panel-header">
                    <div class="filter-panel-header__center">
                        <PaginationControls
                            current_page=Signal::derive(move || state.with(|s| s.page))
                            total_pages=Signal::derive(move || state.with(SpendPanelState::total_pages))
                            total_count=Signal::derive(move || state.with(|s| s.report.total_customers))
                            page_size=Signal::derive(move || state.with(|s| s.page_size))
                            on_page_change=on_page_change
                            on_page_size_change=on_page_size_change
                            disabled=loading
                        />
                    </div>
                </div>
            </div>

            <div class="customer-spend__cards">
                <StatCard
                    label="Total Spend"
                    icon_name="dollar-sign"
                    value=Signal::derive(move || format_usd(totals.get().total_spend))
                    loading=loading
                />
                <StatCard
                    label="Total Requests"
                    icon_name="activity"
                    value=Signal::derive(move || format_count(totals.get().total_requests))
                    loading=loading
                />
                <StatCard
                    label="Total Tokens"
                    icon_name="hash"
                    value=Signal::derive(move || format_count(totals.get().total_tokens))
                    loading=loading
                />
                <StatCard
                    label="Customers"
                    icon_name="users"
                    value=Signal::derive(move || {
                        state.with(|s| format_count(s.report.total_customers))
                    })
                    loading=loading
                />
            </div>

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell resizable=false min_width=32.0></TableHeaderCell>
                            <TableHeaderCell min_width=160.0>"Customer ID"</TableHeaderCell>
                            <TableHeaderCell min_width=120.0>"Alias"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Spend"</TableHeaderCell>
                            <TableHeaderCell min_width=90.0>"Requests"</TableHeaderCell>
                            <TableHeaderCell min_width=90.0>"Tokens"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <Show when=move || !loading.get() && records.with(|r| r.is_empty())>
                            <TableRow>
                                <TableCell attr:colspan="6">
                                    <TableCellLayout>"No spend in this period"</TableCellLayout>
                                </TableCell>
                            </TableRow>
                        </Show>
                        <For
                            each=move || {
                                let current = generation.get();
                                records
                                    .get()
                                    .into_iter()
                                    .map(|r| (current, r))
                                    .collect::<Vec<_>>()
                            }
                            key=|(current, r)| row_key(*current, &r.user_id)
                            children=move |(_, record)| {
                                let id = record.user_id.clone();
                                let expanded = Signal::derive(move || {
                                    state.with(|s| s.is_expanded(&id))
                                });
                                view! {
                                    <SpendRow
                                        record=record
                                        expanded=expanded
                                        on_toggle=on_toggle
                                        on_open_detail=on_open_detail
                                    />
                                }
                            }
                        />
                        <Show when=move || records.with(|r| !r.is_empty())>
                            <TableTotalsRow>
                                <td></td>
                                <td>"Total"</td>
                                <td></td>
                                <td>{move || format_usd(totals.get().total_spend)}</td>
                                <td>{move || format_count(totals.get().total_requests)}</td>
                                <td>{move || format_count(totals.get().total_tokens)}</td>
                            </TableTotalsRow>
                        </Show>
                    </TableBody>
                </Table>
            </div>

            <CustomerSpendDetailsDialog
                open=detail_open
                end_user_id=detail_id
                access_token=access_token
            />
        </div>
    }
}

/// A record row followed by its per-model rows while expanded
#[component]
fn SpendRow(
    record: SpendRecord,
    #[prop(into)] expanded: Signal<bool>,
    on_toggle: Callback<String>,
    on_open_detail: Callback<String>,
) -> impl IntoView {
    let toggle_id = record.user_id.clone();
    let detail_id = record.user_id.clone();
    let has_models = !record.spend_by_model.is_empty();
    let models = StoredValue::new(record.spend_by_model.clone());
    let user_label = record.user_id.clone();
    let alias = alias_label(&record);
    let spend = format_usd(record.total_spend);
    let requests = format_count(record.total_requests);
    let tokens = format_count(record.total_tokens);

    view! {
        <TableRow>
            <TableCell>
                {has_models
                    .then(|| {
                        view! {
                            <Button
                                appearance=ButtonAppearance::Transparent
                                size=ButtonSize::Small
                                on_click=move |_| on_toggle.run(toggle_id.clone())
                            >
                                {move || {
                                    if expanded.get() {
                                        icon("chevron-down")
                                    } else {
                                        icon("chevron-right")
                                    }
                                }}
                            </Button>
                        }
                    })}
            </TableCell>
            <TableCell>
                <TableCellLayout truncate=true>
                    <a
                        href="#"
                        class="table__link"
                        on:click=move |ev| {
                            ev.prevent_default();
                            on_open_detail.run(detail_id.clone());
                        }
                    >
                        {user_label}
                    </a>
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout truncate=true>
                    {alias}
                </TableCellLayout>
            </TableCell>
            <TableCell>{spend}</TableCell>
            <TableCell>{requests}</TableCell>
            <TableCell>{tokens}</TableCell>
        </TableRow>
        <Show when=move || expanded.get()>
            {move || {
                models
                    .get_value()
                    .into_iter()
                    .map(|(model, usage)| {
                        view! {
                            <TableRow class="table__row--nested">
                                <TableCell></TableCell>
                                <TableCell attr:colspan="2">
                                    <TableCellLayout truncate=true>
                                        <span class="table__nested-label">{model}</span>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>{format_usd(usage.spend)}</TableCell>
                                <TableCell>{format_count(usage.requests)}</TableCell>
                                <TableCell>{format_count(usage.tokens)}</TableCell>
                            </TableRow>
                        }
                    })
                    .collect_view()
            }}
        </Show>
    }
}
