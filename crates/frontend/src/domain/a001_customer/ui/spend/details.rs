use contracts::domain::a001_customer::CustomerSpendDetail;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_customer::api;
use crate::domain::a001_customer::ui::list::state::text_or_dash;
use crate::shared::components::table::{format_count, format_usd};
use crate::shared::request_sequence::RequestSequence;

/// Per-model spend of a single customer, fetched when the dialog opens.
///
/// Uses `GET /customer/{id}/spend`, which is not limited to the report's
/// date range.
#[component]
pub fn CustomerSpendDetailsDialog(
    open: RwSignal<bool>,
    #[prop(into)] end_user_id: Signal<Option<String>>,
    #[prop(into)] access_token: Signal<Option<String>>,
) -> impl IntoView {
    let detail = RwSignal::new(None::<CustomerSpendDetail>);
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);
    let requests = StoredValue::new(RequestSequence::default());

    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        let (Some(id), Some(token)) = (end_user_id.get(), access_token.get()) else {
            return;
        };

        let ticket = requests.try_update_value(|r| r.issue()).unwrap_or_default();
        detail.set(None);
        error.set(None);
        loading.set(true);

        spawn_local(async move {
            let result = api::fetch_customer_spend_detail(&token, &id).await;
            if !requests.with_value(|r| r.is_latest(ticket)) {
                return;
            }
            loading.set(false);
            match result {
                Ok(d) => detail.set(Some(d)),
                Err(e) => {
                    log::error!("Failed to load spend of customer {}: {}", id, e);
                    error.set(Some(e.to_string()));
                }
            }
        });
    });

    let title = move || match end_user_id.get() {
        Some(id) => format!("Customer spend: {}", id),
        None => "Customer spend".to_string(),
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>{title}</DialogTitle>
                    <DialogContent>
                        <Show when=move || loading.get()>
                            <Flex gap=FlexGap::Small align=FlexAlign::Center>
                                <Spinner size=SpinnerSize::Tiny />
                                <span>"Loading..."</span>
                            </Flex>
                        </Show>
                        {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}
                        {move || detail.get().map(|d| view! { <DetailBody detail=d /> })}
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| open.set(false)>
                            "Close"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[component]
fn DetailBody(detail: CustomerSpendDetail) -> impl IntoView {
    let alias = text_or_dash(detail.alias.as_deref());
    let is_empty = detail.spend_by_model.is_empty();

    view! {
        <div class="customer-spend-detail">
            <div class="customer-spend-detail__summary">
                <div>"Alias: " {alias}</div>
                <div>"Total spend: " {format_usd(detail.total_spend)}</div>
                <div>"Requests: " {format_count(detail.total_requests)}</div>
                <div>
                    "Tokens: " {format_count(detail.total_tokens)} " (prompt "
                    {format_count(detail.total_prompt_tokens)} ", completion "
                    {format_count(detail.total_completion_tokens)} ")"
                </div>
            </div>

            {if is_empty {
                view! { <div class="customer-spend-detail__empty">"No usage recorded"</div> }
                    .into_any()
            } else {
                view! {
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Model"</TableHeaderCell>
                                <TableHeaderCell>"Spend"</TableHeaderCell>
                                <TableHeaderCell>"Requests"</TableHeaderCell>
                                <TableHeaderCell>"Tokens"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {detail
                                .spend_by_model
                                .into_iter()
                                .map(|m| {
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{m.model}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>{format_usd(m.total_spend)}</TableCell>
                                            <TableCell>{format_count(m.total_requests)}</TableCell>
                                            <TableCell>{format_count(m.total_tokens)}</TableCell>
                                        </TableRow>
                                    }
                                })
                                .collect_view()}
                        </TableBody>
                    </Table>
                }
                    .into_any()
            }}
        </div>
    }
}
