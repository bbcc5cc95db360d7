use leptos::prelude::*;

/// Totals row for report tables
///
/// Renders a `<tr>` with the `.table__totals-row` class around the given cells.
///
/// # Example
/// ```ignore
/// <TableTotalsRow>
///     <td>"Total"</td>
///     <td class="table__cell--right">{format_usd(totals.total_spend)}</td>
/// </TableTotalsRow>
/// ```
#[component]
pub fn TableTotalsRow(
    children: Children,
    #[prop(optional)]
    class: &'static str,
) -> impl IntoView {
    let row_class = if class.is_empty() {
        "table__totals-row".to_string()
    } else {
        format!("table__totals-row {}", class)
    };

    view! {
        <tr class={row_class}>
            {children()}
        </tr>
    }
}
