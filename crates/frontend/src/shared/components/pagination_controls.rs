use crate::shared::icons::icon;
use leptos::prelude::*;

pub const DEFAULT_PAGE_SIZE_OPTIONS: [u32; 4] = [25, 50, 100, 200];

/// "3 / 7 (312)"; a report with no pages still reads as page 1 of 1
pub fn page_label(page: u32, total_pages: u32, total_count: u64) -> String {
    format!("{} / {} ({})", page.max(1), total_pages.max(1), total_count)
}

pub fn has_previous(page: u32) -> bool {
    page > 1
}

pub fn has_next(page: u32, total_pages: u32) -> bool {
    page < total_pages
}

/// First/previous/next/last buttons plus a page size selector.
/// Pages are 1-based, as the gateway counts them.
#[component]
pub fn PaginationControls(
    #[prop(into)]
    current_page: Signal<u32>,

    #[prop(into)]
    total_pages: Signal<u32>,

    /// Total count of items across all pages
    #[prop(into)]
    total_count: Signal<u64>,

    #[prop(into)]
    page_size: Signal<u32>,

    on_page_change: Callback<u32>,

    on_page_size_change: Callback<u32>,

    #[prop(optional)]
    page_size_options: Option<Vec<u32>>,

    #[prop(into, optional)]
    disabled: Signal<bool>,
) -> impl IntoView {
    let page_size_opts = page_size_options.unwrap_or_else(|| DEFAULT_PAGE_SIZE_OPTIONS.to_vec());

    let no_previous = move || disabled.get() || !has_previous(current_page.get());
    let no_next = move || disabled.get() || !has_next(current_page.get(), total_pages.get());

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=no_previous
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get_untracked();
                    if has_previous(page) {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=no_previous
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || page_label(current_page.get(), total_pages.get(), total_count.get())}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get_untracked();
                    if has_next(page, total_pages.get_untracked()) {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=no_next
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let total = total_pages.get_untracked();
                    if total > 0 {
                        on_page_change.run(total);
                    }
                }
                disabled=no_next
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_opts
                    .into_iter()
                    .map(|size| {
                        view! {
                            <option value=size.to_string() selected=move || page_size.get() == size>
                                {size.to_string()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_label() {
        assert_eq!(page_label(3, 7, 312), "3 / 7 (312)");
        assert_eq!(page_label(1, 0, 0), "1 / 1 (0)");
    }

    #[test]
    fn test_navigation_bounds() {
        assert!(!has_previous(1));
        assert!(has_previous(2));
        assert!(has_next(1, 2));
        assert!(!has_next(2, 2));
        assert!(!has_next(1, 0));
    }
}
