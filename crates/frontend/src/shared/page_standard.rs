//! Page category constants.
//!
//! Every page declares an HTML `id` in the format `{entity}--{category}`
//! (e.g. `"a001_customer--list"`) and a `data-page-category` with one of the
//! constants below, so a DOM id copied from the inspector leads straight to
//! the `domain/a001_customer/` directory.

/// List of records — table with filters.
pub const PAGE_CAT_LIST: &str = "list";

/// Analytical dashboard / report view.
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// System page (login, access errors).
pub const PAGE_CAT_SYSTEM: &str = "system";

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && !category.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids() {
        assert!(is_valid_page_id("a001_customer--list"));
        assert!(!is_valid_page_id("a001_customer"));
        assert!(!is_valid_page_id("--list"));
    }
}
