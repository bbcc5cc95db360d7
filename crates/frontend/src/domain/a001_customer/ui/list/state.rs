use contracts::domain::a001_customer::Customer;

use crate::shared::components::table::format_usd_opt;
use crate::shared::export::CsvExportable;

/// Customers whose id or alias contains `search` (case-insensitive).
/// An empty search keeps every customer; input order is preserved.
/// Whitespace is part of the search text.
pub fn filter_customers(customers: &[Customer], search: &str) -> Vec<Customer> {
    if search.is_empty() {
        return customers.to_vec();
    }
    let needle = search.to_lowercase();
    customers
        .iter()
        .filter(|c| c.matches_lowercase(&needle))
        .cloned()
        .collect()
}

/// "3 customers" or "1 customer (filtered from 5)"
pub fn count_label(shown: usize, total: usize) -> String {
    let noun = if shown == 1 { "customer" } else { "customers" };
    if shown == total {
        format!("{} {}", shown, noun)
    } else {
        format!("{} {} (filtered from {})", shown, noun, total)
    }
}

/// Optional text cell; absent values show a dash
pub fn text_or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or("-")
        .to_string()
}

impl CsvExportable for Customer {
    fn headers() -> Vec<&'static str> {
        vec![
            "Customer ID",
            "Alias",
            "Spend (USD)",
            "Max Budget (USD)",
            "Status",
            "Allowed Region",
            "Default Model",
            "Budget ID",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.user_id.clone(),
            text_or_dash(self.alias.as_deref()),
            format!("{:.2}", self.spend),
            self.max_budget()
                .map(|b| format!("{:.2}", b))
                .unwrap_or_else(|| "-".to_string()),
            self.status().label().to_string(),
            text_or_dash(self.allowed_model_region.as_deref()),
            text_or_dash(self.default_model.as_deref()),
            text_or_dash(self.budget_id.as_deref()),
        ]
    }
}

/// Display text of the "Max Budget" column
pub fn max_budget_label(customer: &Customer) -> String {
    format_usd_opt(customer.max_budget())
}
