//! Customers (end users) of the gateway and their spend reports

pub mod aggregate;
pub mod spend;

pub use aggregate::{BudgetTable, Customer, CustomerStatus};
pub use spend::{
    CustomerSpendDetail, ModelSpend, ModelSpendDetail, SpendDateRange, SpendRecord, SpendReport,
    SpendReportQuery,
};
