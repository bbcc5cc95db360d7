//! Customer management endpoints of the gateway

use contracts::domain::a001_customer::{Customer, CustomerSpendDetail, SpendReport, SpendReportQuery};

use crate::shared::api_utils::{get_json, ApiError};

const CUSTOMER_LIST_PATH: &str = "/customer/list";
const CUSTOMER_SPEND_PATH: &str = "/customer/spend";

/// Path of the spend report; absent bounds are not sent at all
pub fn spend_report_path(query: &SpendReportQuery) -> Result<String, ApiError> {
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Serialize(e.to_string()))?;
    if qs.is_empty() {
        Ok(CUSTOMER_SPEND_PATH.to_string())
    } else {
        Ok(format!("{}?{}", CUSTOMER_SPEND_PATH, qs))
    }
}

pub fn customer_spend_path(end_user_id: &str) -> String {
    format!("/customer/{}/spend", urlencoding::encode(end_user_id))
}

/// All customers (GetAllEndUsers)
pub async fn fetch_customers(access_token: &str) -> Result<Vec<Customer>, ApiError> {
    get_json(CUSTOMER_LIST_PATH, access_token).await
}

/// Aggregated spend per customer for a date range (GetCustomerSpendReport)
pub async fn fetch_spend_report(
    access_token: &str,
    query: &SpendReportQuery,
) -> Result<SpendReport, ApiError> {
    let path = spend_report_path(query)?;
    get_json(&path, access_token).await
}

/// Spend of one customer broken down by model
pub async fn fetch_customer_spend_detail(
    access_token: &str,
    end_user_id: &str,
) -> Result<CustomerSpendDetail, ApiError> {
    get_json(&customer_spend_path(end_user_id), access_token).await
}
