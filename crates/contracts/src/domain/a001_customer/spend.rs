use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Wire format of the report date bounds
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Usage of one model inside a spend record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSpend {
    #[serde(default, alias = "total_spend")]
    pub spend: f64,
    #[serde(default, alias = "total_requests")]
    pub requests: u64,
    #[serde(default, alias = "total_tokens")]
    pub tokens: u64,
}

/// Aggregated usage of one customer over the report range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendRecord {
    #[serde(rename = "end_user_id", alias = "user_id")]
    pub user_id: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub total_spend: f64,
    #[serde(default)]
    pub total_requests: u64,
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default)]
    pub total_prompt_tokens: u64,
    #[serde(default)]
    pub total_completion_tokens: u64,
    /// Keeps the order in which the backend sent the models
    #[serde(default)]
    pub spend_by_model: IndexMap<String, ModelSpend>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendDateRange {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Response of `GET /customer/spend`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendReport {
    #[serde(rename = "spend_report", default)]
    pub records: Vec<SpendRecord>,
    #[serde(default)]
    pub total_customers: u64,
    #[serde(default)]
    pub date_range: SpendDateRange,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_pages: u32,
}

/// Query of `GET /customer/spend`. Absent bounds are left out of the URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendReportQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl SpendReportQuery {
    pub fn for_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start_date: start.map(|d| d.format(REPORT_DATE_FORMAT).to_string()),
            end_date: end.map(|d| d.format(REPORT_DATE_FORMAT).to_string()),
            page: None,
            page_size: None,
        }
    }

    /// Request one page (1-based) of the report
    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page.max(1));
        self.page_size = Some(page_size);
        self
    }
}

/// One model row of `GET /customer/{id}/spend`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSpendDetail {
    pub model: String,
    #[serde(default)]
    pub total_spend: f64,
    #[serde(default)]
    pub total_requests: u64,
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
}

/// Response of `GET /customer/{id}/spend`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSpendDetail {
    pub end_user_id: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub total_spend: f64,
    #[serde(default)]
    pub total_requests: u64,
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default)]
    pub total_prompt_tokens: u64,
    #[serde(default)]
    pub total_completion_tokens: u64,
    #[serde(default)]
    pub spend_by_model: Vec<ModelSpendDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_from_backend_shape() {
        let report: SpendReport = serde_json::from_value(json!({
            "spend_report": [
                {
                    "end_user_id": "user-1",
                    "alias": "Alice",
                    "total_spend": 150.50,
                    "total_requests": 100,
                    "total_tokens": 5000,
                    "total_prompt_tokens": 3000,
                    "total_completion_tokens": 2000
                },
                {
                    "end_user_id": "user-2",
                    "alias": null,
                    "total_spend": 50.25,
                    "total_requests": 30,
                    "total_tokens": 1500,
                    "total_prompt_tokens": 900,
                    "total_completion_tokens": 600
                }
            ],
            "total_customers": 2,
            "page": 1,
            "page_size": 50,
            "total_pages": 1,
            "date_range": { "start_date": "2024-01-01", "end_date": "2024-01-31" }
        }))
        .unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].user_id, "user-1");
        assert_eq!(report.records[1].alias, None);
        assert!(report.records[1].spend_by_model.is_empty());
        assert_eq!(report.total_customers, 2);
        assert_eq!(report.date_range.start_date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_spend_by_model_keeps_received_order() {
        let record: SpendRecord = serde_json::from_value(json!({
            "user_id": "u1",
            "total_spend": 3.0,
            "spend_by_model": {
                "zeta-model": { "spend": 1.0, "requests": 1, "tokens": 10 },
                "alpha-model": { "spend": 2.0, "requests": 2, "tokens": 20 },
                "mid-model": { "total_spend": 0.5 }
            }
        }))
        .unwrap();

        let models: Vec<&str> = record.spend_by_model.keys().map(String::as_str).collect();
        assert_eq!(models, vec!["zeta-model", "alpha-model", "mid-model"]);
        assert_eq!(record.spend_by_model["mid-model"].spend, 0.5);
        assert_eq!(record.spend_by_model["mid-model"].requests, 0);
    }

    #[test]
    fn test_empty_report() {
        let report: SpendReport = serde_json::from_value(json!({
            "spend_report": [],
            "total_customers": 0,
            "total_pages": 0
        }))
        .unwrap();
        assert!(report.records.is_empty());
        assert_eq!(report.date_range, SpendDateRange::default());
    }

    #[test]
    fn test_query_for_range() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1);
        let end = NaiveDate::from_ymd_opt(2024, 1, 31);
        let query = SpendReportQuery::for_range(start, end);
        assert_eq!(query.start_date.as_deref(), Some("2024-01-01"));
        assert_eq!(query.end_date.as_deref(), Some("2024-01-31"));

        let open = SpendReportQuery::for_range(None, end);
        assert_eq!(open.start_date, None);
        assert_eq!(
            serde_json::to_value(&open).unwrap(),
            json!({ "end_date": "2024-01-31" })
        );
    }

    #[test]
    fn test_query_with_page() {
        let query = SpendReportQuery::for_range(NaiveDate::from_ymd_opt(2024, 1, 1), None)
            .with_page(3, 25);
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({ "start_date": "2024-01-01", "page": 3, "page_size": 25 })
        );
        assert_eq!(SpendReportQuery::default().with_page(0, 50).page, Some(1));
    }

    #[test]
    fn test_detail_without_spend() {
        let detail: CustomerSpendDetail = serde_json::from_value(json!({
            "end_user_id": "user-new",
            "alias": "New User",
            "total_spend": 0.0,
            "total_requests": 0,
            "total_tokens": 0,
            "spend_by_model": []
        }))
        .unwrap();
        assert_eq!(detail.total_spend, 0.0);
        assert!(detail.spend_by_model.is_empty());
        assert_eq!(detail.total_prompt_tokens, 0);
    }
}
