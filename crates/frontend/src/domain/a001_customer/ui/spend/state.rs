use std::collections::HashSet;

use chrono::NaiveDate;
use contracts::domain::a001_customer::{SpendRecord, SpendReport, SpendReportQuery};
use leptos::prelude::*;

use crate::domain::a001_customer::ui::state::LoadOutcome;
use crate::shared::api_utils::ApiError;
use crate::shared::components::pagination_controls::DEFAULT_PAGE_SIZE_OPTIONS;
use crate::shared::date_utils::default_spend_range;
use crate::shared::request_sequence::RequestSequence;

/// Sums over the loaded records, shown in the stat cards and the totals row
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpendTotals {
    pub total_spend: f64,
    pub total_requests: u64,
    pub total_tokens: u64,
}

impl SpendTotals {
    /// Sums record-level totals. `spend_by_model` is not looked at.
    pub fn from_records(records: &[SpendRecord]) -> Self {
        records.iter().fold(Self::default(), |acc, r| Self {
            total_spend: acc.total_spend + r.total_spend,
            total_requests: acc.total_requests + r.total_requests,
            total_tokens: acc.total_tokens + r.total_tokens,
        })
    }
}

pub const DEFAULT_SPEND_PAGE_SIZE: u32 = DEFAULT_PAGE_SIZE_OPTIONS[1];

#[derive(Clone, Debug)]
pub struct SpendPanelState {
    pub report: SpendReport,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// 1-based page requested from the gateway
    pub page: u32,
    pub page_size: u32,
    /// Expanded rows by `user_id`; survives refetches
    pub expanded: HashSet<String>,
    pub loading: bool,
    /// Bumped on every applied load; part of the table row keys
    pub generation: u64,
    requests: RequestSequence,
}

impl SpendPanelState {
    pub fn new(today: NaiveDate) -> Self {
        let (from, to) = default_spend_range(today);
        Self {
            report: SpendReport::default(),
            date_from: Some(from),
            date_to: Some(to),
            page: 1,
            page_size: DEFAULT_SPEND_PAGE_SIZE,
            expanded: HashSet::new(),
            loading: false,
            generation: 0,
            requests: RequestSequence::default(),
        }
    }

    pub fn set_range(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        self.date_from = from;
        self.date_to = to;
    }

    /// "Apply Filter" starts over from the first page
    pub fn apply_filter(&mut self) {
        self.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Pages reported by the last applied load, at least one
    pub fn total_pages(&self) -> u32 {
        self.report.total_pages.max(1)
    }

    /// Query for the current range and page; absent bounds stay absent
    pub fn query(&self) -> SpendReportQuery {
        SpendReportQuery::for_range(self.date_from, self.date_to)
            .with_page(self.page, self.page_size)
    }

    /// Start a fetch for the current range. `None` without a token.
    pub fn begin_load(&mut self, access_token: Option<&str>) -> Option<(u64, String, SpendReportQuery)> {
        let token = access_token?.to_string();
        self.loading = true;
        Some((self.requests.issue(), token, self.query()))
    }

    /// Apply a finished fetch. Stale tickets are ignored; a failure keeps the
    /// report that was on screen.
    pub fn finish_load(&mut self, ticket: u64, result: Result<SpendReport, ApiError>) -> LoadOutcome {
        if !self.requests.is_latest(ticket) {
            return LoadOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(report) => {
                self.report = report;
                self.generation += 1;
                LoadOutcome::Applied
            }
            Err(e) => LoadOutcome::Failed(e),
        }
    }

    pub fn toggle_expanded(&mut self, user_id: &str) {
        if !self.expanded.remove(user_id) {
            self.expanded.insert(user_id.to_string());
        }
    }

    pub fn is_expanded(&self, user_id: &str) -> bool {
        self.expanded.contains(user_id)
    }

    pub fn totals(&self) -> SpendTotals {
        SpendTotals::from_records(&self.report.records)
    }
}

pub fn create_state(today: NaiveDate) -> RwSignal<SpendPanelState> {
    RwSignal::new(SpendPanelState::new(today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_customer::ui::state::row_key;
    use crate::shared::components::table::{format_count, format_usd};
    use indexmap::IndexMap;

    fn record(id: &str, spend: f64, requests: u64, tokens: u64) -> SpendRecord {
        SpendRecord {
            user_id: id.to_string(),
            alias: None,
            total_spend: spend,
            total_requests: requests,
            total_tokens: tokens,
            total_prompt_tokens: 0,
            total_completion_tokens: 0,
            spend_by_model: IndexMap::new(),
        }
    }

    fn report(records: Vec<SpendRecord>) -> SpendReport {
        SpendReport {
            total_customers: records.len() as u64,
            records,
            ..SpendReport::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_totals_sum_record_fields() {
        let totals = SpendTotals::from_records(&[
            record("u1", 12.5, 3, 100),
            record("u2", 7.5, 1, 50),
        ]);
        assert_eq!(format_usd(totals.total_spend), "$20.00");
        assert_eq!(totals.total_requests, 4);
        assert_eq!(totals.total_tokens, 150);
        assert_eq!(format_count(totals.total_tokens), "150");
    }

    #[test]
    fn test_totals_of_empty_report_are_zero() {
        assert_eq!(SpendTotals::from_records(&[]), SpendTotals::default());
        assert_eq!(SpendPanelState::new(today()).totals(), SpendTotals::default());
    }

    #[test]
    fn test_totals_ignore_model_breakdown() {
        let mut r = record("u1", 5.0, 2, 10);
        r.spend_by_model.insert(
            "gpt-4".to_string(),
            contracts::domain::a001_customer::ModelSpend {
                spend: 100.0,
                requests: 50,
                tokens: 9000,
            },
        );
        let totals = SpendTotals::from_records(&[r]);
        assert_eq!(totals.total_spend, 5.0);
        assert_eq!(totals.total_requests, 2);
    }

    #[test]
    fn test_default_range_is_last_30_days() {
        let state = SpendPanelState::new(today());
        assert_eq!(state.date_from, NaiveDate::from_ymd_opt(2024, 2, 14));
        assert_eq!(state.date_to, Some(today()));
        let query = state.query();
        assert_eq!(query.start_date.as_deref(), Some("2024-02-14"));
        assert_eq!(query.end_date.as_deref(), Some("2024-03-15"));
    }

    #[test]
    fn test_cleared_bounds_stay_absent() {
        let mut state = SpendPanelState::new(today());
        state.set_range(None, NaiveDate::from_ymd_opt(2024, 1, 31));
        let (_, _, query) = state.begin_load(Some("sk-admin")).unwrap();
        assert_eq!(query.start_date, None);
        assert_eq!(query.end_date.as_deref(), Some("2024-01-31"));
    }

    #[test]
    fn test_no_token_no_request() {
        let mut state = SpendPanelState::new(today());
        assert!(state.begin_load(None).is_none());
        assert!(!state.loading);
    }

    #[test]
    fn test_toggle_twice_restores_set() {
        let mut state = SpendPanelState::new(today());
        state.toggle_expanded("u2");
        let before = state.expanded.clone();

        state.toggle_expanded("u1");
        assert!(state.is_expanded("u1"));
        assert!(state.is_expanded("u2"));
        state.toggle_expanded("u1");

        assert_eq!(state.expanded, before);
    }

    #[test]
    fn test_expansion_survives_refetch() {
        let mut state = SpendPanelState::new(today());
        state.toggle_expanded("u1");
        state.toggle_expanded("gone");

        let (ticket, _, _) = state.begin_load(Some("sk-admin")).unwrap();
        state.finish_load(ticket, Ok(report(vec![record("u1", 1.0, 1, 1)])));

        assert!(state.is_expanded("u1"));
        assert!(state.is_expanded("gone"));
    }

    #[test]
    fn test_failed_fetch_keeps_report() {
        let mut state = SpendPanelState::new(today());
        let (first, _, _) = state.begin_load(Some("sk-admin")).unwrap();
        state.finish_load(first, Ok(report(vec![record("u1", 1.0, 1, 1)])));

        let (second, _, _) = state.begin_load(Some("sk-admin")).unwrap();
        let outcome = state.finish_load(second, Err(ApiError::Status(500)));

        assert_eq!(outcome, LoadOutcome::Failed(ApiError::Status(500)));
        assert!(!state.loading);
        assert_eq!(state.report.records.len(), 1);
    }

    #[test]
    fn test_latest_response_wins() {
        let mut state = SpendPanelState::new(today());
        let (older, _, _) = state.begin_load(Some("sk-admin")).unwrap();
        let (newer, _, _) = state.begin_load(Some("sk-admin")).unwrap();

        assert_eq!(
            state.finish_load(newer, Ok(report(vec![record("new", 2.0, 1, 1)]))),
            LoadOutcome::Applied
        );
        assert_eq!(
            state.finish_load(older, Ok(report(vec![record("old", 9.0, 1, 1)]))),
            LoadOutcome::Stale
        );
        assert_eq!(state.report.records[0].user_id, "new");
    }

    #[test]
    fn test_query_carries_page() {
        let mut state = SpendPanelState::new(today());
        state.set_page(3);
        let (_, _, query) = state.begin_load(Some("sk-admin")).unwrap();
        assert_eq!(query.page, Some(3));
        assert_eq!(query.page_size, Some(DEFAULT_SPEND_PAGE_SIZE));
        assert_eq!(
            crate::domain::a001_customer::api::spend_report_path(&query).unwrap(),
            "/customer/spend?start_date=2024-02-14&end_date=2024-03-15&page=3&page_size=50"
        );
    }

    #[test]
    fn test_apply_filter_returns_to_first_page() {
        let mut state = SpendPanelState::new(today());
        state.set_page(4);
        state.set_range(NaiveDate::from_ymd_opt(2024, 1, 1), NaiveDate::from_ymd_opt(2024, 1, 31));
        state.apply_filter();

        let query = state.query();
        assert_eq!(query.page, Some(1));
        assert_eq!(query.start_date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut state = SpendPanelState::new(today());
        state.set_page(2);
        state.set_page_size(100);
        assert_eq!(state.page, 1);
        assert_eq!(state.query().page_size, Some(100));
    }

    #[test]
    fn test_total_pages_from_report() {
        let mut state = SpendPanelState::new(today());
        assert_eq!(state.total_pages(), 1);

        let (ticket, _, _) = state.begin_load(Some("sk-admin")).unwrap();
        state.finish_load(
            ticket,
            Ok(SpendReport {
                total_pages: 7,
                ..report(vec![record("u1", 1.0, 1, 1)])
            }),
        );
        assert_eq!(state.total_pages(), 7);
    }

    #[test]
    fn test_refetch_changes_row_keys() {
        let mut state = SpendPanelState::new(today());
        let (first, _, _) = state.begin_load(Some("sk-admin")).unwrap();
        state.finish_load(first, Ok(report(vec![record("u1", 12.5, 3, 100)])));
        let before = row_key(state.generation, "u1");

        let (second, _, _) = state.begin_load(Some("sk-admin")).unwrap();
        state.finish_load(second, Ok(report(vec![record("u1", 3.0, 1, 10)])));

        assert_ne!(row_key(state.generation, "u1"), before);
        assert_eq!(format_usd(state.totals().total_spend), "$3.00");
    }
}
