use contracts::domain::a001_customer::Customer;
use leptos::prelude::*;

use crate::shared::api_utils::ApiError;
use crate::shared::request_sequence::RequestSequence;
use crate::system::auth::context::AuthState;

/// Result of applying a finished request to a view state
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Applied,
    /// Latest request failed; previous data kept
    Failed(ApiError),
    /// A newer request was issued meanwhile; response dropped
    Stale,
}

/// Customer list owned by the page controller
#[derive(Clone, Debug, Default)]
pub struct CustomersState {
    pub customers: Vec<Customer>,
    pub loading: bool,
    pub last_refreshed: Option<String>,
    /// Bumped on every applied load; part of the table row keys
    pub generation: u64,
    requests: RequestSequence,
}

impl CustomersState {
    /// Start a load. Returns the ticket and the token to call with, or `None`
    /// when the session is not an admin one, in which case nothing is fetched.
    pub fn begin_load(&mut self, auth: &AuthState) -> Option<(u64, String)> {
        let token = auth.admin_access_token()?.to_string();
        self.loading = true;
        Some((self.requests.issue(), token))
    }

    /// Apply a finished load. Only the latest ticket touches the state; a
    /// failure keeps the previously loaded customers.
    pub fn finish_load(
        &mut self,
        ticket: u64,
        result: Result<Vec<Customer>, ApiError>,
        refreshed_at: String,
    ) -> LoadOutcome {
        if !self.requests.is_latest(ticket) {
            return LoadOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(customers) => {
                self.customers = customers;
                self.last_refreshed = Some(refreshed_at);
                self.generation += 1;
                LoadOutcome::Applied
            }
            Err(e) => LoadOutcome::Failed(e),
        }
    }
}

/// Key of a table row. Rows of an earlier load never share a key with the
/// current one, so `<For>` rebuilds them with fresh values.
pub fn row_key(generation: u64, user_id: &str) -> (u64, String) {
    (generation, user_id.to_string())
}

pub fn create_state() -> RwSignal<CustomersState> {
    RwSignal::new(CustomersState::default())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use contracts::enums::UserRole;
    use contracts::system::auth::UserInfo;

    pub(crate) fn customer(id: &str, alias: Option<&str>, spend: f64, blocked: bool) -> Customer {
        Customer {
            user_id: id.to_string(),
            alias: alias.map(str::to_string),
            spend,
            blocked,
            allowed_model_region: None,
            default_model: None,
            budget_id: None,
            budget: None,
        }
    }

    pub(crate) fn auth_with(role: UserRole) -> AuthState {
        AuthState {
            access_token: Some("sk-admin".to_string()),
            user_info: Some(UserInfo {
                id: "admin-1".to_string(),
                username: "admin".to_string(),
                full_name: None,
                email: None,
                role,
            }),
        }
    }

    #[test]
    fn test_non_admin_does_not_start_a_request() {
        let mut state = CustomersState::default();
        assert_eq!(state.begin_load(&auth_with(UserRole::InternalUser)), None);
        assert_eq!(state.begin_load(&AuthState::default()), None);
        assert!(!state.loading);
    }

    #[test]
    fn test_successful_load() {
        let mut state = CustomersState::default();
        let (ticket, token) = state.begin_load(&auth_with(UserRole::ProxyAdmin)).unwrap();
        assert_eq!(token, "sk-admin");
        assert!(state.loading);

        let outcome = state.finish_load(
            ticket,
            Ok(vec![customer("u1", Some("Ann"), 10.0, false)]),
            "2024-03-15 14:02:26".to_string(),
        );

        assert_eq!(outcome, LoadOutcome::Applied);
        assert!(!state.loading);
        assert_eq!(state.customers.len(), 1);
        assert_eq!(state.last_refreshed.as_deref(), Some("2024-03-15 14:02:26"));
    }

    #[test]
    fn test_failed_load_keeps_previous_customers() {
        let mut state = CustomersState::default();
        let auth = auth_with(UserRole::ProxyAdmin);

        let (first, _) = state.begin_load(&auth).unwrap();
        state.finish_load(first, Ok(vec![customer("u1", None, 1.0, false)]), "t1".to_string());

        let (second, _) = state.begin_load(&auth).unwrap();
        let outcome = state.finish_load(
            second,
            Err(ApiError::Network("offline".to_string())),
            "t2".to_string(),
        );

        assert_eq!(outcome, LoadOutcome::Failed(ApiError::Network("offline".to_string())));
        assert_eq!(state.generation, 1);
        assert!(!state.loading);
        assert_eq!(state.customers, vec![customer("u1", None, 1.0, false)]);
        assert_eq!(state.last_refreshed.as_deref(), Some("t1"));
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut state = CustomersState::default();
        let auth = auth_with(UserRole::ProxyAdminViewer);

        let (older, _) = state.begin_load(&auth).unwrap();
        let (newer, _) = state.begin_load(&auth).unwrap();

        let applied = state.finish_load(newer, Ok(vec![customer("fresh", None, 0.0, false)]), "t2".to_string());
        let stale = state.finish_load(older, Ok(vec![customer("old", None, 0.0, false)]), "t1".to_string());

        assert_eq!(applied, LoadOutcome::Applied);
        assert_eq!(stale, LoadOutcome::Stale);
        assert_eq!(state.customers[0].user_id, "fresh");
        assert_eq!(state.last_refreshed.as_deref(), Some("t2"));
    }

    #[test]
    fn test_stale_response_does_not_clear_loading() {
        let mut state = CustomersState::default();
        let auth = auth_with(UserRole::ProxyAdmin);

        let (older, _) = state.begin_load(&auth).unwrap();
        let _newer = state.begin_load(&auth).unwrap();

        state.finish_load(older, Ok(Vec::new()), "t1".to_string());
        assert!(state.loading);
    }

    #[test]
    fn test_refetch_changes_row_keys() {
        let mut state = CustomersState::default();
        let auth = auth_with(UserRole::ProxyAdmin);

        let (first, _) = state.begin_load(&auth).unwrap();
        state.finish_load(first, Ok(vec![customer("u1", None, 1.0, false)]), "t1".to_string());
        let before = row_key(state.generation, "u1");

        let (second, _) = state.begin_load(&auth).unwrap();
        state.finish_load(second, Ok(vec![customer("u1", None, 9.0, true)]), "t2".to_string());
        let after = row_key(state.generation, "u1");

        assert_ne!(before, after);
        assert_eq!(after, row_key(2, "u1"));
    }

    #[test]
    fn test_stale_response_keeps_generation() {
        let mut state = CustomersState::default();
        let auth = auth_with(UserRole::ProxyAdmin);

        let (older, _) = state.begin_load(&auth).unwrap();
        let _newer = state.begin_load(&auth).unwrap();
        state.finish_load(older, Ok(Vec::new()), "t1".to_string());

        assert_eq!(state.generation, 0);
    }
}
