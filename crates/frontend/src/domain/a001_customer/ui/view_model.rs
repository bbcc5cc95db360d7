//! ViewModel of the customers screen
//!
//! Owns the customer list, the loading flag and the refresh timestamp.
//! Panels get read-only signals and callbacks from here.

use contracts::domain::a001_customer::Customer;
use contracts::enums::UserRole;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::state::{create_state, CustomersState, LoadOutcome};
use crate::domain::a001_customer::api;
use crate::shared::date_utils::now_refreshed_label;
use crate::system::auth::context::AuthState;

#[derive(Clone, Copy)]
pub struct CustomersVm {
    pub state: RwSignal<CustomersState>,
    auth: ReadSignal<AuthState>,
}

impl CustomersVm {
    pub fn new(auth: ReadSignal<AuthState>) -> Self {
        Self {
            state: create_state(),
            auth,
        }
    }

    pub fn customers(&self) -> Signal<Vec<Customer>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.customers.clone()))
    }

    pub fn loading(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.loading))
    }

    pub fn generation(&self) -> Signal<u64> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.generation))
    }

    pub fn last_refreshed(&self) -> Signal<Option<String>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.last_refreshed.clone()))
    }

    /// Admin token handed down to panels that fetch on their own.
    /// Notifies only when the token itself changes.
    pub fn access_token(&self) -> Memo<Option<String>> {
        let auth = self.auth;
        Memo::new(move |_| auth.with(|a| a.admin_access_token().map(str::to_string)))
    }

    /// Token and role; a change of either re-triggers the load
    pub fn access_key(&self) -> Memo<(Option<String>, Option<UserRole>)> {
        let auth = self.auth;
        Memo::new(move |_| auth.with(|a| (a.access_token.clone(), a.role().cloned())))
    }

    /// Fetch the customer list. No request is made without an admin session.
    pub fn load(&self) {
        let auth = self.auth.get_untracked();
        let state = self.state;

        let Some((ticket, token)) = state.try_update(|s| s.begin_load(&auth)).flatten() else {
            log::debug!("Customers not loaded: no admin session");
            return;
        };

        spawn_local(async move {
            let result = api::fetch_customers(&token).await;
            let outcome =
                state.try_update(|s| s.finish_load(ticket, result, now_refreshed_label()));

            match outcome {
                Some(LoadOutcome::Applied) => {
                    let count = state.with_untracked(|s| s.customers.len());
                    log::info!("Loaded {} customers", count);
                }
                Some(LoadOutcome::Failed(e)) => {
                    log::error!("Failed to load customers: {}", e);
                }
                Some(LoadOutcome::Stale) => {
                    log::debug!("Dropped customer list response #{}: superseded", ticket);
                }
                // page was unmounted before the response arrived
                None => {}
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_customer::ui::state::tests::auth_with;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_access_token_ignores_unrelated_auth_writes() {
        let owner = Owner::new();
        owner.set();

        let (auth, set_auth) = signal(auth_with(UserRole::ProxyAdmin));
        let vm = CustomersVm::new(auth);
        let token = vm.access_token();

        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let downstream = Memo::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            token.get()
        });

        assert_eq!(downstream.get().as_deref(), Some("sk-admin"));
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        // same token, different display name
        set_auth.update(|a| {
            if let Some(user) = a.user_info.as_mut() {
                user.full_name = Some("Ops Team".to_string());
            }
        });
        assert_eq!(downstream.get().as_deref(), Some("sk-admin"));
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        set_auth.update(|a| a.access_token = Some("sk-rotated".to_string()));
        assert_eq!(downstream.get().as_deref(), Some("sk-rotated"));
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }
}
