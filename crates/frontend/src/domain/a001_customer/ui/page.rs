use leptos::prelude::*;

use super::list::CustomersListPanel;
use super::spend::CustomerSpendPanel;
use super::tabs::CustomersTabs;
use super::view_model::CustomersVm;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::RequireAdmin;

/// Customer billing screen. Non-admin sessions see the access-denied notice
/// and nothing is fetched.
#[component]
pub fn CustomersPage() -> impl IntoView {
    view! {
        <PageFrame page_id="a001_customer--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <h1 class="page__title">"Customers"</h1>
            </div>
            <div class="page__content">
                <RequireAdmin>
                    <CustomersController />
                </RequireAdmin>
            </div>
        </PageFrame>
    }
}

#[component]
fn CustomersController() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let vm = CustomersVm::new(auth_state);

    // mount, token change and role change all refetch
    let access_key = vm.access_key();
    Effect::new(move |_| {
        access_key.track();
        vm.load();
    });

    let customers = vm.customers();
    let loading = vm.loading();
    let generation = vm.generation();
    let access_token = vm.access_token();

    view! {
        <CustomersTabs
            list=move || view! { <CustomersListPanel customers=customers generation=generation loading=loading /> }.into_any()
            spend=move || view! { <CustomerSpendPanel access_token=access_token /> }.into_any()
            last_refreshed=vm.last_refreshed()
            refreshing=loading
            on_refresh=Callback::new(move |_| vm.load())
        />
    }
}
