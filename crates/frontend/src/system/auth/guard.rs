use leptos::prelude::*;

use super::context::{use_auth, AuthState};

pub const ACCESS_DENIED_MESSAGE: &str =
    "Access denied. Ask your proxy admin for access to customer billing.";

/// Notice shown instead of an admin screen, or `None` when the session may see it
pub fn access_denied(auth: &AuthState) -> Option<&'static str> {
    match auth.admin_access_token() {
        Some(_) => None,
        None => Some(ACCESS_DENIED_MESSAGE),
    }
}

/// Renders children only for a signed-in admin role.
/// The check is reactive and runs again whenever the auth state changes.
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| access_denied(s).is_none())
            fallback=move || {
                let message = auth_state.with(access_denied).unwrap_or(ACCESS_DENIED_MESSAGE);
                view! { <div class="alert alert--warning">{message}</div> }
            }
        >
            {children()}
        </Show>
    }
}
