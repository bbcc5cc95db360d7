use contracts::enums::UserRole;
use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    pub fn role(&self) -> Option<&UserRole> {
        self.user_info.as_ref().map(|u| &u.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role().map(UserRole::is_admin).unwrap_or(false)
    }

    /// Token to call admin endpoints with; `None` unless signed in with an admin role
    pub fn admin_access_token(&self) -> Option<&str> {
        if self.is_admin() {
            self.access_token.as_deref()
        } else {
            None
        }
    }
}

/// Restore the session saved in localStorage: validate the access token, or
/// fall back to the refresh token once.
async fn restore_session() -> Option<AuthState> {
    let access_token = storage::get_access_token()?;

    match api::get_current_user(&access_token).await {
        Ok(user_info) => {
            return Some(AuthState {
                access_token: Some(access_token),
                user_info: Some(user_info),
            });
        }
        Err(e) => log::info!("Stored access token rejected: {}", e),
    }

    let Some(refresh_token) = storage::get_refresh_token() else {
        storage::clear_tokens();
        return None;
    };

    let refreshed = match api::refresh_token(refresh_token).await {
        Ok(response) => response,
        Err(e) => {
            log::warn!("Token refresh failed: {}", e);
            storage::clear_tokens();
            return None;
        }
    };
    storage::save_access_token(&refreshed.access_token);

    match api::get_current_user(&refreshed.access_token).await {
        Ok(user_info) => Some(AuthState {
            access_token: Some(refreshed.access_token),
            user_info: Some(user_info),
        }),
        Err(e) => {
            log::error!("Failed to load current user after refresh: {}", e);
            None
        }
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());

    Effect::new(move |_| {
        spawn_local(async move {
            if let Some(restored) = restore_session().await {
                set_auth_state.set(restored);
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Revoke the session and clear local state
pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    if let Some(refresh_token) = storage::get_refresh_token() {
        if let Err(e) = api::logout(refresh_token).await {
            log::warn!("Logout request failed: {}", e);
        }
    }

    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in(role: UserRole) -> AuthState {
        AuthState {
            access_token: Some("sk-test".to_string()),
            user_info: Some(UserInfo {
                id: "u-1".to_string(),
                username: "ops".to_string(),
                full_name: None,
                email: None,
                role,
            }),
        }
    }

    #[test]
    fn test_admin_token_for_admin_roles() {
        assert_eq!(
            signed_in(UserRole::ProxyAdmin).admin_access_token(),
            Some("sk-test")
        );
        assert_eq!(
            signed_in(UserRole::ProxyAdminViewer).admin_access_token(),
            Some("sk-test")
        );
    }

    #[test]
    fn test_no_admin_token_for_other_roles() {
        assert_eq!(signed_in(UserRole::InternalUser).admin_access_token(), None);
        assert!(!signed_in(UserRole::InternalUserViewer).is_admin());
        assert_eq!(AuthState::default().admin_access_token(), None);
    }

    #[test]
    fn test_admin_without_token() {
        let mut state = signed_in(UserRole::ProxyAdmin);
        state.access_token = None;
        assert!(state.is_admin());
        assert_eq!(state.admin_access_token(), None);
    }
}
