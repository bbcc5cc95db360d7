use serde::{Deserialize, Serialize};

/// Console role resolved by the auth service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    ProxyAdmin,
    ProxyAdminViewer,
    OrgAdmin,
    InternalUser,
    InternalUserViewer,
    /// Any role string this console does not know about
    Other(String),
}

impl UserRole {
    /// Wire code of the role
    pub fn code(&self) -> &str {
        match self {
            UserRole::ProxyAdmin => "proxy_admin",
            UserRole::ProxyAdminViewer => "proxy_admin_viewer",
            UserRole::OrgAdmin => "org_admin",
            UserRole::InternalUser => "internal_user",
            UserRole::InternalUserViewer => "internal_user_viewer",
            UserRole::Other(code) => code,
        }
    }

    /// Human readable name
    pub fn display_name(&self) -> &str {
        match self {
            UserRole::ProxyAdmin => "Admin",
            UserRole::ProxyAdminViewer => "Admin Viewer",
            UserRole::OrgAdmin => "Org Admin",
            UserRole::InternalUser => "Internal User",
            UserRole::InternalUserViewer => "Internal Viewer",
            UserRole::Other(code) => code,
        }
    }

    /// Roles allowed to open admin screens of the console
    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            UserRole::ProxyAdmin | UserRole::ProxyAdminViewer | UserRole::OrgAdmin
        )
    }

    /// Parse a wire code or a display name
    pub fn from_code(code: &str) -> Self {
        match code {
            "proxy_admin" | "Admin" => UserRole::ProxyAdmin,
            "proxy_admin_viewer" | "Admin Viewer" => UserRole::ProxyAdminViewer,
            "org_admin" => UserRole::OrgAdmin,
            "internal_user" => UserRole::InternalUser,
            "internal_user_viewer" => UserRole::InternalUserViewer,
            other => UserRole::Other(other.to_string()),
        }
    }
}

impl From<String> for UserRole {
    fn from(value: String) -> Self {
        UserRole::from_code(&value)
    }
}

impl From<UserRole> for String {
    fn from(value: UserRole) -> Self {
        value.code().to_string()
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Other(String::new())
    }
}
