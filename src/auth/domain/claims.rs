//! Identity claims carried by an authenticated publish request.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Mechanism through which the publisher proved their identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthMethod {
    /// GitHub access token exchange.
    #[serde(rename = "github-at")]
    GitHubAccessToken,
    /// GitHub Actions OIDC token exchange.
    #[serde(rename = "github-oidc")]
    GitHubOidc,
    /// DNS TXT record proof of domain ownership.
    #[serde(rename = "dns")]
    Dns,
    /// HTTP well-known file proof of domain ownership.
    #[serde(rename = "http")]
    Http,
    /// Anonymous token, used by development registries.
    #[serde(rename = "none")]
    None,
}

impl AuthMethod {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GitHubAccessToken => "github-at",
            Self::GitHubOidc => "github-oidc",
            Self::Dns => "dns",
            Self::Http => "http",
            Self::None => "none",
        }
    }
}

impl TryFrom<&str> for AuthMethod {
    type Error = ParseAuthMethodError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "github-at" => Ok(Self::GitHubAccessToken),
            "github-oidc" => Ok(Self::GitHubOidc),
            "dns" => Ok(Self::Dns),
            "http" => Ok(Self::Http),
            "none" => Ok(Self::None),
            _ => Err(ParseAuthMethodError(value.to_owned())),
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Error returned while parsing an authentication method.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown authentication method: {0}")]
pub struct ParseAuthMethodError(pub String);

/// Operation a permission grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionAction {
    /// Publish new server versions.
    Publish,
    /// Edit metadata of already published versions.
    Edit,
}

impl PermissionAction {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Edit => "edit",
        }
    }
}

impl fmt::Display for PermissionAction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A single grant: an action over the server names a pattern covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    /// Granted action.
    pub action: PermissionAction,
    /// Resource pattern, either `*` or `<namespace>/*`.
    #[serde(rename = "resource")]
    pub resource_pattern: String,
}

impl Permission {
    /// Creates a permission grant.
    #[must_use]
    pub fn new(action: PermissionAction, resource_pattern: impl Into<String>) -> Self {
        Self {
            action,
            resource_pattern: resource_pattern.into(),
        }
    }

    /// Creates a `publish` grant for the given pattern.
    #[must_use]
    pub fn publish(resource_pattern: impl Into<String>) -> Self {
        Self::new(PermissionAction::Publish, resource_pattern)
    }
}

/// Claims describing an authenticated publisher for the duration of one
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// How the identity was established.
    pub auth_method: AuthMethod,
    /// Subject within the authentication method, such as a GitHub login.
    #[serde(rename = "auth_method_sub", default)]
    pub auth_method_subject: String,
    /// Granted permissions.
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl IdentityClaims {
    /// Creates claims without any permissions.
    #[must_use]
    pub fn new(auth_method: AuthMethod, auth_method_subject: impl Into<String>) -> Self {
        Self {
            auth_method,
            auth_method_subject: auth_method_subject.into(),
            permissions: Vec::new(),
        }
    }

    /// Adds a permission grant.
    #[must_use]
    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permissions.push(permission);
        self
    }
}
