//! Resource-pattern matching and the authorization decision.

use super::{IdentityClaims, PermissionAction};
use std::fmt;

const NAMESPACE_WILDCARD_SUFFIX: &str = "/*";

/// Parsed form of a permission's resource pattern.
///
/// Only two shapes grant access: the global wildcard `*` and a namespace
/// wildcard `<namespace>/*`. Anything else is kept verbatim and never
/// matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourcePattern {
    /// `*`: every server name.
    Any,
    /// `<namespace>/*`: every server name in the namespace. Holds the
    /// namespace including the trailing `/`.
    Namespace(String),
    /// A pattern outside the two supported shapes.
    Unrecognised(String),
}

impl ResourcePattern {
    /// Parses a raw resource pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use publish_gate::auth::domain::ResourcePattern;
    ///
    /// assert_eq!(ResourcePattern::parse("*"), ResourcePattern::Any);
    /// assert!(ResourcePattern::parse("io.github.example/*").matches("io.github.example/server"));
    /// assert!(!ResourcePattern::parse("io.github.ex*").matches("io.github.example/server"));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == "*" {
            return Self::Any;
        }

        match raw.strip_suffix(NAMESPACE_WILDCARD_SUFFIX) {
            Some(namespace) if !namespace.is_empty() && !namespace.contains(['/', '*']) => {
                Self::Namespace(format!("{namespace}/"))
            }
            _ => Self::Unrecognised(raw.to_owned()),
        }
    }

    /// Returns `true` when the pattern covers `server_name`.
    #[must_use]
    pub fn matches(&self, server_name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Namespace(prefix) => server_name.starts_with(prefix.as_str()),
            Self::Unrecognised(_) => false,
        }
    }
}

impl fmt::Display for ResourcePattern {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => formatter.write_str("*"),
            Self::Namespace(prefix) => write!(formatter, "{prefix}*"),
            Self::Unrecognised(raw) => formatter.write_str(raw),
        }
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationDecision {
    /// At least one permission covers the request.
    Allowed,
    /// No permission covers the request.
    Denied,
}

impl AuthorizationDecision {
    /// Returns `true` for [`AuthorizationDecision::Allowed`].
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Decides whether `claims` permit `action` on `server_name`.
///
/// Any single permission with a matching action and pattern is sufficient;
/// permission order is irrelevant.
///
/// # Examples
///
/// ```
/// use publish_gate::auth::domain::{
///     AuthMethod, AuthorizationDecision, IdentityClaims, Permission, PermissionAction, authorize,
/// };
///
/// let claims = IdentityClaims::new(AuthMethod::GitHubAccessToken, "example")
///     .with_permission(Permission::publish("io.github.example/*"));
///
/// assert_eq!(
///     authorize(&claims, PermissionAction::Publish, "io.github.example/test-server"),
///     AuthorizationDecision::Allowed
/// );
/// assert_eq!(
///     authorize(&claims, PermissionAction::Publish, "io.github.other/test-server"),
///     AuthorizationDecision::Denied
/// );
/// ```
#[must_use]
pub fn authorize(
    claims: &IdentityClaims,
    action: PermissionAction,
    server_name: &str,
) -> AuthorizationDecision {
    let granted = claims.permissions.iter().any(|permission| {
        permission.action == action
            && ResourcePattern::parse(&permission.resource_pattern).matches(server_name)
    });

    let decision = if granted {
        AuthorizationDecision::Allowed
    } else {
        AuthorizationDecision::Denied
    };

    tracing::debug!(
        auth_method = claims.auth_method.as_str(),
        subject = %claims.auth_method_subject,
        action = action.as_str(),
        server_name,
        ?decision,
        "authorization evaluated"
    );

    decision
}
