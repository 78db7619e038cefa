//! Domain model for publisher identity and permission checks.
//!
//! Everything in this module is a pure function of its inputs. Token
//! verification lives behind [`crate::auth::ports::CredentialVerifier`].

mod claims;
mod credential;
mod pattern;

pub use claims::{AuthMethod, IdentityClaims, ParseAuthMethodError, Permission, PermissionAction};
pub use credential::{CredentialFormatError, extract_bearer_token};
pub use pattern::{AuthorizationDecision, ResourcePattern, authorize};
