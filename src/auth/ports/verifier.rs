//! Credential verification port.

use crate::auth::domain::IdentityClaims;
use async_trait::async_trait;
use thiserror::Error;

/// Turns an opaque bearer token into identity claims.
///
/// Implementations verify the token's integrity and expiry. They never
/// decide authorization; that is left to [`crate::auth::domain::authorize`].
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Verifies `token` and returns the claims it carries.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] when the token is expired, carries a bad
    /// signature, or does not decode into identity claims.
    async fn verify(&self, token: &str) -> Result<IdentityClaims, CredentialError>;
}

/// Errors raised while verifying or issuing credentials.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// The token's expiry lies in the past.
    #[error("token has expired")]
    Expired,
    /// The token's signature does not verify against the configured key.
    #[error("token signature is invalid")]
    InvalidSignature,
    /// The token could not be decoded or its claims are unusable.
    #[error("invalid token: {0}")]
    Invalid(String),
    /// A token could not be minted.
    #[error("failed to issue token: {0}")]
    Issue(String),
}
