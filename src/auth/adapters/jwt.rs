//! JWT-backed credential verification and token issuing.
//!
//! Registry tokens carry the identity claims at the top level of the JWT
//! payload next to the registered `exp`, `iat` and optional `iss` claims.

use crate::auth::{
    domain::IdentityClaims,
    ports::{CredentialError, CredentialVerifier},
};
use async_trait::async_trait;
use chrono::Duration;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default leeway applied to expiry checks, matching `jsonwebtoken`.
const DEFAULT_LEEWAY_SECONDS: u64 = 60;

#[derive(Debug, Serialize, Deserialize)]
struct RegistryTokenClaims {
    #[serde(flatten)]
    identity: IdentityClaims,
    exp: i64,
    iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iss: Option<String>,
}

/// Settings for JWT verification.
///
/// # Examples
///
/// ```
/// use publish_gate::auth::adapters::JwtVerifierConfig;
///
/// let config: JwtVerifierConfig =
///     serde_json::from_str(r#"{"issuer": "registry.example.com"}"#).expect("valid config");
/// assert_eq!(config.issuer.as_deref(), Some("registry.example.com"));
/// assert_eq!(config.leeway_seconds, 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JwtVerifierConfig {
    /// Required `iss` claim, when set.
    pub issuer: Option<String>,
    /// Tolerated clock skew for `exp`, in seconds.
    pub leeway_seconds: u64,
    /// Expected signing algorithm.
    pub algorithm: Algorithm,
}

impl Default for JwtVerifierConfig {
    fn default() -> Self {
        Self {
            issuer: None,
            leeway_seconds: DEFAULT_LEEWAY_SECONDS,
            algorithm: Algorithm::HS256,
        }
    }
}

impl JwtVerifierConfig {
    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = self.leeway_seconds;
        validation.set_required_spec_claims(&["exp"]);
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }
        validation
    }
}

/// Verifies registry JWTs and decodes their identity claims.
#[derive(Clone)]
pub struct JwtCredentialVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtCredentialVerifier {
    /// Creates a verifier for the given key and settings.
    #[must_use]
    pub fn new(key: DecodingKey, config: &JwtVerifierConfig) -> Self {
        Self {
            key,
            validation: config.validation(),
        }
    }

    /// Creates an HS256 verifier from a shared secret with default settings.
    #[must_use]
    pub fn hs256(secret: &[u8]) -> Self {
        Self::new(
            DecodingKey::from_secret(secret),
            &JwtVerifierConfig::default(),
        )
    }
}

impl fmt::Debug for JwtCredentialVerifier {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("JwtCredentialVerifier")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CredentialVerifier for JwtCredentialVerifier {
    async fn verify(&self, token: &str) -> Result<IdentityClaims, CredentialError> {
        let data = decode::<RegistryTokenClaims>(token, &self.key, &self.validation)
            .map_err(|err| map_decode_error(&err))?;
        Ok(data.claims.identity)
    }
}

fn map_decode_error(error: &jsonwebtoken::errors::Error) -> CredentialError {
    match error.kind() {
        ErrorKind::ExpiredSignature => CredentialError::Expired,
        ErrorKind::InvalidSignature => CredentialError::InvalidSignature,
        _ => CredentialError::Invalid(error.to_string()),
    }
}

/// Mints registry JWTs for a set of identity claims.
///
/// Issue and expiry times come from the injected clock.
pub struct JwtTokenIssuer<C: Clock> {
    key: EncodingKey,
    header: Header,
    issuer: Option<String>,
    ttl: Duration,
    clock: Arc<C>,
}

impl<C: Clock> JwtTokenIssuer<C> {
    /// Creates an issuer that signs with `key` using `algorithm`.
    #[must_use]
    pub fn new(key: EncodingKey, algorithm: Algorithm, ttl: Duration, clock: Arc<C>) -> Self {
        Self {
            key,
            header: Header::new(algorithm),
            issuer: None,
            ttl,
            clock,
        }
    }

    /// Creates an HS256 issuer from a shared secret.
    #[must_use]
    pub fn hs256(secret: &[u8], ttl: Duration, clock: Arc<C>) -> Self {
        Self::new(EncodingKey::from_secret(secret), Algorithm::HS256, ttl, clock)
    }

    /// Sets the `iss` claim written into issued tokens.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Signs a token carrying `identity`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Issue`] when signing fails.
    pub fn issue(&self, identity: &IdentityClaims) -> Result<String, CredentialError> {
        let issued_at = self.clock.utc();
        let claims = RegistryTokenClaims {
            identity: identity.clone(),
            exp: (issued_at + self.ttl).timestamp(),
            iat: issued_at.timestamp(),
            iss: self.issuer.clone(),
        };
        encode(&self.header, &claims, &self.key)
            .map_err(|err| CredentialError::Issue(err.to_string()))
    }
}

impl<C: Clock> fmt::Debug for JwtTokenIssuer<C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("JwtTokenIssuer")
            .field("algorithm", &self.header.alg)
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
