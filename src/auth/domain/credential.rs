//! Extraction of the bearer token from a raw `Authorization` value.

use thiserror::Error;

/// Shape errors in a raw credential, detected before any verification.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CredentialFormatError {
    /// No credential was supplied, or it was blank.
    #[error("required header parameter is missing: Authorization")]
    Missing,
    /// The credential is not of the form `Bearer <token>`.
    #[error("Invalid Authorization header format, expected 'Bearer <token>'")]
    Malformed,
}

/// Returns the token part of a `Bearer <token>` credential.
///
/// The scheme is matched case-insensitively. The token must be non-empty and
/// free of whitespace.
///
/// # Errors
///
/// Returns [`CredentialFormatError::Missing`] for an absent or blank value and
/// [`CredentialFormatError::Malformed`] for any other shape.
///
/// # Examples
///
/// ```
/// use publish_gate::auth::domain::{CredentialFormatError, extract_bearer_token};
///
/// assert_eq!(extract_bearer_token(Some("Bearer abc.def")), Ok("abc.def"));
/// assert_eq!(extract_bearer_token(None), Err(CredentialFormatError::Missing));
/// assert_eq!(
///     extract_bearer_token(Some("InvalidFormat")),
///     Err(CredentialFormatError::Malformed)
/// );
/// ```
pub fn extract_bearer_token(raw_credential: Option<&str>) -> Result<&str, CredentialFormatError> {
    let value = raw_credential
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .ok_or(CredentialFormatError::Missing)?;

    let (scheme, token) = value
        .split_once(char::is_whitespace)
        .ok_or(CredentialFormatError::Malformed)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(CredentialFormatError::Malformed);
    }

    let trimmed_token = token.trim();
    if trimmed_token.is_empty() || trimmed_token.contains(char::is_whitespace) {
        return Err(CredentialFormatError::Malformed);
    }

    Ok(trimmed_token)
}
