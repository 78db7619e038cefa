//! Port contracts for publisher authentication.

mod verifier;

pub use verifier::{CredentialError, CredentialVerifier};
