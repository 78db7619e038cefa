//! Adapter implementations for publisher authentication.

mod jwt;

pub use jwt::{JwtCredentialVerifier, JwtTokenIssuer, JwtVerifierConfig};
