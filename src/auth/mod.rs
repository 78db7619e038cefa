//! Authentication and authorization for registry publishers.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]: identity claims, permissions, resource
//!   patterns, and the authorization decision
//! - Port contracts in [`ports`]: credential verification
//! - Adapter implementations in [`adapters`]: JWT-backed verifier and issuer

pub mod adapters;
pub mod domain;
pub mod ports;
