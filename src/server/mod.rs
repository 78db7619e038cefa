//! Server descriptor publication for the registry.
//!
//! This module decides whether a `server.json` descriptor may be stored. It
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]: the descriptor model, server names, version
//!   classification, and validation errors
//! - Port contracts in [`ports`]: descriptor validation and persistence
//! - Validation rules in [`validation`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
