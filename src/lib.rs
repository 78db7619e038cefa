//! Publish gate: the admission pipeline of an MCP server registry.
//!
//! Before a server descriptor (`server.json`) is stored, this crate decides
//! whether the submitting identity may publish it and whether the descriptor
//! is well-formed.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (JWT, in-memory storage)
//!
//! # Modules
//!
//! - [`auth`]: Identity claims, resource patterns, and credential verification
//! - [`server`]: Descriptor model, validation rules, and the publish service

pub mod auth;
pub mod server;
