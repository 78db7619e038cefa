//! Adapter implementations for server persistence.

pub mod memory;

pub use memory::InMemoryServerRepository;
