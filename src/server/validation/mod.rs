//! Descriptor validation implementation.
//!
//! Individual rules live in their own modules; [`DefaultDescriptorValidator`]
//! composes them behind the [`crate::server::ports::DescriptorValidator`]
//! port.

pub mod argument;
pub mod registry;
pub mod rules;
pub mod service;
pub mod transport;
pub mod url;

pub use service::DefaultDescriptorValidator;
