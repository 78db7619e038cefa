//! Port contracts for descriptor validation and persistence.

pub mod repository;
pub mod validator;

pub use repository::{ServerRepository, ServerRepositoryError, ServerRepositoryResult};
pub use validator::{
    BaseUrlNormalization, DescriptorValidator, RegistryFamily, RegistryFamilyTable,
    ValidationConfig, ValidationResult,
};
