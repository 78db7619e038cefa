//! Validation service implementation.
//!
//! Provides the default implementation of the `DescriptorValidator` port,
//! applying the individual rules in a fixed order.

use super::{argument, registry, rules, transport};
use crate::server::{
    domain::{DescriptorError, Package, ServerDescriptor, publisher_domain},
    ports::{DescriptorValidator, ValidationConfig, ValidationResult},
};

/// Default implementation of the descriptor validator.
///
/// Rules run in order and the first failure is returned: name, version,
/// repository, website URL, then each package, then each remote.
///
/// # Examples
///
/// ```
/// use publish_gate::server::domain::ServerDescriptor;
/// use publish_gate::server::ports::DescriptorValidator;
/// use publish_gate::server::validation::DefaultDescriptorValidator;
///
/// let validator = DefaultDescriptorValidator::new();
/// let descriptor = ServerDescriptor::new("com.example/test-server", "1.0.0");
/// assert!(validator.validate(&descriptor).is_ok());
///
/// let ranged = ServerDescriptor::new("com.example/test-server", "^1.0.0");
/// assert!(validator.validate(&ranged).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DefaultDescriptorValidator {
    config: ValidationConfig,
}

impl DefaultDescriptorValidator {
    /// Creates a validator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator with custom configuration.
    #[must_use]
    pub const fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Returns the current validation configuration.
    #[must_use]
    pub const fn config(&self) -> &ValidationConfig {
        &self.config
    }

    fn validate_package(&self, index: usize, package: &Package) -> ValidationResult<()> {
        if package.identifier.is_empty() {
            return Err(DescriptorError::PackageIdentifierRequired {
                field: format!("packages[{index}].identifier"),
            });
        }
        if package.identifier.contains(char::is_whitespace) {
            return Err(DescriptorError::PackageNameHasSpaces(
                package.identifier.clone(),
            ));
        }

        if let Some(version) = &package.version {
            rules::validate_version(&format!("packages[{index}].version"), version, &self.config)?;
        }

        registry::validate_registry(package, &self.config)?;
        transport::validate_package_transport(package)?;
        argument::validate_arguments(&package.runtime_arguments)?;
        argument::validate_arguments(&package.package_arguments)
    }
}

impl DescriptorValidator for DefaultDescriptorValidator {
    fn validate(&self, descriptor: &ServerDescriptor) -> ValidationResult<()> {
        self.validate_metadata(descriptor)?;
        self.validate_packages(descriptor)?;
        self.validate_remotes(descriptor)
    }

    fn validate_metadata(&self, descriptor: &ServerDescriptor) -> ValidationResult<()> {
        let server_name = rules::validate_name(&descriptor.name)?;
        rules::validate_version("version", &descriptor.version, &self.config)?;

        if let Some(repository) = descriptor.declared_repository() {
            rules::validate_repository(repository)?;
        }

        if let Some(website_url) = descriptor.declared_website_url() {
            rules::validate_website_url(website_url, &server_name)?;
        }

        Ok(())
    }

    fn validate_packages(&self, descriptor: &ServerDescriptor) -> ValidationResult<()> {
        descriptor
            .packages
            .iter()
            .enumerate()
            .try_for_each(|(index, package)| self.validate_package(index, package))
    }

    fn validate_remotes(&self, descriptor: &ServerDescriptor) -> ValidationResult<()> {
        let domain = publisher_domain(&descriptor.name);
        descriptor
            .remotes
            .iter()
            .try_for_each(|remote| transport::validate_remote(remote, &domain))
    }
}
