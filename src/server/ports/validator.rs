//! Validator port for server descriptors.
//!
//! Defines the validation interface and the configuration that tunes it.

use crate::server::domain::{DescriptorError, RegistryType, ServerDescriptor};
use serde::Deserialize;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, DescriptorError>;

/// Port for descriptor validation.
///
/// Validation is fail-fast: the first violated rule is reported and later
/// rules are not evaluated. Implementations are pure functions of the
/// descriptor and their configuration, so validating the same descriptor
/// twice yields the same outcome.
pub trait DescriptorValidator: Send + Sync {
    /// Validates a descriptor against all rules.
    ///
    /// Checks metadata, then packages, then remotes.
    ///
    /// # Errors
    ///
    /// Returns the first [`DescriptorError`] encountered.
    fn validate(&self, descriptor: &ServerDescriptor) -> ValidationResult<()>;

    /// Validates the name, version, repository and website URL.
    ///
    /// # Errors
    ///
    /// Returns the first [`DescriptorError`] encountered.
    fn validate_metadata(&self, descriptor: &ServerDescriptor) -> ValidationResult<()>;

    /// Validates every package in declaration order.
    ///
    /// # Errors
    ///
    /// Returns the first [`DescriptorError`] encountered.
    fn validate_packages(&self, descriptor: &ServerDescriptor) -> ValidationResult<()>;

    /// Validates every remote in declaration order against the publisher
    /// domain of the descriptor's name.
    ///
    /// # Errors
    ///
    /// Returns the first [`DescriptorError`] encountered.
    fn validate_remotes(&self, descriptor: &ServerDescriptor) -> ValidationResult<()>;
}

/// Base URLs accepted for one registry type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryFamily {
    /// Registry type the family belongs to.
    pub registry_type: RegistryType,
    /// Base URL used when a package declares none.
    pub canonical: String,
    /// Further accepted base URLs.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl RegistryFamily {
    /// Creates a family with a canonical base URL and aliases.
    #[must_use]
    pub fn new(registry_type: RegistryType, canonical: &str, aliases: &[&str]) -> Self {
        Self {
            registry_type,
            canonical: canonical.to_owned(),
            aliases: aliases.iter().map(|alias| (*alias).to_owned()).collect(),
        }
    }

    /// Iterates over the canonical base URL followed by the aliases.
    pub fn base_urls(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// Static mapping from registry type to its base-URL family.
///
/// # Examples
///
/// ```
/// use publish_gate::server::domain::RegistryType;
/// use publish_gate::server::ports::RegistryFamilyTable;
///
/// let table = RegistryFamilyTable::default();
/// let oci = table.family(&RegistryType::Oci).expect("oci family");
/// assert_eq!(oci.canonical, "https://docker.io");
/// assert!(oci.base_urls().any(|url| url == "https://ghcr.io"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RegistryFamilyTable {
    families: Vec<RegistryFamily>,
}

impl RegistryFamilyTable {
    /// Creates a table from explicit families.
    #[must_use]
    pub const fn new(families: Vec<RegistryFamily>) -> Self {
        Self { families }
    }

    /// Returns the family for `registry_type`.
    #[must_use]
    pub fn family(&self, registry_type: &RegistryType) -> Option<&RegistryFamily> {
        self.families
            .iter()
            .find(|family| family.registry_type == *registry_type)
    }
}

impl Default for RegistryFamilyTable {
    fn default() -> Self {
        Self::new(vec![
            RegistryFamily::new(RegistryType::Npm, "https://registry.npmjs.org", &[]),
            RegistryFamily::new(RegistryType::Pypi, "https://pypi.org", &[]),
            RegistryFamily::new(RegistryType::Oci, "https://docker.io", &["https://ghcr.io"]),
            RegistryFamily::new(RegistryType::Nuget, "https://api.nuget.org", &[]),
            RegistryFamily::new(RegistryType::Mcpb, "https://github.com", &["https://gitlab.com"]),
        ])
    }
}

/// Differences tolerated when comparing a declared base URL with a family.
///
/// A match that only succeeds after normalisation is accepted but logged as
/// a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseUrlNormalization {
    /// Treat `https://pypi.org/` as `https://pypi.org`.
    pub ignore_trailing_slash: bool,
    /// Treat `http://pypi.org` as `https://pypi.org`.
    pub ignore_scheme: bool,
}

impl Default for BaseUrlNormalization {
    fn default() -> Self {
        Self {
            ignore_trailing_slash: true,
            ignore_scheme: false,
        }
    }
}

/// Configuration for descriptor validation rules.
///
/// # Examples
///
/// ```
/// use publish_gate::server::ports::ValidationConfig;
///
/// let config = ValidationConfig::default();
/// assert_eq!(config.reserved_versions, vec!["latest".to_owned()]);
/// assert!(config.base_url_normalization.ignore_trailing_slash);
///
/// let strict = ValidationConfig::strict();
/// assert!(!strict.base_url_normalization.ignore_trailing_slash);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationConfig {
    /// Literal version strings that may never be published, compared
    /// case-insensitively after trimming.
    pub reserved_versions: Vec<String>,
    /// Accepted base URLs per registry type.
    pub registry_families: RegistryFamilyTable,
    /// Tolerated base URL differences.
    pub base_url_normalization: BaseUrlNormalization,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            reserved_versions: vec!["latest".to_owned()],
            registry_families: RegistryFamilyTable::default(),
            base_url_normalization: BaseUrlNormalization::default(),
        }
    }
}

impl ValidationConfig {
    /// Creates a configuration that requires base URLs to match exactly.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            base_url_normalization: BaseUrlNormalization {
                ignore_trailing_slash: false,
                ignore_scheme: false,
            },
            ..Self::default()
        }
    }

    /// Creates a configuration that tolerates trailing slashes and scheme
    /// differences in base URLs.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            base_url_normalization: BaseUrlNormalization {
                ignore_trailing_slash: true,
                ignore_scheme: true,
            },
            ..Self::default()
        }
    }

    /// Returns `true` when `version` is a reserved literal.
    #[must_use]
    pub fn is_reserved_version(&self, version: &str) -> bool {
        let candidate = version.trim();
        self.reserved_versions
            .iter()
            .any(|reserved| reserved.trim().eq_ignore_ascii_case(candidate))
    }
}
