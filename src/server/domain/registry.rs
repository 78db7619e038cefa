//! Package registry types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Registry a package is distributed through.
///
/// Matching is exact and case-sensitive; anything else is carried as
/// [`RegistryType::Unsupported`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RegistryType {
    /// The npm registry.
    Npm,
    /// The Python Package Index.
    Pypi,
    /// OCI container registries.
    Oci,
    /// The NuGet gallery.
    Nuget,
    /// MCP bundles downloaded from a source-hosting release page.
    Mcpb,
    /// Any other value, including an absent one.
    Unsupported(String),
}

impl RegistryType {
    /// Every supported registry type.
    pub const SUPPORTED: [Self; 5] = [Self::Npm, Self::Pypi, Self::Oci, Self::Nuget, Self::Mcpb];

    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Npm => "npm",
            Self::Pypi => "pypi",
            Self::Oci => "oci",
            Self::Nuget => "nuget",
            Self::Mcpb => "mcpb",
            Self::Unsupported(raw) => raw,
        }
    }

    /// Returns `true` for every variant except [`RegistryType::Unsupported`].
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }
}

impl Default for RegistryType {
    fn default() -> Self {
        Self::Unsupported(String::new())
    }
}

impl From<String> for RegistryType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "npm" => Self::Npm,
            "pypi" => Self::Pypi,
            "oci" => Self::Oci,
            "nuget" => Self::Nuget,
            "mcpb" => Self::Mcpb,
            _ => Self::Unsupported(value),
        }
    }
}

impl From<&str> for RegistryType {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<RegistryType> for String {
    fn from(value: RegistryType) -> Self {
        match value {
            RegistryType::Unsupported(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for RegistryType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
