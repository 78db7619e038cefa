//! Installable packages listed by a server descriptor.

use super::{Argument, KeyValueInput, RegistryType, Transport};
use serde::{Deserialize, Serialize};

/// A package through which the server can be installed and run locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Registry the package is published to.
    #[serde(default)]
    pub registry_type: RegistryType,
    /// Registry base URL. Absent or empty means the canonical URL for the
    /// registry type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_base_url: Option<String>,
    /// Package name in the registry, or a download URL for `mcpb`.
    #[serde(default)]
    pub identifier: String,
    /// Package version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// SHA-256 of the package file, required for `mcpb`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_sha256: Option<String>,
    /// How the installed package is reached.
    #[serde(default)]
    pub transport: Transport,
    /// Runtime used to launch the package, such as `npx` or `uvx`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_hint: Option<String>,
    /// Arguments passed to the runtime.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub runtime_arguments: Vec<Argument>,
    /// Arguments passed to the package.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub package_arguments: Vec<Argument>,
    /// Environment variables the package reads.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environment_variables: Vec<KeyValueInput>,
}

impl Package {
    /// Creates a package with the given registry type, identifier and
    /// transport.
    #[must_use]
    pub fn new(
        registry_type: RegistryType,
        identifier: impl Into<String>,
        transport: Transport,
    ) -> Self {
        Self {
            registry_type,
            identifier: identifier.into(),
            transport,
            ..Self::default()
        }
    }

    /// Returns the base URL unless it is absent or empty.
    #[must_use]
    pub fn declared_base_url(&self) -> Option<&str> {
        self.registry_base_url
            .as_deref()
            .filter(|base_url| !base_url.is_empty())
    }

    /// Returns the file hash, untrimmed, unless it is absent or blank.
    #[must_use]
    pub fn declared_file_sha256(&self) -> Option<&str> {
        self.file_sha256
            .as_deref()
            .filter(|hash| !hash.trim().is_empty())
    }
}
