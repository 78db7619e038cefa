//! Registry type and base URL consistency rules.

use super::url::parse_absolute;
use crate::server::{
    domain::{DescriptorError, Package, RegistryType},
    ports::{BaseUrlNormalization, RegistryFamily, ValidationConfig},
};
use tracing::warn;

const SHA256_HEX_LENGTH: usize = 64;
const GITHUB_RELEASE_MARKER: &str = "/releases/download/";
const GITLAB_RELEASE_MARKER: &str = "/-/releases/";

/// How a declared base URL relates to a registry family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseUrlMatch {
    /// Identical to a family base URL.
    Exact,
    /// Equal to a family base URL only after normalisation.
    Normalized,
    /// Outside the family.
    Mismatch,
}

/// Compares a declared base URL with every base URL of a family.
///
/// # Examples
///
/// ```
/// use publish_gate::server::domain::RegistryType;
/// use publish_gate::server::ports::{BaseUrlNormalization, RegistryFamily};
/// use publish_gate::server::validation::registry::{BaseUrlMatch, match_base_url};
///
/// let family = RegistryFamily::new(RegistryType::Pypi, "https://pypi.org", &[]);
/// let normalization = BaseUrlNormalization::default();
///
/// assert_eq!(match_base_url("https://pypi.org", &family, normalization), BaseUrlMatch::Exact);
/// assert_eq!(match_base_url("https://pypi.org/", &family, normalization), BaseUrlMatch::Normalized);
/// assert_eq!(match_base_url("http://pypi.org", &family, normalization), BaseUrlMatch::Mismatch);
/// ```
#[must_use]
pub fn match_base_url(
    declared: &str,
    family: &RegistryFamily,
    normalization: BaseUrlNormalization,
) -> BaseUrlMatch {
    if family.base_urls().any(|candidate| candidate == declared) {
        return BaseUrlMatch::Exact;
    }

    let normalized_declared = normalize_base_url(declared, normalization);
    if family
        .base_urls()
        .any(|candidate| normalize_base_url(candidate, normalization) == normalized_declared)
    {
        BaseUrlMatch::Normalized
    } else {
        BaseUrlMatch::Mismatch
    }
}

fn normalize_base_url(base_url: &str, normalization: BaseUrlNormalization) -> &str {
    let without_slash = if normalization.ignore_trailing_slash {
        base_url.trim_end_matches('/')
    } else {
        base_url
    };
    if normalization.ignore_scheme {
        without_slash
            .strip_prefix("https://")
            .or_else(|| without_slash.strip_prefix("http://"))
            .unwrap_or(without_slash)
    } else {
        without_slash
    }
}

/// Validates a package's registry type, base URL and identifier.
///
/// # Errors
///
/// Returns [`DescriptorError::UnsupportedRegistryType`] for types outside the
/// fixed set, [`DescriptorError::RegistryBaseUrlMismatch`] when the base URL
/// belongs to another family, [`DescriptorError::RegistryIdentifierMismatch`]
/// for identifiers that do not fit the type, and the file hash errors for
/// `mcpb` packages.
pub fn validate_registry(package: &Package, config: &ValidationConfig) -> Result<(), DescriptorError> {
    let family = config
        .registry_families
        .family(&package.registry_type)
        .filter(|_| package.registry_type.is_supported())
        .ok_or_else(|| {
            DescriptorError::UnsupportedRegistryType(package.registry_type.as_str().to_owned())
        })?;

    if let Some(base_url) = package.declared_base_url() {
        validate_base_url(package, base_url, family, config.base_url_normalization)?;
    }

    if package.registry_type == RegistryType::Mcpb {
        validate_mcpb(package, family)
    } else if package.identifier.contains("://") {
        Err(identifier_mismatch(
            package,
            "URL identifiers are only valid for mcpb packages",
        ))
    } else {
        Ok(())
    }
}

fn validate_base_url(
    package: &Package,
    base_url: &str,
    family: &RegistryFamily,
    normalization: BaseUrlNormalization,
) -> Result<(), DescriptorError> {
    match match_base_url(base_url, family, normalization) {
        BaseUrlMatch::Exact => Ok(()),
        BaseUrlMatch::Normalized => {
            warn!(
                registry_type = %package.registry_type,
                base_url,
                canonical = %family.canonical,
                "registry base URL accepted after normalization"
            );
            Ok(())
        }
        BaseUrlMatch::Mismatch => Err(DescriptorError::RegistryBaseUrlMismatch {
            registry_type: package.registry_type.as_str().to_owned(),
            base_url: base_url.to_owned(),
        }),
    }
}

fn validate_mcpb(package: &Package, family: &RegistryFamily) -> Result<(), DescriptorError> {
    let hash = package
        .declared_file_sha256()
        .ok_or_else(|| DescriptorError::MissingFileHash(package.identifier.clone()))?;
    if hash.len() != SHA256_HEX_LENGTH || !hash.chars().all(|digit| digit.is_ascii_hexdigit()) {
        return Err(DescriptorError::InvalidFileHash {
            identifier: package.identifier.clone(),
            hash: hash.to_owned(),
        });
    }

    let download = parse_absolute(&package.identifier)
        .ok()
        .filter(|url| url.scheme() == "https")
        .ok_or_else(|| identifier_mismatch(package, "identifier must be an absolute https URL"))?;
    let host = download.host_str().unwrap_or_default().to_ascii_lowercase();

    let release_hosts: Vec<String> = family.base_urls().filter_map(url_host).collect();
    if !release_hosts.contains(&host) {
        return Err(identifier_mismatch(
            package,
            &format!("host {host} is not an allowed release host"),
        ));
    }

    if let Some(base_url) = package.declared_base_url()
        && url_host(base_url).as_deref() != Some(host.as_str())
    {
        return Err(identifier_mismatch(
            package,
            "identifier host does not match registryBaseUrl",
        ));
    }

    if let Some(marker) = release_marker(&host)
        && !download.path().contains(marker)
    {
        return Err(identifier_mismatch(
            package,
            &format!("identifier must point at a release asset ({marker})"),
        ));
    }

    Ok(())
}

fn url_host(raw: &str) -> Option<String> {
    parse_absolute(raw)
        .ok()
        .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
}

fn release_marker(host: &str) -> Option<&'static str> {
    match host {
        "github.com" => Some(GITHUB_RELEASE_MARKER),
        "gitlab.com" => Some(GITLAB_RELEASE_MARKER),
        _ => None,
    }
}

fn identifier_mismatch(package: &Package, reason: &str) -> DescriptorError {
    DescriptorError::RegistryIdentifierMismatch {
        registry_type: package.registry_type.as_str().to_owned(),
        identifier: package.identifier.clone(),
        reason: reason.to_owned(),
    }
}
