//! Error types for server descriptor validation.

use std::fmt;
use thiserror::Error;

/// Reasons a server descriptor is rejected.
///
/// Validation is fail-fast, so a rejected descriptor yields exactly one of
/// these. Messages name the offending field or value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DescriptorError {
    /// The server name is empty.
    #[error("server name is required")]
    MissingName,

    /// The server name has no `/` separator.
    #[error("server name must be in format 'dns-namespace/name': {0}")]
    NameFormat(String),

    /// The namespace or name part around the `/` is empty.
    #[error(
        "server name must be in format 'dns-namespace/name' with non-empty namespace and name parts: {0}"
    )]
    EmptyNamePart(String),

    /// The server name contains more than one `/`.
    #[error("server name cannot contain multiple slashes: {0}")]
    MultipleSlashes(String),

    /// A version field holds a range expression.
    #[error("version must be a specific version, not a range: {field} is '{version}'")]
    VersionLooksLikeRange {
        /// Path of the offending field, such as `packages[0].version`.
        field: String,
        /// Rejected version string.
        version: String,
    },

    /// A version field holds a reserved literal such as `latest`.
    #[error("version string is reserved and cannot be published: {field} is '{version}'")]
    ReservedVersionString {
        /// Path of the offending field.
        field: String,
        /// Rejected version string.
        version: String,
    },

    /// The repository URL does not fit its declared source.
    #[error("invalid repository URL: {url}: {reason}")]
    InvalidRepositoryUrl {
        /// Rejected repository URL.
        url: String,
        /// Description of the failure.
        reason: String,
    },

    /// The repository subfolder is not a clean relative path.
    #[error("invalid subfolder path: {reason}: '{path}'")]
    InvalidSubfolderPath {
        /// Rejected subfolder.
        path: String,
        /// Description of the failure.
        reason: String,
    },

    /// The website URL is malformed, relative, or uses a non-HTTP scheme.
    #[error("{0}")]
    InvalidWebsiteUrl(WebsiteUrlProblem),

    /// The website URL host lies outside the publisher domain.
    #[error("websiteUrl {url} does not match namespace {name}")]
    WebsiteDomainMismatch {
        /// Rejected website URL.
        url: String,
        /// Server name whose namespace was checked.
        name: String,
    },

    /// A package has an empty identifier.
    #[error("package identifier is required: {field}")]
    PackageIdentifierRequired {
        /// Path of the offending field.
        field: String,
    },

    /// A package identifier contains whitespace.
    #[error("package name cannot contain spaces: '{0}'")]
    PackageNameHasSpaces(String),

    /// A package transport type is not recognised.
    #[error("unsupported transport type: {0}")]
    UnsupportedTransportType(String),

    /// A remote uses a transport type that remotes cannot use.
    #[error("unsupported transport type for remotes: {0}")]
    UnsupportedRemoteTransportType(String),

    /// A URL-based transport has no URL.
    #[error("url is required for {0} transport type")]
    TransportUrlRequired(String),

    /// A `stdio` transport declares a URL.
    #[error("url must be empty for stdio transport type: {0}")]
    TransportUrlForbidden(String),

    /// A package transport URL is not an absolute HTTP URL.
    #[error("invalid transport URL {url}: {reason}")]
    InvalidTransportUrl {
        /// Rejected URL as declared.
        url: String,
        /// Description of the failure.
        reason: String,
    },

    /// A package transport URL references undeclared template variables.
    #[error(
        "template variables in URL {url} are not declared by the package: {}",
        .variables.join(", ")
    )]
    UnresolvedTemplateVariable {
        /// URL as declared.
        url: String,
        /// Placeholder names without a declaration.
        variables: Vec<String>,
    },

    /// A package registry type is outside the supported set.
    #[error("unsupported registry type: '{0}'")]
    UnsupportedRegistryType(String),

    /// A package base URL belongs to a different registry family.
    #[error(
        "registry type and base URL do not match: '{registry_type}' is not valid with '{base_url}'"
    )]
    RegistryBaseUrlMismatch {
        /// Declared registry type.
        registry_type: String,
        /// Declared base URL.
        base_url: String,
    },

    /// A package identifier does not fit its declared registry type.
    #[error(
        "registry type and identifier do not match: '{registry_type}' cannot use '{identifier}': {reason}"
    )]
    RegistryIdentifierMismatch {
        /// Declared registry type.
        registry_type: String,
        /// Declared identifier.
        identifier: String,
        /// Description of the failure.
        reason: String,
    },

    /// An `mcpb` package has no file hash.
    #[error("must provide a fileSha256 for mcpb packages: {0}")]
    MissingFileHash(String),

    /// An `mcpb` package file hash is not 64 hexadecimal characters.
    #[error("invalid fileSha256 for package {identifier}: expected 64 hexadecimal characters, got '{hash}'")]
    InvalidFileHash {
        /// Package identifier.
        identifier: String,
        /// Rejected hash.
        hash: String,
    },

    /// A remote URL is malformed, not HTTP, or points at localhost.
    #[error("invalid remote URL {url}: {reason}")]
    InvalidRemoteUrl {
        /// Rejected URL.
        url: String,
        /// Description of the failure.
        reason: String,
    },

    /// A remote URL host lies outside the publisher domain.
    #[error("invalid remote URL: remote URL host {host} does not match publisher domain {domain}")]
    RemoteDomainMismatch {
        /// Host of the remote URL.
        host: String,
        /// Publisher domain derived from the namespace.
        domain: String,
    },

    /// A named argument's name is empty or carries a value or placeholder.
    #[error("invalid argument name '{name}': {reason}")]
    InvalidArgumentName {
        /// Rejected argument name.
        name: String,
        /// Description of the failure.
        reason: String,
    },

    /// An argument type is not recognised.
    #[error("unsupported argument type: '{0}'")]
    UnsupportedArgumentType(String),

    /// A named argument's value repeats the argument name.
    #[error("{field} for argument '{name}' must not start with the argument name: '{value}'")]
    ArgumentValueRepeatsName {
        /// Argument name.
        name: String,
        /// Either `value` or `default`.
        field: String,
        /// Rejected value.
        value: String,
    },
}

/// Ways a website URL can be malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebsiteUrlProblem {
    /// The URL does not parse.
    Malformed {
        /// Rejected URL.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },
    /// The URL has no scheme.
    NotAbsolute(String),
    /// The URL uses a scheme other than `http` or `https`.
    UnsupportedScheme(String),
}

impl fmt::Display for WebsiteUrlProblem {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { url, reason } => write!(formatter, "invalid websiteUrl: {url}: {reason}"),
            Self::NotAbsolute(url) => {
                write!(formatter, "websiteUrl must be absolute (include scheme): {url}")
            }
            Self::UnsupportedScheme(url) => {
                write!(formatter, "websiteUrl must use http or https scheme: {url}")
            }
        }
    }
}

/// Category of a [`DescriptorError`], stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorErrorKind {
    /// See [`DescriptorError::MissingName`].
    NameRequired,
    /// Missing separator or empty name part.
    NameFormat,
    /// See [`DescriptorError::MultipleSlashes`].
    MultipleSlashes,
    /// See [`DescriptorError::VersionLooksLikeRange`].
    VersionLooksLikeRange,
    /// See [`DescriptorError::ReservedVersionString`].
    ReservedVersionString,
    /// See [`DescriptorError::InvalidRepositoryUrl`].
    InvalidRepositoryUrl,
    /// See [`DescriptorError::InvalidSubfolderPath`].
    InvalidSubfolderPath,
    /// See [`DescriptorError::InvalidWebsiteUrl`].
    InvalidWebsiteUrl,
    /// See [`DescriptorError::WebsiteDomainMismatch`].
    WebsiteDomainMismatch,
    /// See [`DescriptorError::PackageIdentifierRequired`].
    PackageIdentifierRequired,
    /// See [`DescriptorError::PackageNameHasSpaces`].
    PackageNameHasSpaces,
    /// Unsupported transport type on a package or remote.
    UnsupportedTransportType,
    /// See [`DescriptorError::TransportUrlRequired`].
    TransportUrlRequired,
    /// See [`DescriptorError::TransportUrlForbidden`].
    TransportUrlForbidden,
    /// See [`DescriptorError::InvalidTransportUrl`].
    InvalidTransportUrl,
    /// See [`DescriptorError::UnresolvedTemplateVariable`].
    UnresolvedTemplateVariable,
    /// See [`DescriptorError::UnsupportedRegistryType`].
    UnsupportedRegistryType,
    /// Base URL or identifier inconsistent with the registry type.
    RegistryTypeMismatch,
    /// See [`DescriptorError::MissingFileHash`].
    MissingFileHash,
    /// See [`DescriptorError::InvalidFileHash`].
    InvalidFileHash,
    /// See [`DescriptorError::InvalidRemoteUrl`].
    InvalidRemoteUrl,
    /// See [`DescriptorError::RemoteDomainMismatch`].
    RemoteDomainMismatch,
    /// See [`DescriptorError::InvalidArgumentName`].
    InvalidArgumentName,
    /// See [`DescriptorError::UnsupportedArgumentType`].
    UnsupportedArgumentType,
    /// See [`DescriptorError::ArgumentValueRepeatsName`].
    ArgumentValueRepeatsName,
}

impl DescriptorErrorKind {
    /// Returns the canonical kind name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NameRequired => "NameRequired",
            Self::NameFormat => "NameFormat",
            Self::MultipleSlashes => "MultipleSlashes",
            Self::VersionLooksLikeRange => "VersionLooksLikeRange",
            Self::ReservedVersionString => "ReservedVersionString",
            Self::InvalidRepositoryUrl => "InvalidRepositoryURL",
            Self::InvalidSubfolderPath => "InvalidSubfolderPath",
            Self::InvalidWebsiteUrl => "InvalidWebsiteURL",
            Self::WebsiteDomainMismatch => "WebsiteDomainMismatch",
            Self::PackageIdentifierRequired => "PackageIdentifierRequired",
            Self::PackageNameHasSpaces => "PackageNameHasSpaces",
            Self::UnsupportedTransportType => "UnsupportedTransportType",
            Self::TransportUrlRequired => "TransportURLRequired",
            Self::TransportUrlForbidden => "TransportURLForbidden",
            Self::InvalidTransportUrl => "InvalidTransportURL",
            Self::UnresolvedTemplateVariable => "UnresolvedTemplateVariable",
            Self::UnsupportedRegistryType => "UnsupportedRegistryType",
            Self::RegistryTypeMismatch => "RegistryTypeMismatch",
            Self::MissingFileHash => "MissingFileHash",
            Self::InvalidFileHash => "InvalidFileHash",
            Self::InvalidRemoteUrl => "InvalidRemoteURL",
            Self::RemoteDomainMismatch => "RemoteDomainMismatch",
            Self::InvalidArgumentName => "InvalidArgumentName",
            Self::UnsupportedArgumentType => "UnsupportedArgumentType",
            Self::ArgumentValueRepeatsName => "ArgumentValueRepeatsName",
        }
    }
}

impl fmt::Display for DescriptorErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl DescriptorError {
    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> DescriptorErrorKind {
        match self {
            Self::MissingName => DescriptorErrorKind::NameRequired,
            Self::NameFormat(_) | Self::EmptyNamePart(_) => DescriptorErrorKind::NameFormat,
            Self::MultipleSlashes(_) => DescriptorErrorKind::MultipleSlashes,
            Self::VersionLooksLikeRange { .. } => DescriptorErrorKind::VersionLooksLikeRange,
            Self::ReservedVersionString { .. } => DescriptorErrorKind::ReservedVersionString,
            Self::InvalidRepositoryUrl { .. } => DescriptorErrorKind::InvalidRepositoryUrl,
            Self::InvalidSubfolderPath { .. } => DescriptorErrorKind::InvalidSubfolderPath,
            Self::InvalidWebsiteUrl(_) => DescriptorErrorKind::InvalidWebsiteUrl,
            Self::WebsiteDomainMismatch { .. } => DescriptorErrorKind::WebsiteDomainMismatch,
            Self::PackageIdentifierRequired { .. } => {
                DescriptorErrorKind::PackageIdentifierRequired
            }
            Self::PackageNameHasSpaces(_) => DescriptorErrorKind::PackageNameHasSpaces,
            Self::UnsupportedTransportType(_) | Self::UnsupportedRemoteTransportType(_) => {
                DescriptorErrorKind::UnsupportedTransportType
            }
            Self::TransportUrlRequired(_) => DescriptorErrorKind::TransportUrlRequired,
            Self::TransportUrlForbidden(_) => DescriptorErrorKind::TransportUrlForbidden,
            Self::InvalidTransportUrl { .. } => DescriptorErrorKind::InvalidTransportUrl,
            Self::UnresolvedTemplateVariable { .. } => {
                DescriptorErrorKind::UnresolvedTemplateVariable
            }
            Self::UnsupportedRegistryType(_) => DescriptorErrorKind::UnsupportedRegistryType,
            Self::RegistryBaseUrlMismatch { .. } | Self::RegistryIdentifierMismatch { .. } => {
                DescriptorErrorKind::RegistryTypeMismatch
            }
            Self::MissingFileHash(_) => DescriptorErrorKind::MissingFileHash,
            Self::InvalidFileHash { .. } => DescriptorErrorKind::InvalidFileHash,
            Self::InvalidRemoteUrl { .. } => DescriptorErrorKind::InvalidRemoteUrl,
            Self::RemoteDomainMismatch { .. } => DescriptorErrorKind::RemoteDomainMismatch,
            Self::InvalidArgumentName { .. } => DescriptorErrorKind::InvalidArgumentName,
            Self::UnsupportedArgumentType(_) => DescriptorErrorKind::UnsupportedArgumentType,
            Self::ArgumentValueRepeatsName { .. } => DescriptorErrorKind::ArgumentValueRepeatsName,
        }
    }
}
