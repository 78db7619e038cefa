//! Metadata validation rules.
//!
//! Each rule is a pure function that checks one aspect of a descriptor and
//! returns the first violation as a [`DescriptorError`].

use super::url::{HTTP_SCHEMES, UrlError, domain_matches, parse_absolute, require_scheme};
use crate::server::{
    domain::{
        DescriptorError, Repository, RepositorySource, ServerName, WebsiteUrlProblem, classify,
    },
    ports::ValidationConfig,
};
use regex::Regex;
use std::sync::LazyLock;

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static GITHUB_REPOSITORY_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.)?github\.com/[\w.-]+/[\w.-]+/?$")
        .expect("valid GitHub repository pattern")
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static GITLAB_REPOSITORY_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.)?gitlab\.com/[\w.-]+(?:/[\w.-]+)+/?$")
        .expect("valid GitLab repository pattern")
});

/// Validates the server name.
///
/// # Errors
///
/// Returns the name errors described on [`ServerName::parse`].
pub fn validate_name(name: &str) -> Result<ServerName, DescriptorError> {
    ServerName::parse(name)
}

/// Validates a version field.
///
/// Reserved literals are checked before range shapes.
///
/// # Errors
///
/// Returns [`DescriptorError::ReservedVersionString`] or
/// [`DescriptorError::VersionLooksLikeRange`].
pub fn validate_version(
    field: &str,
    version: &str,
    config: &ValidationConfig,
) -> Result<(), DescriptorError> {
    if config.is_reserved_version(version) {
        return Err(DescriptorError::ReservedVersionString {
            field: field.to_owned(),
            version: version.to_owned(),
        });
    }

    if classify(version).is_range() {
        return Err(DescriptorError::VersionLooksLikeRange {
            field: field.to_owned(),
            version: version.to_owned(),
        });
    }

    Ok(())
}

/// Validates a repository reference with a non-empty URL.
///
/// # Errors
///
/// Returns [`DescriptorError::InvalidRepositoryUrl`] when the source is not
/// supported or the URL does not fit it, and
/// [`DescriptorError::InvalidSubfolderPath`] for a bad subfolder.
pub fn validate_repository(repository: &Repository) -> Result<(), DescriptorError> {
    let shape = match &repository.source {
        RepositorySource::GitHub => &*GITHUB_REPOSITORY_URL,
        RepositorySource::GitLab => &*GITLAB_REPOSITORY_URL,
        RepositorySource::Unsupported(source) => {
            return Err(DescriptorError::InvalidRepositoryUrl {
                url: repository.url.clone(),
                reason: format!("unsupported repository source '{source}'"),
            });
        }
    };

    if !shape.is_match(&repository.url) {
        return Err(DescriptorError::InvalidRepositoryUrl {
            url: repository.url.clone(),
            reason: format!("not a {} repository URL", repository.source),
        });
    }

    match repository.subfolder.as_deref() {
        Some(subfolder) if !subfolder.is_empty() => validate_subfolder(subfolder),
        _ => Ok(()),
    }
}

/// Validates a repository subfolder path.
///
/// # Errors
///
/// Returns [`DescriptorError::InvalidSubfolderPath`] for absolute paths,
/// trailing slashes, characters outside `[A-Za-z0-9._~/-]`, empty segments,
/// or `.` and `..` segments.
pub fn validate_subfolder(subfolder: &str) -> Result<(), DescriptorError> {
    let reject = |reason: &str| DescriptorError::InvalidSubfolderPath {
        path: subfolder.to_owned(),
        reason: reason.to_owned(),
    };

    if subfolder.starts_with('/') || subfolder.ends_with('/') {
        return Err(reject("must be relative without leading or trailing slash"));
    }

    let has_invalid_character = subfolder.chars().any(|character| {
        !(character.is_ascii_alphanumeric() || matches!(character, '.' | '_' | '~' | '/' | '-'))
    });
    if has_invalid_character {
        return Err(reject("contains invalid characters"));
    }

    let mut segments = subfolder.split('/');
    if segments.clone().any(str::is_empty) {
        return Err(reject("contains empty path segments"));
    }
    if segments.any(|segment| matches!(segment, "." | "..")) {
        return Err(reject("contains path traversal"));
    }

    Ok(())
}

/// Validates the website URL against the server's namespace.
///
/// # Errors
///
/// Returns [`DescriptorError::InvalidWebsiteUrl`] for malformed, relative or
/// non-HTTP URLs and [`DescriptorError::WebsiteDomainMismatch`] when the host
/// is outside the publisher domain.
pub fn validate_website_url(url: &str, server_name: &ServerName) -> Result<(), DescriptorError> {
    let parsed = parse_absolute(url).map_err(|err| {
        DescriptorError::InvalidWebsiteUrl(match err {
            UrlError::NotAbsolute => WebsiteUrlProblem::NotAbsolute(url.to_owned()),
            other => WebsiteUrlProblem::Malformed {
                url: url.to_owned(),
                reason: other.to_string(),
            },
        })
    })?;

    require_scheme(&parsed, HTTP_SCHEMES).map_err(|_| {
        DescriptorError::InvalidWebsiteUrl(WebsiteUrlProblem::UnsupportedScheme(url.to_owned()))
    })?;

    let host = parsed.host_str().unwrap_or_default();
    if !domain_matches(host, &server_name.publisher_domain()) {
        return Err(DescriptorError::WebsiteDomainMismatch {
            url: url.to_owned(),
            name: server_name.to_string(),
        });
    }

    Ok(())
}
