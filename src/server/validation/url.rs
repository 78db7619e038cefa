//! URL parsing and publisher-domain matching shared by the descriptor rules.

use thiserror::Error;
use url::{Host, ParseError, Url};

/// Schemes accepted for website, transport and remote URLs.
pub const HTTP_SCHEMES: &[&str] = &["http", "https"];

/// Reasons a string is not a usable absolute URL.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UrlError {
    /// The string does not parse as a URL.
    #[error("malformed URL: {0}")]
    Malformed(String),
    /// The string is a relative reference without a scheme.
    #[error("URL must be absolute (include scheme)")]
    NotAbsolute,
    /// The URL has no host.
    #[error("URL has no host")]
    MissingHost,
    /// The URL scheme is not allowed here.
    #[error("URL scheme '{0}' is not allowed")]
    UnsupportedScheme(String),
}

/// Parses `raw` as an absolute URL with a host.
///
/// # Errors
///
/// Returns [`UrlError::Malformed`] for whitespace or parser failures,
/// [`UrlError::NotAbsolute`] when there is no scheme, and
/// [`UrlError::MissingHost`] when the URL has no host.
///
/// # Examples
///
/// ```
/// use publish_gate::server::validation::url::{UrlError, parse_absolute};
///
/// assert!(parse_absolute("https://example.com/docs").is_ok());
/// assert_eq!(parse_absolute("example.com/docs"), Err(UrlError::NotAbsolute));
/// ```
pub fn parse_absolute(raw: &str) -> Result<Url, UrlError> {
    if raw.contains(char::is_whitespace) {
        return Err(UrlError::Malformed("URL contains whitespace".to_owned()));
    }

    let parsed = Url::parse(raw).map_err(|err| match err {
        ParseError::RelativeUrlWithoutBase => UrlError::NotAbsolute,
        other => UrlError::Malformed(other.to_string()),
    })?;

    if parsed.host().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(parsed)
}

/// Requires the URL scheme to be one of `allowed`.
///
/// # Errors
///
/// Returns [`UrlError::UnsupportedScheme`] otherwise.
pub fn require_scheme(url: &Url, allowed: &[&str]) -> Result<(), UrlError> {
    if allowed.contains(&url.scheme()) {
        Ok(())
    } else {
        Err(UrlError::UnsupportedScheme(url.scheme().to_owned()))
    }
}

/// Returns `true` when the URL points at the local machine.
#[must_use]
pub fn is_localhost(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(address)) => address.is_loopback(),
        Some(Host::Ipv6(address)) => address.is_loopback(),
        None => false,
    }
}

/// Returns `true` when `host` is `domain` or one of its subdomains.
///
/// Comparison is ASCII case-insensitive and respects label boundaries, so
/// `notexample.com` does not match `example.com`.
///
/// # Examples
///
/// ```
/// use publish_gate::server::validation::url::domain_matches;
///
/// assert!(domain_matches("mcp.example.com", "example.com"));
/// assert!(!domain_matches("notexample.com", "example.com"));
/// ```
#[must_use]
pub fn domain_matches(host: &str, domain: &str) -> bool {
    let host_lower = host.to_ascii_lowercase();
    let domain_lower = domain.to_ascii_lowercase();
    host_lower == domain_lower || host_lower.ends_with(&format!(".{domain_lower}"))
}
