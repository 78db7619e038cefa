//! Transport validation for packages and remotes.
//!
//! Package transports run on the user's machine, so localhost URLs and
//! `{variable}` placeholders are allowed. Remotes are public endpoints and
//! must live inside the publisher's domain.

use super::url::{HTTP_SCHEMES, domain_matches, is_localhost, parse_absolute, require_scheme};
use crate::server::domain::{
    Argument, ArgumentType, DescriptorError, Package, Transport, TransportType,
};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static TEMPLATE_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([^{}\s]+)\}").expect("valid placeholder pattern")
});

const PLACEHOLDER_SUBSTITUTE: &str = "1";

/// Returns the distinct `{name}` placeholders in `url`, in order of first
/// appearance.
///
/// # Examples
///
/// ```
/// use publish_gate::server::validation::transport::template_placeholders;
///
/// assert_eq!(
///     template_placeholders("http://{host}:{port}/mcp/{host}"),
///     vec!["host".to_owned(), "port".to_owned()]
/// );
/// ```
#[must_use]
pub fn template_placeholders(url: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    TEMPLATE_PLACEHOLDER
        .captures_iter(url)
        .filter_map(|captures| captures.get(1))
        .map(|placeholder| placeholder.as_str().to_owned())
        .filter(|placeholder| seen.insert(placeholder.clone()))
        .collect()
}

/// Returns the variable names a package declares for URL templates.
///
/// These are environment variable names, keys of argument `variables`,
/// named-argument names without leading dashes, and positional value hints.
#[must_use]
pub fn declared_variables(package: &Package) -> BTreeSet<String> {
    let arguments = package
        .runtime_arguments
        .iter()
        .chain(&package.package_arguments);

    package
        .environment_variables
        .iter()
        .map(|variable| variable.name.clone())
        .chain(arguments.flat_map(argument_variables))
        .filter(|name| !name.is_empty())
        .collect()
}

fn argument_variables(argument: &Argument) -> Vec<String> {
    let own_name = match argument.kind {
        ArgumentType::Named => argument
            .name
            .as_deref()
            .map(|name| name.trim_start_matches('-').to_owned()),
        ArgumentType::Positional => argument.input.value_hint.clone(),
        ArgumentType::Unsupported(_) => None,
    };
    argument
        .variables
        .keys()
        .cloned()
        .chain(own_name)
        .collect()
}

/// Validates the transport of a package.
///
/// # Errors
///
/// Returns [`DescriptorError::TransportUrlForbidden`] for a `stdio`
/// transport with a URL, [`DescriptorError::TransportUrlRequired`] for a
/// URL-based transport without one,
/// [`DescriptorError::UnresolvedTemplateVariable`] for undeclared
/// placeholders, [`DescriptorError::InvalidTransportUrl`] when the resolved
/// URL is not absolute HTTP, and
/// [`DescriptorError::UnsupportedTransportType`] otherwise.
pub fn validate_package_transport(package: &Package) -> Result<(), DescriptorError> {
    let transport = &package.transport;
    match &transport.kind {
        TransportType::Stdio => match transport.declared_url() {
            Some(url) => Err(DescriptorError::TransportUrlForbidden(url.to_owned())),
            None => Ok(()),
        },
        TransportType::Sse | TransportType::StreamableHttp => {
            let url = required_url(transport)?;
            validate_templated_url(url, &declared_variables(package))
        }
        TransportType::Unsupported(raw) => {
            Err(DescriptorError::UnsupportedTransportType(raw.clone()))
        }
    }
}

fn validate_templated_url(url: &str, declared: &BTreeSet<String>) -> Result<(), DescriptorError> {
    let unresolved: Vec<String> = template_placeholders(url)
        .into_iter()
        .filter(|placeholder| !declared.contains(placeholder))
        .collect();
    if !unresolved.is_empty() {
        return Err(DescriptorError::UnresolvedTemplateVariable {
            url: url.to_owned(),
            variables: unresolved,
        });
    }

    let resolved = TEMPLATE_PLACEHOLDER.replace_all(url, PLACEHOLDER_SUBSTITUTE);
    parse_absolute(&resolved)
        .and_then(|parsed| require_scheme(&parsed, HTTP_SCHEMES))
        .map_err(|err| DescriptorError::InvalidTransportUrl {
            url: url.to_owned(),
            reason: err.to_string(),
        })
}

/// Validates a remote endpoint against the publisher domain.
///
/// # Errors
///
/// Returns [`DescriptorError::UnsupportedRemoteTransportType`] for anything
/// but `sse` and `streamable-http`, [`DescriptorError::TransportUrlRequired`]
/// without a URL, [`DescriptorError::InvalidRemoteUrl`] for malformed,
/// non-HTTP or localhost URLs, and [`DescriptorError::RemoteDomainMismatch`]
/// when the host is outside `publisher_domain`.
pub fn validate_remote(remote: &Transport, publisher_domain: &str) -> Result<(), DescriptorError> {
    if !remote.kind.is_url_based() {
        return Err(DescriptorError::UnsupportedRemoteTransportType(
            remote.kind.as_str().to_owned(),
        ));
    }

    let url = required_url(remote)?;
    let invalid = |reason: String| DescriptorError::InvalidRemoteUrl {
        url: url.to_owned(),
        reason,
    };

    let parsed = parse_absolute(url).map_err(|err| invalid(err.to_string()))?;
    require_scheme(&parsed, HTTP_SCHEMES).map_err(|err| invalid(err.to_string()))?;
    if is_localhost(&parsed) {
        return Err(invalid("localhost URLs are not allowed for remotes".to_owned()));
    }

    let host = parsed.host_str().unwrap_or_default();
    if !domain_matches(host, publisher_domain) {
        return Err(DescriptorError::RemoteDomainMismatch {
            host: host.to_owned(),
            domain: publisher_domain.to_owned(),
        });
    }

    Ok(())
}

fn required_url(transport: &Transport) -> Result<&str, DescriptorError> {
    transport
        .declared_url()
        .ok_or_else(|| DescriptorError::TransportUrlRequired(transport.kind.as_str().to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::domain::{DescriptorErrorKind, KeyValueInput, RegistryType};
    use rstest::rstest;

    fn package_with(transport: Transport) -> Package {
        Package::new(RegistryType::Npm, "test-package", transport)
    }

    #[rstest]
    fn stdio_without_url_passes() {
        assert_eq!(validate_package_transport(&package_with(Transport::stdio())), Ok(()));
    }

    #[rstest]
    fn stdio_with_url_fails() {
        let transport = Transport::with_url(TransportType::Stdio, "ignored-for-stdio");
        let err = validate_package_transport(&package_with(transport)).expect_err("rejected");
        assert!(err.to_string().contains("url must be empty for stdio transport type"));
    }

    #[rstest]
    #[case(TransportType::Sse, "url is required for sse transport type")]
    #[case(TransportType::StreamableHttp, "url is required for streamable-http transport type")]
    fn url_based_transport_without_url_fails(#[case] kind: TransportType, #[case] message: &str) {
        let transport = Transport {
            kind,
            ..Transport::default()
        };
        let err = validate_package_transport(&package_with(transport)).expect_err("rejected");
        assert_eq!(err.to_string(), message);
    }

    #[rstest]
    #[case("https://example.com/mcp")]
    #[case("http://localhost:3000/mcp")]
    fn package_transport_accepts_http_urls(#[case] url: &str) {
        let transport = Transport::with_url(TransportType::StreamableHttp, url);
        assert_eq!(validate_package_transport(&package_with(transport)), Ok(()));
    }

    #[rstest]
    fn declared_template_variables_resolve() {
        let mut package = package_with(Transport::with_url(
            TransportType::StreamableHttp,
            "http://{host}:{port}/mcp",
        ));
        package.environment_variables = vec![KeyValueInput::named("host"), KeyValueInput::named("port")];

        assert_eq!(validate_package_transport(&package), Ok(()));
    }

    #[rstest]
    fn argument_names_declare_template_variables() {
        let mut package = package_with(Transport::with_url(
            TransportType::Sse,
            "http://localhost:{port}/{path}",
        ));
        package.package_arguments = vec![Argument::named("--port"), Argument::positional("path")];

        assert_eq!(validate_package_transport(&package), Ok(()));
    }

    #[rstest]
    fn undeclared_template_variables_fail() {
        let package = package_with(Transport::with_url(
            TransportType::StreamableHttp,
            "http://{host}:{port}/mcp",
        ));

        let err = validate_package_transport(&package).expect_err("rejected");

        assert_eq!(
            err,
            DescriptorError::UnresolvedTemplateVariable {
                url: "http://{host}:{port}/mcp".to_owned(),
                variables: vec!["host".to_owned(), "port".to_owned()],
            }
        );
        assert!(err.to_string().starts_with("template variables in URL"));
    }

    #[rstest]
    #[case("ftp://example.com/mcp")]
    #[case("example.com/mcp")]
    fn package_transport_rejects_non_http_urls(#[case] url: &str) {
        let transport = Transport::with_url(TransportType::Sse, url);
        let result = validate_package_transport(&package_with(transport));
        assert_eq!(
            result.map_err(|err| err.kind()),
            Err(DescriptorErrorKind::InvalidTransportUrl)
        );
    }

    #[rstest]
    fn unknown_package_transport_fails() {
        let transport = Transport {
            kind: TransportType::Unsupported("websocket".to_owned()),
            ..Transport::default()
        };
        let err = validate_package_transport(&package_with(transport)).expect_err("rejected");
        assert_eq!(err.to_string(), "unsupported transport type: websocket");
    }

    #[rstest]
    #[case("https://example.com/mcp")]
    #[case("https://mcp.example.com/endpoint")]
    #[case("https://api.example.com/sse")]
    fn remotes_inside_publisher_domain_pass(#[case] url: &str) {
        let remote = Transport::with_url(TransportType::StreamableHttp, url);
        assert_eq!(validate_remote(&remote, "example.com"), Ok(()));
    }

    #[rstest]
    #[case(Transport::stdio(), "unsupported transport type for remotes: stdio")]
    #[case(
        Transport::with_url(TransportType::Unsupported("websocket".to_owned()), "wss://example.com/ws"),
        "unsupported transport type for remotes: websocket"
    )]
    #[case(
        Transport { kind: TransportType::Sse, ..Transport::default() },
        "url is required for sse transport type"
    )]
    #[case(
        Transport::with_url(TransportType::StreamableHttp, "https://google.com/mcp"),
        "invalid remote URL: remote URL host google.com does not match publisher domain example.com"
    )]
    fn remote_problems_are_reported(#[case] remote: Transport, #[case] message: &str) {
        let err = validate_remote(&remote, "example.com").expect_err("rejected");
        assert_eq!(err.to_string(), message);
    }

    #[rstest]
    #[case("not-a-valid-url")]
    #[case("example.com/remote")]
    #[case("http://localhost")]
    #[case("http://localhost:3000")]
    #[case("http://127.0.0.1/mcp")]
    #[case("ftp://example.com/mcp")]
    fn invalid_remote_urls_fail(#[case] url: &str) {
        let remote = Transport::with_url(TransportType::StreamableHttp, url);
        let err = validate_remote(&remote, "example.com").expect_err("rejected");
        assert_eq!(err.kind(), DescriptorErrorKind::InvalidRemoteUrl);
        assert!(err.to_string().starts_with("invalid remote URL"));
    }
}
