//! Server names of the form `<reverse-dns-namespace>/<name>`.

use super::DescriptorError;
use std::fmt;

/// A server name split into its namespace and name parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerName {
    namespace: String,
    name: String,
}

impl ServerName {
    /// Parses a `<namespace>/<name>` string.
    ///
    /// The namespace need not contain a dot: `example/test-server` is a
    /// valid name.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::MissingName`] for an empty string,
    /// [`DescriptorError::NameFormat`] when there is no `/`,
    /// [`DescriptorError::MultipleSlashes`] when there is more than one, and
    /// [`DescriptorError::EmptyNamePart`] when either side is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use publish_gate::server::domain::ServerName;
    ///
    /// let parsed = ServerName::parse("com.example/test-server").expect("valid name");
    /// assert_eq!(parsed.namespace(), "com.example");
    /// assert_eq!(parsed.name(), "test-server");
    /// assert_eq!(parsed.publisher_domain(), "example.com");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, DescriptorError> {
        if raw.is_empty() {
            return Err(DescriptorError::MissingName);
        }

        match raw.matches('/').count() {
            0 => return Err(DescriptorError::NameFormat(raw.to_owned())),
            1 => {}
            _ => return Err(DescriptorError::MultipleSlashes(raw.to_owned())),
        }

        let (namespace, name) = raw
            .split_once('/')
            .ok_or_else(|| DescriptorError::NameFormat(raw.to_owned()))?;
        if namespace.is_empty() || name.is_empty() {
            return Err(DescriptorError::EmptyNamePart(raw.to_owned()));
        }

        Ok(Self {
            namespace: namespace.to_owned(),
            name: name.to_owned(),
        })
    }

    /// Returns the reverse-DNS namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the part after the `/`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the forward domain the namespace encodes.
    #[must_use]
    pub fn publisher_domain(&self) -> String {
        publisher_domain(&self.namespace)
    }
}

impl fmt::Display for ServerName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}/{}", self.namespace, self.name)
    }
}

/// Converts a reverse-DNS namespace into the domain it encodes.
///
/// Labels are reversed and the result is lowercased. Text from the first `/`
/// onward is ignored, so a full server name can be passed as well.
///
/// # Examples
///
/// ```
/// use publish_gate::server::domain::publisher_domain;
///
/// assert_eq!(publisher_domain("com.example"), "example.com");
/// assert_eq!(publisher_domain("io.GitHub.Example/server"), "example.github.io");
/// ```
#[must_use]
pub fn publisher_domain(namespace: &str) -> String {
    let labels = namespace
        .split_once('/')
        .map_or(namespace, |(head, _)| head);
    labels
        .split('.')
        .rev()
        .collect::<Vec<_>>()
        .join(".")
        .to_ascii_lowercase()
}
