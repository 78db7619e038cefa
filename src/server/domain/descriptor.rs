//! The `server.json` descriptor submitted for publication.

use super::{Package, Transport};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source-hosting service of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RepositorySource {
    /// github.com
    GitHub,
    /// gitlab.com
    GitLab,
    /// Any other value, including an absent one.
    Unsupported(String),
}

impl RepositorySource {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
            Self::Unsupported(raw) => raw,
        }
    }
}

impl Default for RepositorySource {
    fn default() -> Self {
        Self::Unsupported(String::new())
    }
}

impl From<String> for RepositorySource {
    fn from(value: String) -> Self {
        match value.as_str() {
            "github" => Self::GitHub,
            "gitlab" => Self::GitLab,
            _ => Self::Unsupported(value),
        }
    }
}

impl From<RepositorySource> for String {
    fn from(value: RepositorySource) -> Self {
        match value {
            RepositorySource::Unsupported(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for RepositorySource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Source repository of a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Browsable repository URL. An empty URL means no repository.
    #[serde(default)]
    pub url: String,
    /// Hosting service.
    #[serde(default)]
    pub source: RepositorySource,
    /// Host-specific repository identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Path of the server within a monorepo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subfolder: Option<String>,
}

impl Repository {
    /// Creates a repository reference.
    #[must_use]
    pub fn new(url: impl Into<String>, source: RepositorySource) -> Self {
        Self {
            url: url.into(),
            source,
            id: None,
            subfolder: None,
        }
    }
}

/// A server descriptor as submitted by a publisher.
///
/// Missing string fields decode as empty so that validation, not decoding,
/// reports them.
///
/// # Examples
///
/// ```
/// use publish_gate::server::domain::ServerDescriptor;
///
/// let descriptor: ServerDescriptor = serde_json::from_str(
///     r#"{"name": "com.example/test-server", "version": "1.0.0"}"#,
/// )
/// .expect("descriptor decodes");
/// assert!(descriptor.packages.is_empty());
/// assert!(descriptor.declared_repository().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDescriptor {
    /// `<reverse-dns-namespace>/<name>`.
    #[serde(default)]
    pub name: String,
    /// Human-readable summary.
    #[serde(default)]
    pub description: String,
    /// Version of the server being published.
    #[serde(default)]
    pub version: String,
    /// Human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Documentation or landing page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    /// Source repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    /// Installable packages, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<Package>,
    /// Hosted endpoints, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remotes: Vec<Transport>,
}

impl ServerDescriptor {
    /// Creates a descriptor with a name and version.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    /// Returns the repository unless it is absent or has an empty URL.
    #[must_use]
    pub fn declared_repository(&self) -> Option<&Repository> {
        self.repository
            .as_ref()
            .filter(|repository| !repository.url.is_empty())
    }

    /// Returns the website URL unless it is absent or empty.
    #[must_use]
    pub fn declared_website_url(&self) -> Option<&str> {
        self.website_url.as_deref().filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn repository_without_url_is_absent() {
        let descriptor: ServerDescriptor = serde_json::from_value(json!({
            "name": "com.example/test-server",
            "repository": {"id": "owner/repo"},
        }))
        .expect("descriptor decodes");

        assert!(descriptor.repository.is_some());
        assert!(descriptor.declared_repository().is_none());
    }

    #[rstest]
    #[case("github", RepositorySource::GitHub)]
    #[case("gitlab", RepositorySource::GitLab)]
    #[case("bitbucket", RepositorySource::Unsupported("bitbucket".to_owned()))]
    fn repository_source_decodes(#[case] raw: &str, #[case] expected: RepositorySource) {
        let repository: Repository =
            serde_json::from_value(json!({"url": "https://example.com", "source": raw}))
                .expect("repository decodes");
        assert_eq!(repository.source, expected);
    }

    #[rstest]
    fn descriptor_round_trips_camel_case_fields() {
        let value = json!({
            "name": "com.example/test-server",
            "description": "A test server",
            "version": "1.0.0",
            "websiteUrl": "https://example.com/docs",
            "remotes": [{"type": "streamable-http", "url": "https://example.com/mcp"}],
        });

        let descriptor: ServerDescriptor =
            serde_json::from_value(value.clone()).expect("descriptor decodes");
        let encoded = serde_json::to_value(&descriptor).expect("descriptor encodes");

        assert_eq!(encoded, value);
    }
}
