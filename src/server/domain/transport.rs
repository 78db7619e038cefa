//! Transport declarations for packages and remotes.

use super::KeyValueInput;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport protocol named by a `type` field.
///
/// Unknown values are kept verbatim so the validator can report them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransportType {
    /// Standard input and output of a local process.
    Stdio,
    /// HTTP with server-sent events.
    Sse,
    /// Streamable HTTP.
    StreamableHttp,
    /// Any other value, including an absent one.
    Unsupported(String),
}

impl TransportType {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Stdio => "stdio",
            Self::Sse => "sse",
            Self::StreamableHttp => "streamable-http",
            Self::Unsupported(raw) => raw,
        }
    }

    /// Returns `true` for transports addressed by URL.
    #[must_use]
    pub const fn is_url_based(&self) -> bool {
        matches!(self, Self::Sse | Self::StreamableHttp)
    }
}

impl Default for TransportType {
    fn default() -> Self {
        Self::Unsupported(String::new())
    }
}

impl From<String> for TransportType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "stdio" => Self::Stdio,
            "sse" => Self::Sse,
            "streamable-http" => Self::StreamableHttp,
            _ => Self::Unsupported(value),
        }
    }
}

impl From<TransportType> for String {
    fn from(value: TransportType) -> Self {
        match value {
            TransportType::Unsupported(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// How a client connects to a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transport {
    /// Transport protocol.
    #[serde(rename = "type", default)]
    pub kind: TransportType,
    /// Endpoint for URL-based transports. May contain `{variable}`
    /// placeholders in package transports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// HTTP headers the client sends.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<KeyValueInput>,
}

impl Transport {
    /// Creates a `stdio` transport.
    #[must_use]
    pub fn stdio() -> Self {
        Self {
            kind: TransportType::Stdio,
            ..Self::default()
        }
    }

    /// Creates a transport of `kind` addressed by `url`.
    #[must_use]
    pub fn with_url(kind: TransportType, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: Some(url.into()),
            headers: Vec::new(),
        }
    }

    /// Returns the URL unless it is absent or empty.
    #[must_use]
    pub fn declared_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}
