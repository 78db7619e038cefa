//! Stored record of an accepted publication.

use super::ServerDescriptor;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a published server version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerRecordId(Uuid);

impl ServerRecordId {
    /// Creates a new random record identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a record identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ServerRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ServerRecordId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A descriptor accepted into the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedServer {
    id: ServerRecordId,
    server: ServerDescriptor,
    published_at: DateTime<Utc>,
    is_latest: bool,
}

impl PublishedServer {
    /// Wraps an accepted descriptor as the latest version of its name.
    #[must_use]
    pub fn new(server: ServerDescriptor, clock: &impl Clock) -> Self {
        Self {
            id: ServerRecordId::new(),
            server,
            published_at: clock.utc(),
            is_latest: true,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> ServerRecordId {
        self.id
    }

    /// Returns the stored descriptor.
    #[must_use]
    pub const fn server(&self) -> &ServerDescriptor {
        &self.server
    }

    /// Returns the server name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.server.name
    }

    /// Returns the published version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.server.version
    }

    /// Returns when the version was accepted.
    #[must_use]
    pub const fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    /// Returns whether this is the newest version of its name.
    #[must_use]
    pub const fn is_latest(&self) -> bool {
        self.is_latest
    }

    /// Marks the record as superseded by a newer version.
    #[expect(
        clippy::missing_const_for_fn,
        reason = "&mut self methods cannot be const in stable Rust"
    )]
    pub fn mark_superseded(&mut self) {
        self.is_latest = false;
    }
}
