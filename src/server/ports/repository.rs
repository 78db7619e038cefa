//! Repository port for published server versions.

use crate::server::domain::PublishedServer;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for server repository operations.
pub type ServerRepositoryResult<T> = Result<T, ServerRepositoryError>;

/// Persistence contract for published server versions.
#[async_trait]
pub trait ServerRepository: Send + Sync {
    /// Stores a new version, failing if `(name, version)` already exists.
    ///
    /// The uniqueness check and the insert are atomic. On success the stored
    /// record is the latest version of its name and any previous latest
    /// version is marked superseded.
    ///
    /// # Errors
    ///
    /// Returns [`ServerRepositoryError::DuplicateVersion`] when the version is
    /// already published, or [`ServerRepositoryError::Persistence`] when the
    /// store fails.
    async fn create_with_uniqueness(
        &self,
        record: &PublishedServer,
    ) -> ServerRepositoryResult<PublishedServer>;

    /// Finds a published version by server name and version.
    async fn find_by_name_and_version(
        &self,
        name: &str,
        version: &str,
    ) -> ServerRepositoryResult<Option<PublishedServer>>;

    /// Returns every published version of a server, oldest first.
    async fn list_versions(&self, name: &str) -> ServerRepositoryResult<Vec<PublishedServer>>;
}

/// Errors returned by server repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ServerRepositoryError {
    /// The `(name, version)` pair is already published.
    #[error("duplicate version {version} of {name}")]
    DuplicateVersion {
        /// Server name.
        name: String,
        /// Already published version.
        version: String,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ServerRepositoryError {
    /// Wraps a persistence-layer failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
