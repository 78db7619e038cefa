//! In-memory repository for published server versions.

use crate::server::{
    domain::{PublishedServer, ServerRecordId},
    ports::{ServerRepository, ServerRepositoryError, ServerRepositoryResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory server repository.
///
/// The `(name, version)` uniqueness check and the insert happen under one
/// write lock, so concurrent publishes of the same version cannot both
/// succeed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryServerRepository {
    state: Arc<RwLock<InMemoryServerState>>,
}

#[derive(Debug, Default)]
struct InMemoryServerState {
    servers: HashMap<ServerRecordId, PublishedServer>,
    version_index: HashMap<(String, String), ServerRecordId>,
    name_index: HashMap<String, Vec<ServerRecordId>>,
}

impl InMemoryServerRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ServerRepository for InMemoryServerRepository {
    async fn create_with_uniqueness(
        &self,
        record: &PublishedServer,
    ) -> ServerRepositoryResult<PublishedServer> {
        let mut state = self.state.write().map_err(|err| {
            ServerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let version_key = (record.name().to_owned(), record.version().to_owned());
        if state.version_index.contains_key(&version_key) {
            return Err(ServerRepositoryError::DuplicateVersion {
                name: version_key.0,
                version: version_key.1,
            });
        }

        let previous_latest = state
            .name_index
            .get(record.name())
            .and_then(|ids| ids.last())
            .copied();
        if let Some(previous_id) = previous_latest
            && let Some(previous) = state.servers.get_mut(&previous_id)
        {
            previous.mark_superseded();
        }

        state.version_index.insert(version_key, record.id());
        state
            .name_index
            .entry(record.name().to_owned())
            .or_default()
            .push(record.id());
        state.servers.insert(record.id(), record.clone());
        Ok(record.clone())
    }

    async fn find_by_name_and_version(
        &self,
        name: &str,
        version: &str,
    ) -> ServerRepositoryResult<Option<PublishedServer>> {
        let state = self.state.read().map_err(|err| {
            ServerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let server = state
            .version_index
            .get(&(name.to_owned(), version.to_owned()))
            .and_then(|id| state.servers.get(id))
            .cloned();
        Ok(server)
    }

    async fn list_versions(&self, name: &str) -> ServerRepositoryResult<Vec<PublishedServer>> {
        let state = self.state.read().map_err(|err| {
            ServerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let versions = state
            .name_index
            .get(name)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.servers.get(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(versions)
    }
}
