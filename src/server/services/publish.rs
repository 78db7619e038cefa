//! Service layer for publishing server descriptors.

use crate::auth::{
    domain::{CredentialFormatError, PermissionAction, authorize, extract_bearer_token},
    ports::{CredentialError, CredentialVerifier},
};
use crate::server::{
    domain::{DescriptorError, DescriptorErrorKind, PublishedServer, ServerDescriptor},
    ports::{DescriptorValidator, ServerRepository, ServerRepositoryError, ValidationConfig},
    validation::DefaultDescriptorValidator,
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Reasons a publish request is rejected.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The request body is not a decodable descriptor.
    #[error("malformed request body: {0}")]
    MalformedRequest(#[source] serde_json::Error),

    /// No credential was supplied.
    #[error("required header parameter is missing: Authorization")]
    MissingCredential,

    /// The credential is not of the form `Bearer <token>`.
    #[error("Invalid Authorization header format, expected 'Bearer <token>'")]
    MalformedCredential,

    /// The token failed verification.
    #[error("Invalid or expired Registry JWT token: {0}")]
    InvalidCredential(#[source] CredentialError),

    /// The identity holds no `publish` permission covering the server name.
    #[error("You do not have permission to publish this server: {name}")]
    Forbidden {
        /// Server name the publisher attempted to publish.
        name: String,
    },

    /// The descriptor failed validation.
    #[error(transparent)]
    InvalidDescriptor(#[from] DescriptorError),

    /// The `(name, version)` pair is already published.
    #[error("invalid version: cannot publish duplicate version {version} of {name}")]
    DuplicateVersion {
        /// Server name.
        name: String,
        /// Already published version.
        version: String,
    },

    /// The repository failed for a reason other than uniqueness.
    #[error("failed to persist server: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

/// Category of a [`PublishError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublishErrorKind {
    /// See [`PublishError::MalformedRequest`].
    MalformedRequest,
    /// See [`PublishError::MissingCredential`].
    MissingCredential,
    /// See [`PublishError::MalformedCredential`].
    MalformedCredential,
    /// See [`PublishError::InvalidCredential`].
    InvalidCredential,
    /// See [`PublishError::Forbidden`].
    Forbidden,
    /// See [`PublishError::InvalidDescriptor`], with the validation category.
    InvalidDescriptor(DescriptorErrorKind),
    /// See [`PublishError::DuplicateVersion`].
    DuplicateVersion,
    /// See [`PublishError::Storage`].
    Storage,
}

impl PublishError {
    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> PublishErrorKind {
        match self {
            Self::MalformedRequest(_) => PublishErrorKind::MalformedRequest,
            Self::MissingCredential => PublishErrorKind::MissingCredential,
            Self::MalformedCredential => PublishErrorKind::MalformedCredential,
            Self::InvalidCredential(_) => PublishErrorKind::InvalidCredential,
            Self::Forbidden { .. } => PublishErrorKind::Forbidden,
            Self::InvalidDescriptor(err) => PublishErrorKind::InvalidDescriptor(err.kind()),
            Self::DuplicateVersion { .. } => PublishErrorKind::DuplicateVersion,
            Self::Storage(_) => PublishErrorKind::Storage,
        }
    }
}

impl From<CredentialFormatError> for PublishError {
    fn from(err: CredentialFormatError) -> Self {
        match err {
            CredentialFormatError::Missing => Self::MissingCredential,
            CredentialFormatError::Malformed => Self::MalformedCredential,
        }
    }
}

impl From<ServerRepositoryError> for PublishError {
    fn from(err: ServerRepositoryError) -> Self {
        match err {
            ServerRepositoryError::DuplicateVersion { name, version } => {
                Self::DuplicateVersion { name, version }
            }
            ServerRepositoryError::Persistence(source) => Self::Storage(source),
        }
    }
}

/// Result type for publish operations.
pub type PublishResult<T> = Result<T, PublishError>;

/// Publish pipeline: authenticate, authorize, validate, persist.
#[derive(Clone)]
pub struct PublishService<V, R, C>
where
    V: CredentialVerifier,
    R: ServerRepository,
    C: Clock + Send + Sync,
{
    verifier: Arc<V>,
    repository: Arc<R>,
    clock: Arc<C>,
    validator: DefaultDescriptorValidator,
}

impl<V, R, C> PublishService<V, R, C>
where
    V: CredentialVerifier,
    R: ServerRepository,
    C: Clock + Send + Sync,
{
    /// Creates a publish service with default validation settings.
    #[must_use]
    pub fn new(verifier: Arc<V>, repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            verifier,
            repository,
            clock,
            validator: DefaultDescriptorValidator::new(),
        }
    }

    /// Replaces the validation settings.
    #[must_use]
    pub fn with_validation_config(mut self, config: ValidationConfig) -> Self {
        self.validator = DefaultDescriptorValidator::with_config(config);
        self
    }

    /// Decodes a raw request body and publishes the descriptor it holds.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::MalformedRequest`] when the body does not
    /// decode, and otherwise the errors of
    /// [`PublishService::publish_descriptor`].
    #[tracing::instrument(skip(self, raw_body, raw_credential), fields(body_len = raw_body.len()))]
    pub async fn publish(
        &self,
        raw_body: &[u8],
        raw_credential: Option<&str>,
    ) -> PublishResult<PublishedServer> {
        let descriptor = match serde_json::from_slice::<ServerDescriptor>(raw_body) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                let rejection = PublishError::MalformedRequest(err);
                warn!(kind = ?rejection.kind(), error = %rejection, "publish rejected");
                return Err(rejection);
            }
        };
        self.publish_descriptor(descriptor, raw_credential).await
    }

    /// Publishes an already decoded descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::MissingCredential`],
    /// [`PublishError::MalformedCredential`] or
    /// [`PublishError::InvalidCredential`] when authentication fails,
    /// [`PublishError::Forbidden`] when authorization fails,
    /// [`PublishError::InvalidDescriptor`] when validation fails, and
    /// [`PublishError::DuplicateVersion`] or [`PublishError::Storage`] when
    /// the repository rejects the record.
    #[tracing::instrument(
        skip(self, descriptor, raw_credential),
        fields(server_name = %descriptor.name, version = %descriptor.version)
    )]
    pub async fn publish_descriptor(
        &self,
        descriptor: ServerDescriptor,
        raw_credential: Option<&str>,
    ) -> PublishResult<PublishedServer> {
        let outcome = self.admit(descriptor, raw_credential).await;
        match &outcome {
            Ok(record) => info!(record_id = %record.id(), "server version published"),
            Err(err) => warn!(kind = ?err.kind(), error = %err, "publish rejected"),
        }
        outcome
    }

    async fn admit(
        &self,
        descriptor: ServerDescriptor,
        raw_credential: Option<&str>,
    ) -> PublishResult<PublishedServer> {
        let token = extract_bearer_token(raw_credential)?;
        let claims = self
            .verifier
            .verify(token)
            .await
            .map_err(PublishError::InvalidCredential)?;

        if !authorize(&claims, PermissionAction::Publish, &descriptor.name).is_allowed() {
            return Err(PublishError::Forbidden {
                name: descriptor.name,
            });
        }

        self.validator.validate(&descriptor)?;

        let record = PublishedServer::new(descriptor, &*self.clock);
        Ok(self.repository.create_with_uniqueness(&record).await?)
    }
}
