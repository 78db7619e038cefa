//! Shared test helpers for in-memory publish integration tests.

use std::sync::Arc;

use chrono::Duration;
use mockable::DefaultClock;
use publish_gate::{
    auth::{
        adapters::{JwtCredentialVerifier, JwtTokenIssuer},
        domain::{AuthMethod, IdentityClaims, Permission},
        ports::CredentialError,
    },
    server::{
        adapters::InMemoryServerRepository,
        domain::{Package, RegistryType, ServerDescriptor, Transport},
        services::PublishService,
    },
};
use rstest::fixture;

/// Shared secret for tokens minted in tests.
pub const SECRET: &[u8] = b"in-memory-integration-secret";

/// Publish service wired to real JWT verification and in-memory storage.
pub type TestService = PublishService<JwtCredentialVerifier, InMemoryServerRepository, DefaultClock>;

/// Publish service plus handles on its collaborators.
pub struct Harness {
    /// Service under test.
    pub service: Arc<TestService>,
    /// Repository the service writes into.
    pub repository: Arc<InMemoryServerRepository>,
    issuer: JwtTokenIssuer<DefaultClock>,
}

impl Harness {
    /// Returns an `Authorization` value granting `publish` on `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be signed.
    pub fn bearer_for(&self, pattern: &str) -> Result<String, CredentialError> {
        let claims = IdentityClaims::new(AuthMethod::GitHubAccessToken, "integration-user")
            .with_permission(Permission::publish(pattern));
        self.bearer_with(&claims)
    }

    /// Returns an `Authorization` value carrying `claims`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be signed.
    pub fn bearer_with(&self, claims: &IdentityClaims) -> Result<String, CredentialError> {
        Ok(format!("Bearer {}", self.issuer.issue(claims)?))
    }
}

/// Provides a fresh service backed by an empty repository.
#[fixture]
pub fn harness() -> Harness {
    let repository = Arc::new(InMemoryServerRepository::new());
    let clock = Arc::new(DefaultClock);
    let service = PublishService::new(
        Arc::new(JwtCredentialVerifier::hs256(SECRET)),
        Arc::clone(&repository),
        Arc::clone(&clock),
    );

    Harness {
        service: Arc::new(service),
        repository,
        issuer: JwtTokenIssuer::hs256(SECRET, Duration::hours(1), clock),
    }
}

/// Builds a valid descriptor with a single npm package.
#[must_use]
pub fn descriptor(name: &str, version: &str) -> ServerDescriptor {
    ServerDescriptor {
        description: "Integration test server".to_owned(),
        packages: vec![Package {
            version: Some(version.to_owned()),
            ..Package::new(RegistryType::Npm, "integration-package", Transport::stdio())
        }],
        ..ServerDescriptor::new(name, version)
    }
}
