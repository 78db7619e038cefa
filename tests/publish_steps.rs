//! Behaviour tests for the publish pipeline.

use std::sync::Arc;

use chrono::Duration;
use eyre::{WrapErr, eyre};
use mockable::DefaultClock;
use publish_gate::{
    auth::{
        adapters::{JwtCredentialVerifier, JwtTokenIssuer},
        domain::{AuthMethod, IdentityClaims, Permission},
    },
    server::{
        adapters::InMemoryServerRepository,
        domain::{Package, PublishedServer, RegistryType, ServerDescriptor, Transport},
        ports::ServerRepository,
        services::{PublishError, PublishErrorKind, PublishService},
    },
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

const SECRET: &[u8] = b"behaviour-test-secret";

type TestService = PublishService<JwtCredentialVerifier, InMemoryServerRepository, DefaultClock>;

struct PublishWorld {
    service: TestService,
    repository: Arc<InMemoryServerRepository>,
    issuer: JwtTokenIssuer<DefaultClock>,
    bearer: Option<String>,
    pending: Option<ServerDescriptor>,
    last_result: Option<Result<PublishedServer, PublishError>>,
}

impl PublishWorld {
    fn new() -> Self {
        let repository = Arc::new(InMemoryServerRepository::new());
        let clock = Arc::new(DefaultClock);
        let service = PublishService::new(
            Arc::new(JwtCredentialVerifier::hs256(SECRET)),
            Arc::clone(&repository),
            Arc::clone(&clock),
        );

        Self {
            service,
            repository,
            issuer: JwtTokenIssuer::hs256(SECRET, Duration::minutes(5), clock),
            bearer: None,
            pending: None,
            last_result: None,
        }
    }

    fn pending(&self) -> Result<&ServerDescriptor, eyre::Report> {
        self.pending
            .as_ref()
            .ok_or_else(|| eyre!("pending descriptor should exist"))
    }

    fn publish(&mut self, descriptor: ServerDescriptor, with_credential: bool) {
        let header = if with_credential {
            self.bearer.as_deref()
        } else {
            None
        };
        let result = run_async(self.service.publish_descriptor(descriptor, header));
        self.last_result = Some(result);
    }

    fn stored_versions(&self, name: &str) -> Result<Vec<PublishedServer>, eyre::Report> {
        run_async(self.repository.list_versions(name)).wrap_err("listing should succeed")
    }
}

#[fixture]
fn world() -> PublishWorld {
    PublishWorld::new()
}

fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

fn error_label(kind: PublishErrorKind) -> String {
    match kind {
        PublishErrorKind::InvalidDescriptor(descriptor_kind) => descriptor_kind.as_str().to_owned(),
        other => format!("{other:?}"),
    }
}

fn descriptor_at(name: &str, version: &str) -> ServerDescriptor {
    ServerDescriptor {
        description: "Behaviour test server".to_owned(),
        packages: vec![Package {
            version: Some(version.to_owned()),
            ..Package::new(RegistryType::Pypi, "weather-mcp", Transport::stdio())
        }],
        ..ServerDescriptor::new(name, version)
    }
}

#[given(r#"a publisher allowed to publish "{pattern}""#)]
fn publisher_with_pattern(world: &mut PublishWorld, pattern: String) -> Result<(), eyre::Report> {
    let claims = IdentityClaims::new(AuthMethod::GitHubAccessToken, "behaviour-user")
        .with_permission(Permission::publish(pattern));
    let token = world
        .issuer
        .issue(&claims)
        .wrap_err("token should be issued")?;
    world.bearer = Some(format!("Bearer {token}"));
    Ok(())
}

#[given(r#"a descriptor named "{name}" at version "{version}""#)]
fn descriptor_definition(world: &mut PublishWorld, name: String, version: String) {
    world.pending = Some(descriptor_at(&name, &version));
}

#[when("the descriptor is published")]
fn publish_pending(world: &mut PublishWorld) -> Result<(), eyre::Report> {
    let descriptor = world.pending()?.clone();
    world.publish(descriptor, true);
    Ok(())
}

#[when("the descriptor is published without credentials")]
fn publish_pending_anonymously(world: &mut PublishWorld) -> Result<(), eyre::Report> {
    let descriptor = world.pending()?.clone();
    world.publish(descriptor, false);
    Ok(())
}

#[when(r#"version "{version}" is published"#)]
fn publish_other_version(world: &mut PublishWorld, version: String) -> Result<(), eyre::Report> {
    let name = world.pending()?.name.clone();
    world.publish(descriptor_at(&name, &version), true);
    match &world.last_result {
        Some(Ok(_)) => Ok(()),
        other => Err(eyre!("expected version {version} to publish, got {other:?}")),
    }
}

#[then("the publish succeeds")]
fn publish_succeeds(world: &PublishWorld) -> Result<(), eyre::Report> {
    match &world.last_result {
        Some(Ok(_)) => Ok(()),
        other => Err(eyre!("expected a stored record, got {other:?}")),
    }
}

#[then(r#"the publish fails with "{label}""#)]
fn publish_fails_with(world: &PublishWorld, label: String) -> Result<(), eyre::Report> {
    let error = match &world.last_result {
        Some(Err(error)) => error,
        other => return Err(eyre!("expected a rejection, got {other:?}")),
    };
    let actual = error_label(error.kind());
    if actual != label {
        return Err(eyre!("expected rejection '{label}', got '{actual}': {error}"));
    }
    Ok(())
}

#[then(r#""{name}" has {count:usize} stored versions"#)]
fn stored_version_count(
    world: &PublishWorld,
    name: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let stored = world.stored_versions(&name)?;
    if stored.len() != count {
        return Err(eyre!("expected {count} versions, got {}", stored.len()));
    }
    Ok(())
}

#[then(r#"version "{version}" of "{name}" is the latest"#)]
fn version_is_latest(world: &PublishWorld, version: String, name: String) -> Result<(), eyre::Report> {
    let latest: Vec<String> = world
        .stored_versions(&name)?
        .iter()
        .filter(|record| record.is_latest())
        .map(|record| record.version().to_owned())
        .collect();
    if latest != [version.clone()] {
        return Err(eyre!("expected only {version} to be latest, got {latest:?}"));
    }
    Ok(())
}

#[scenario(path = "tests/features/publish.feature", name = "Publish a new server version")]
#[tokio::test(flavor = "multi_thread")]
async fn publish_new_version(world: PublishWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/publish.feature",
    name = "Reject publishing outside the granted namespace"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reject_foreign_namespace(world: PublishWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/publish.feature", name = "Reject a version range")]
#[tokio::test(flavor = "multi_thread")]
async fn reject_version_range(world: PublishWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/publish.feature",
    name = "Reject a request without credentials"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reject_missing_credentials(world: PublishWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/publish.feature",
    name = "Reject a duplicate version and keep the newest as latest"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reject_duplicate_version(world: PublishWorld) {
    let _ = world;
}
