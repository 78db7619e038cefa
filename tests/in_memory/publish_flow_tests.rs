//! End-to-end publish flow through JWT verification and in-memory storage.

use std::sync::Arc;

use super::helpers::{Harness, SECRET, descriptor, harness};
use chrono::Duration;
use mockable::DefaultClock;
use publish_gate::{
    auth::{
        adapters::JwtTokenIssuer,
        domain::{AuthMethod, IdentityClaims, Permission, PermissionAction},
        ports::CredentialError,
    },
    server::{
        domain::DescriptorErrorKind,
        ports::ServerRepository,
        services::{PublishError, PublishErrorKind},
    },
};
use rstest::rstest;
use tracing_subscriber::EnvFilter;

const NAME: &str = "io.github.example/weather";

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn published_descriptor_can_be_found(harness: Harness) {
    let bearer = harness.bearer_for("io.github.example/*").expect("token issued");

    let record = harness
        .service
        .publish_descriptor(descriptor(NAME, "1.0.0"), Some(&bearer))
        .await
        .expect("publish should succeed");

    let stored = harness
        .repository
        .find_by_name_and_version(NAME, "1.0.0")
        .await
        .expect("lookup should succeed")
        .expect("record should exist");
    assert_eq!(stored, record);
    assert!(stored.is_latest());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn raw_json_body_is_published(harness: Harness) {
    let bearer = harness.bearer_for("*").expect("token issued");
    let body = br#"{
        "name": "io.github.example/weather",
        "description": "Weather lookups",
        "version": "2.1.0",
        "repository": {"url": "https://github.com/example/weather", "source": "github"},
        "packages": [{
            "registryType": "npm",
            "registryBaseUrl": "https://registry.npmjs.org",
            "identifier": "@example/weather",
            "version": "2.1.0",
            "transport": {"type": "stdio"},
            "packageArguments": [{"type": "named", "name": "--units", "default": "metric"}],
            "environmentVariables": [{"name": "WEATHER_API_KEY", "isSecret": true}]
        }],
        "remotes": [{"type": "streamable-http", "url": "https://weather.example.github.io/mcp"}]
    }"#;

    let record = harness
        .service
        .publish(body, Some(&bearer))
        .await
        .expect("publish should succeed");

    assert_eq!(record.name(), NAME);
    assert_eq!(record.version(), "2.1.0");
    assert_eq!(record.server().packages.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn token_signed_with_another_secret_is_rejected(harness: Harness) {
    let foreign = JwtTokenIssuer::hs256(b"another-secret", Duration::hours(1), Arc::new(DefaultClock));
    let claims = IdentityClaims::new(AuthMethod::GitHubOidc, "intruder")
        .with_permission(Permission::publish("*"));
    let bearer = format!("Bearer {}", foreign.issue(&claims).expect("token issued"));

    let err = harness
        .service
        .publish_descriptor(descriptor(NAME, "1.0.0"), Some(&bearer))
        .await
        .expect_err("token rejected");

    assert!(matches!(
        err,
        PublishError::InvalidCredential(CredentialError::InvalidSignature)
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expired_token_is_rejected(harness: Harness) {
    let stale = JwtTokenIssuer::hs256(SECRET, Duration::hours(-2), Arc::new(DefaultClock));
    let claims = IdentityClaims::new(AuthMethod::Dns, "example.github.io")
        .with_permission(Permission::publish("io.github.example/*"));
    let bearer = format!("Bearer {}", stale.issue(&claims).expect("token issued"));

    let err = harness
        .service
        .publish_descriptor(descriptor(NAME, "1.0.0"), Some(&bearer))
        .await
        .expect_err("token rejected");

    assert!(matches!(
        err,
        PublishError::InvalidCredential(CredentialError::Expired)
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn garbage_token_is_rejected(harness: Harness) {
    let err = harness
        .service
        .publish_descriptor(descriptor(NAME, "1.0.0"), Some("Bearer invalidToken"))
        .await
        .expect_err("token rejected");

    assert_eq!(err.kind(), PublishErrorKind::InvalidCredential);
}

#[rstest]
#[case("io.github.other/*")]
#[case("io.github.example")]
#[case("io.github.exam/*")]
#[tokio::test(flavor = "multi_thread")]
async fn names_outside_granted_namespace_are_forbidden(harness: Harness, #[case] pattern: &str) {
    let bearer = harness.bearer_for(pattern).expect("token issued");

    let err = harness
        .service
        .publish_descriptor(descriptor(NAME, "1.0.0"), Some(&bearer))
        .await
        .expect_err("publish forbidden");

    assert_eq!(err.kind(), PublishErrorKind::Forbidden);
    let stored = harness.repository.list_versions(NAME).await.expect("listing");
    assert!(stored.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_permission_does_not_allow_publishing(harness: Harness) {
    let claims = IdentityClaims::new(AuthMethod::GitHubAccessToken, "editor")
        .with_permission(Permission::new(PermissionAction::Edit, "*"));
    let bearer = harness.bearer_with(&claims).expect("token issued");

    let err = harness
        .service
        .publish_descriptor(descriptor(NAME, "1.0.0"), Some(&bearer))
        .await
        .expect_err("publish forbidden");

    assert_eq!(err.kind(), PublishErrorKind::Forbidden);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_descriptor_leaves_repository_untouched(harness: Harness) {
    let bearer = harness.bearer_for("io.github.example/*").expect("token issued");
    let mut invalid = descriptor(NAME, "1.0.0");
    invalid.website_url = Some("https://elsewhere.dev/docs".to_owned());

    let err = harness
        .service
        .publish_descriptor(invalid, Some(&bearer))
        .await
        .expect_err("descriptor rejected");

    assert_eq!(
        err.kind(),
        PublishErrorKind::InvalidDescriptor(DescriptorErrorKind::WebsiteDomainMismatch)
    );
    let stored = harness.repository.list_versions(NAME).await.expect("listing");
    assert!(stored.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejections_are_logged_without_failing_the_pipeline(harness: Harness) {
    let subscriber = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("publish_gate=debug"))
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let err = harness
        .service
        .publish_descriptor(descriptor(NAME, "1.0.0"), None)
        .await
        .expect_err("credential required");

    assert_eq!(err.kind(), PublishErrorKind::MissingCredential);
}
