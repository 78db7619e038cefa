//! Version uniqueness and latest-version tracking.

use super::helpers::{Harness, descriptor, harness};
use publish_gate::server::{ports::ServerRepository, services::PublishErrorKind};
use rstest::rstest;

const NAME: &str = "com.example/versioned";

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_version_is_rejected(harness: Harness) {
    let bearer = harness.bearer_for("com.example/*").expect("token issued");
    harness
        .service
        .publish_descriptor(descriptor(NAME, "1.0.0"), Some(&bearer))
        .await
        .expect("first publish should succeed");

    let err = harness
        .service
        .publish_descriptor(descriptor(NAME, "1.0.0"), Some(&bearer))
        .await
        .expect_err("duplicate rejected");

    assert_eq!(err.kind(), PublishErrorKind::DuplicateVersion);
    assert_eq!(
        err.to_string(),
        "invalid version: cannot publish duplicate version 1.0.0 of com.example/versioned"
    );
    let stored = harness.repository.list_versions(NAME).await.expect("listing");
    assert_eq!(stored.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn newest_version_becomes_latest(harness: Harness) {
    let bearer = harness.bearer_for("com.example/*").expect("token issued");
    for version in ["1.0.0", "1.1.0", "2.0.0"] {
        harness
            .service
            .publish_descriptor(descriptor(NAME, version), Some(&bearer))
            .await
            .expect("publish should succeed");
    }

    let stored = harness.repository.list_versions(NAME).await.expect("listing");

    let summary: Vec<(&str, bool)> = stored
        .iter()
        .map(|record| (record.version(), record.is_latest()))
        .collect();
    assert_eq!(
        summary,
        vec![("1.0.0", false), ("1.1.0", false), ("2.0.0", true)]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn same_version_of_different_servers_is_allowed(harness: Harness) {
    let bearer = harness.bearer_for("com.example/*").expect("token issued");

    for name in ["com.example/alpha", "com.example/beta"] {
        let record = harness
            .service
            .publish_descriptor(descriptor(name, "1.0.0"), Some(&bearer))
            .await
            .expect("publish should succeed");
        assert!(record.is_latest());
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_publishes_of_one_version_admit_exactly_one(harness: Harness) {
    let bearer = harness.bearer_for("com.example/*").expect("token issued");

    let attempts: Vec<_> = (0..8)
        .map(|_| {
            let service = harness.service.clone();
            let header = bearer.clone();
            tokio::spawn(async move {
                service
                    .publish_descriptor(descriptor(NAME, "3.0.0"), Some(&header))
                    .await
            })
        })
        .collect();

    let mut accepted = 0;
    let mut duplicates = 0;
    for attempt in attempts {
        match attempt.await.expect("task should not panic") {
            Ok(_) => accepted += 1,
            Err(err) if err.kind() == PublishErrorKind::DuplicateVersion => duplicates += 1,
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    assert_eq!((accepted, duplicates), (1, 7));
    let stored = harness.repository.list_versions(NAME).await.expect("listing");
    assert_eq!(stored.len(), 1);
}
