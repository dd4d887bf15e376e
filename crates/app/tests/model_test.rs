use std::sync::Arc;

use console_app::ApplicationModel;
use console_testing_utils::{recv_or_timeout, sample_snapshot};

#[tokio::test]
async fn test_set_data_replaces_snapshot_without_transformation() {
    let model = ApplicationModel::new();
    assert!(model.current().await.is_none());

    let snapshot = sample_snapshot();
    model.set_data(snapshot.clone()).await;

    let held = model.current().await.unwrap();
    assert_eq!(*held, snapshot);
}

#[tokio::test]
async fn test_set_data_emits_exactly_one_notification() {
    let model = ApplicationModel::new();
    let mut changes = model.subscribe();

    let snapshot = sample_snapshot();
    model.set_data(snapshot.clone()).await;

    let published = recv_or_timeout(&mut changes, 200).await.unwrap();
    assert_eq!(*published, snapshot);
    assert!(recv_or_timeout(&mut changes, 50).await.is_none());
}

#[tokio::test]
async fn test_reapplying_the_same_snapshot_is_idempotent() {
    let model = ApplicationModel::new();
    let snapshot = sample_snapshot();

    model.set_data(snapshot.clone()).await;
    let after_first = model.current().await.unwrap();
    model.set_data(snapshot.clone()).await;
    let after_second = model.current().await.unwrap();

    assert_eq!(after_first, after_second);
    assert_eq!(*after_second, snapshot);
}

#[tokio::test]
async fn test_every_subscriber_receives_the_identical_snapshot() {
    let model = ApplicationModel::new();
    let mut first = model.subscribe();
    let mut second = model.subscribe();

    let published = model.set_data(sample_snapshot()).await;

    let seen_a = recv_or_timeout(&mut first, 200).await.unwrap();
    let seen_b = recv_or_timeout(&mut second, 200).await.unwrap();
    assert!(Arc::ptr_eq(&seen_a, &published));
    assert!(Arc::ptr_eq(&seen_b, &published));
}
