use std::sync::Arc;
use std::time::Duration;

use console_app::{ApplicationModel, SchedulerController};
use console_dispatcher::CommandDispatcher;
use console_domain::{SchedulerData, Status};
use console_errors::ConsoleError;
use console_testing_utils::{
    sample_snapshot, JobBuilder, JobGroupBuilder, MockTransport, SchedulerDataBuilder,
};
use serde_json::json;

fn wire_up(transport: MockTransport) -> (Arc<ApplicationModel>, SchedulerController) {
    let model = Arc::new(ApplicationModel::new());
    let dispatcher = Arc::new(CommandDispatcher::new(Arc::new(transport)));
    let controller = SchedulerController::new(Arc::clone(&model), dispatcher);
    (model, controller)
}

/// Snapshot as the server would report it after pausing DEFAULT.cleanup:
/// the job paused, the group aggregate mixed.
fn paused_job_snapshot() -> SchedulerData {
    SchedulerDataBuilder::new()
        .with_status(Status::Mixed)
        .with_group(
            JobGroupBuilder::new("DEFAULT")
                .with_status(Status::Mixed)
                .with_job(
                    JobBuilder::new("DEFAULT", "cleanup")
                        .with_status(Status::Paused)
                        .with_permissions(true, false)
                        .build(),
                )
                .with_job(JobBuilder::new("DEFAULT", "report").build())
                .build(),
        )
        .build()
}

#[tokio::test]
async fn test_refresh_applies_snapshot_to_model() {
    let transport = MockTransport::new();
    let snapshot = sample_snapshot();
    transport.push_response("get_data", serde_json::to_value(&snapshot).unwrap());

    let (model, controller) = wire_up(transport);
    let applied = controller.refresh().await.unwrap().unwrap();

    assert_eq!(*applied, snapshot);
    assert_eq!(*model.current().await.unwrap(), snapshot);
}

#[tokio::test]
async fn test_pause_job_applies_returned_snapshot_verbatim() {
    let transport = MockTransport::new();
    let updated = paused_job_snapshot();
    transport.push_response("pause_job", serde_json::to_value(&updated).unwrap());

    let (model, controller) = wire_up(transport.clone());
    controller.pause_job("DEFAULT", "cleanup").await.unwrap();

    let held = model.current().await.unwrap();
    assert_eq!(*held, updated);
    // The mixed aggregate comes straight from the payload, not recomputed
    assert_eq!(held.job_group("DEFAULT").unwrap().status, Status::Mixed);
    assert_eq!(
        held.find_job("DEFAULT", "cleanup").unwrap().status,
        Status::Paused
    );

    assert_eq!(
        transport.requests()[0].payload,
        json!({ "group": "DEFAULT", "job": "cleanup" })
    );
}

#[tokio::test]
async fn test_command_failure_leaves_model_untouched() {
    let transport = MockTransport::new();
    let initial = sample_snapshot();
    transport.push_response("get_data", serde_json::to_value(&initial).unwrap());
    transport.push_error(
        "pause_group",
        ConsoleError::server_failure("group not found"),
    );

    let (model, controller) = wire_up(transport);
    controller.refresh().await.unwrap();

    let error = controller.pause_group("DEFAULT").await.unwrap_err();
    assert!(matches!(error, ConsoleError::ServerFailure(_)));
    assert_eq!(*model.current().await.unwrap(), initial);
}

#[tokio::test]
async fn test_invalid_snapshot_is_rejected_before_apply() {
    let transport = MockTransport::new();
    let mut json = serde_json::to_value(sample_snapshot()).unwrap();
    let group = json["JobGroups"][0].clone();
    json["JobGroups"].as_array_mut().unwrap().push(group);
    transport.push_response("get_data", json);

    let (model, controller) = wire_up(transport);
    let error = controller.refresh().await.unwrap_err();

    assert!(matches!(error, ConsoleError::SnapshotIntegrity(_)));
    assert!(model.current().await.is_none());
}

#[tokio::test]
async fn test_stale_snapshot_is_discarded_on_out_of_order_completion() {
    let transport = MockTransport::new();
    let stale = sample_snapshot();
    let fresh = paused_job_snapshot();
    // The earlier-issued refresh completes after the later pause command.
    transport.push_delayed_response(
        "get_data",
        Duration::from_millis(150),
        serde_json::to_value(&stale).unwrap(),
    );
    transport.push_response("pause_job", serde_json::to_value(&fresh).unwrap());

    let (model, controller) = wire_up(transport);
    let controller = Arc::new(controller);

    let slow_refresh = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.refresh().await })
    };
    // Let the refresh take its ticket before issuing the pause.
    tokio::time::sleep(Duration::from_millis(30)).await;

    let applied = controller.pause_job("DEFAULT", "cleanup").await.unwrap();
    assert!(applied.is_some());

    let refresh_outcome = slow_refresh.await.unwrap().unwrap();
    assert!(refresh_outcome.is_none(), "stale snapshot must be discarded");

    // Last-issued command wins; the old full snapshot never clobbers it.
    assert_eq!(*model.current().await.unwrap(), fresh);
}

#[tokio::test]
async fn test_job_details_does_not_touch_the_model() {
    let transport = MockTransport::new();
    transport.push_response(
        "get_job_details",
        json!({
            "JobDataMap": [
                { "Name": "connection", "TypeName": "String", "Value": "db://main" }
            ],
            "JobProperties": [
                { "Name": "Durable", "TypeName": "Boolean", "Value": "True" }
            ]
        }),
    );

    let (model, controller) = wire_up(transport.clone());
    let details = controller.job_details("DEFAULT", "cleanup").await.unwrap();

    assert_eq!(details.job_data_map.len(), 1);
    assert_eq!(details.job_data_map[0].name, "connection");
    assert_eq!(details.job_properties[0].value, "True");
    assert!(model.current().await.is_none());
    assert_eq!(transport.request_codes(), vec!["get_job_details"]);
}

#[tokio::test]
async fn test_blank_payload_field_fails_without_dispatch() {
    let transport = MockTransport::new();
    let (_, controller) = wire_up(transport.clone());

    let error = controller.pause_trigger("DEFAULT", "").await.unwrap_err();
    assert!(matches!(error, ConsoleError::InvalidCommandPayload { .. }));
    assert_eq!(transport.request_count(), 0);
}
