use console_domain::{ConsoleError, ManagedActivity, SchedulerData, Status};
use serde_json::json;

fn sample_snapshot_json() -> serde_json::Value {
    json!({
        "Name": "MainScheduler",
        "Status": "mixed",
        "InstanceId": "NON_CLUSTERED",
        "RunningSince": {
            "Ticks": 638412345678901234i64,
            "UtcDateStr": "2026-02-01 10:15:00",
            "ServerDateStr": "2026-02-01 12:15:00"
        },
        "JobsTotal": 2,
        "JobsExecuted": 17,
        "CanStart": false,
        "CanShutdown": true,
        "IsRemote": false,
        "SchedulerTypeName": "StdScheduler",
        "JobGroups": [
            {
                "Name": "DEFAULT",
                "Status": "mixed",
                "CanStart": true,
                "CanPause": true,
                "Jobs": [
                    {
                        "Name": "cleanup",
                        "Status": "active",
                        "CanStart": false,
                        "CanPause": true,
                        "GroupName": "DEFAULT",
                        "UniqueName": "DEFAULT.cleanup",
                        "HasTriggers": true,
                        "Triggers": [
                            {
                                "Name": "cleanup-trigger",
                                "Status": "active",
                                "CanStart": false,
                                "CanPause": true,
                                "StartDate": {
                                    "Ticks": 638412000000000000i64,
                                    "UtcDateStr": "2026-01-31 00:00:00",
                                    "ServerDateStr": "2026-01-31 02:00:00"
                                },
                                "EndDate": null,
                                "NextFireDate": {
                                    "Ticks": 638413000000000000i64,
                                    "UtcDateStr": "2026-02-02 00:00:00",
                                    "ServerDateStr": "2026-02-02 02:00:00"
                                },
                                "PreviousFireDate": null
                            }
                        ]
                    },
                    {
                        "Name": "report",
                        "Status": "paused",
                        "CanStart": true,
                        "CanPause": false,
                        "GroupName": "DEFAULT",
                        "UniqueName": "DEFAULT.report",
                        "HasTriggers": false,
                        "Triggers": []
                    }
                ]
            }
        ]
    })
}

#[test]
fn test_snapshot_deserializes_from_pascal_case_payload() {
    let data: SchedulerData = serde_json::from_value(sample_snapshot_json()).unwrap();

    assert_eq!(data.name, "MainScheduler");
    assert_eq!(data.status, Status::Mixed);
    assert_eq!(data.instance_id, "NON_CLUSTERED");
    assert!(data.is_running());
    assert_eq!(data.running_since.date_string(), "2026-02-01 12:15:00");
    assert_eq!(data.jobs_total, 2);
    assert_eq!(data.jobs_executed, 17);
    assert!(!data.can_start);
    assert!(data.can_shutdown);
    assert_eq!(data.scheduler_type_name, "StdScheduler");

    let group = data.job_group("DEFAULT").unwrap();
    assert_eq!(group.job_count(), 2);

    let job = data.find_job("DEFAULT", "cleanup").unwrap();
    assert_eq!(job.unique_name, "DEFAULT.cleanup");
    assert!(job.has_triggers);
    let trigger = &job.triggers[0];
    assert!(trigger.end_date.is_empty());
    assert_eq!(trigger.next_fire_date.date_string(), "2026-02-02 02:00:00");
}

#[test]
fn test_aggregated_status_is_preserved_verbatim() {
    // One active and one paused job: the server reports the group as mixed
    // and the client must keep that value rather than derive its own.
    let data: SchedulerData = serde_json::from_value(sample_snapshot_json()).unwrap();

    let group = data.job_group("DEFAULT").unwrap();
    assert_eq!(group.status(), Status::Mixed);
    assert_eq!(group.jobs[0].status(), Status::Active);
    assert_eq!(group.jobs[1].status(), Status::Paused);

    // Round-tripping through the wire format changes nothing.
    let json = serde_json::to_value(&data).unwrap();
    let back: SchedulerData = serde_json::from_value(json).unwrap();
    assert_eq!(back, data);
    assert_eq!(back.job_group("DEFAULT").unwrap().status(), Status::Mixed);
}

#[test]
fn test_validate_accepts_consistent_snapshot() {
    let data: SchedulerData = serde_json::from_value(sample_snapshot_json()).unwrap();
    assert!(data.validate().is_ok());
}

#[test]
fn test_validate_rejects_duplicate_group_names() {
    let mut json = sample_snapshot_json();
    let group = json["JobGroups"][0].clone();
    json["JobGroups"].as_array_mut().unwrap().push(group);

    let data: SchedulerData = serde_json::from_value(json).unwrap();
    let error = data.validate().unwrap_err();
    assert!(matches!(error, ConsoleError::SnapshotIntegrity(_)));
    assert!(error.to_string().contains("DEFAULT"));
}

#[test]
fn test_validate_rejects_duplicate_job_names_within_group() {
    let mut json = sample_snapshot_json();
    let job = json["JobGroups"][0]["Jobs"][0].clone();
    json["JobGroups"][0]["Jobs"].as_array_mut().unwrap().push(job);

    let data: SchedulerData = serde_json::from_value(json).unwrap();
    assert!(matches!(
        data.validate().unwrap_err(),
        ConsoleError::SnapshotIntegrity(_)
    ));
}

#[test]
fn test_validate_rejects_mismatched_group_back_reference() {
    let mut json = sample_snapshot_json();
    json["JobGroups"][0]["Jobs"][0]["GroupName"] = json!("OTHER");

    let data: SchedulerData = serde_json::from_value(json).unwrap();
    let error = data.validate().unwrap_err();
    assert!(error.to_string().contains("OTHER"));
}

#[test]
fn test_validate_rejects_duplicate_trigger_names_within_job() {
    let mut json = sample_snapshot_json();
    let trigger = json["JobGroups"][0]["Jobs"][0]["Triggers"][0].clone();
    json["JobGroups"][0]["Jobs"][0]["Triggers"]
        .as_array_mut()
        .unwrap()
        .push(trigger);

    let data: SchedulerData = serde_json::from_value(json).unwrap();
    assert!(matches!(
        data.validate().unwrap_err(),
        ConsoleError::SnapshotIntegrity(_)
    ));
}

#[test]
fn test_unknown_status_code_in_payload_fails_decode() {
    let mut json = sample_snapshot_json();
    json["JobGroups"][0]["Status"] = json!("sleeping");

    let result = serde_json::from_value::<SchedulerData>(json);
    assert!(result.is_err());
}
