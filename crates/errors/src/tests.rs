#[cfg(test)]
mod error_tests {
    use crate::*;

    #[test]
    fn test_console_error_display() {
        // Test UnknownStatusCode error
        let status_error = ConsoleError::unknown_status_code("sleeping");
        assert_eq!(status_error.to_string(), "未知的状态码: sleeping");

        // Test InvalidCommandPayload error
        let payload_error = ConsoleError::invalid_payload("pause_job", "job");
        assert_eq!(payload_error.to_string(), "命令参数无效: pause_job 缺少 job");

        // Test Network error
        let network_error = ConsoleError::network_error("Connection refused");
        assert_eq!(network_error.to_string(), "网络错误: Connection refused");

        // Test ServerFailure error
        let server_error = ConsoleError::server_failure("Scheduler is shut down");
        assert_eq!(server_error.to_string(), "服务端错误: Scheduler is shut down");

        // Test MalformedResponse error
        let decode_error = ConsoleError::malformed_response("missing field `Name`");
        assert_eq!(
            decode_error.to_string(),
            "响应格式错误: missing field `Name`"
        );

        // Test Timeout error
        let timeout_error = ConsoleError::Timeout {
            command: "get_data".to_string(),
            timeout_seconds: 30,
        };
        assert_eq!(timeout_error.to_string(), "命令执行超时: get_data (30秒)");

        // Test SnapshotIntegrity error
        let integrity_error = ConsoleError::snapshot_integrity("duplicate group name: DEFAULT");
        assert_eq!(
            integrity_error.to_string(),
            "快照数据不一致: duplicate group name: DEFAULT"
        );
    }

    #[test]
    fn test_bootstrap_failure_wraps_source() {
        let source = ConsoleError::network_error("Connection refused");
        let error = ConsoleError::bootstrap_failure("environment", source);

        assert_eq!(
            error.to_string(),
            "启动序列失败: 阶段 environment: 网络错误: Connection refused"
        );
        // The source error stays reachable for callers walking the chain
        let ConsoleError::BootstrapSequence { phase, source } = error else {
            panic!("expected BootstrapSequence");
        };
        assert_eq!(phase, "environment");
        assert!(matches!(*source, ConsoleError::Network(_)));
    }

    #[test]
    fn test_transport_failure_classification() {
        assert!(ConsoleError::network_error("x").is_transport_failure());
        assert!(ConsoleError::server_failure("x").is_transport_failure());
        assert!(ConsoleError::malformed_response("x").is_transport_failure());
        assert!(ConsoleError::Timeout {
            command: "get_data".to_string(),
            timeout_seconds: 30,
        }
        .is_transport_failure());

        assert!(!ConsoleError::invalid_payload("pause_group", "group").is_transport_failure());
        assert!(!ConsoleError::unknown_status_code("x").is_transport_failure());
        assert!(!ConsoleError::snapshot_integrity("x").is_transport_failure());
    }

    #[test]
    fn test_retryable_and_local_classification() {
        assert!(ConsoleError::network_error("x").is_retryable());
        assert!(!ConsoleError::server_failure("x").is_retryable());

        assert!(ConsoleError::invalid_payload("pause_job", "group").is_local());
        assert!(ConsoleError::unknown_status_code("x").is_local());
        assert!(!ConsoleError::network_error("x").is_local());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let error: ConsoleError = json_error.into();
        assert!(matches!(error, ConsoleError::Serialization(_)));
    }
}
