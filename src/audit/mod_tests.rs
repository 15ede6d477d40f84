//! Tests for the audit log.

use super::*;
use tempfile::TempDir;

fn record(timestamp: u64, command_line: &str) -> OperationRecord {
    OperationRecord {
        timestamp,
        user: "ops".to_string(),
        command_line: command_line.to_string(),
    }
}

mod operation_record {
    use super::*;

    #[test]
    fn display_is_space_separated() {
        let entry = record(1_700_000_000, "elastic-trib nodes exclude 10.0.0.1");

        assert_eq!(
            entry.to_string(),
            "1700000000 ops elastic-trib nodes exclude 10.0.0.1"
        );
    }

    #[test]
    fn now_stamps_current_time() {
        let before = unix_timestamp_now();
        let entry = OperationRecord::now("elastic-trib nodes include 10.0.0.1");

        assert!(entry.timestamp >= before);
        assert!(!entry.user.is_empty());
        assert_eq!(entry.command_line, "elastic-trib nodes include 10.0.0.1");
    }
}

mod file_audit_log {
    use super::*;

    #[tokio::test]
    async fn appends_one_line_per_record() {
        let dir = TempDir::new().unwrap();
        let log = FileAuditLog::new(dir.path().join("audit.log"));

        log.record(&record(1, "first")).await.unwrap();
        log.record(&record(2, "second")).await.unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(content, "1 ops first\n2 ops second\n");
    }

    #[tokio::test]
    async fn keeps_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("audit.log");
        std::fs::write(&path, "0 root earlier\n").unwrap();

        FileAuditLog::new(&path)
            .record(&record(3, "later"))
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "0 root earlier\n3 ops later\n");
    }

    #[tokio::test]
    async fn creates_missing_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("dir").join("audit.log");

        FileAuditLog::new(&path)
            .record(&record(4, "nested"))
            .await
            .unwrap();

        assert!(path.is_file());
    }

    #[tokio::test]
    async fn directory_path_is_open_error() {
        let dir = TempDir::new().unwrap();

        let result = FileAuditLog::new(dir.path()).record(&record(5, "x")).await;

        assert!(matches!(result, Err(AuditError::Open { .. })));
    }
}
