use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use stowage_arm::operations::{
    async_status, LongRunningOperation, OperationMonitor, OperationStatus,
};
use stowage_arm::wire::AsyncOperationStatus;

fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.insert(*name, HeaderValue::from_static(*value));
    }
    map
}

#[test]
fn synchronous_create_is_completed() {
    let op = LongRunningOperation::from_response(StatusCode::OK, &HeaderMap::new());
    assert_eq!(op.monitor, OperationMonitor::Completed);
}

#[test]
fn accepted_create_prefers_async_operation_header() {
    let op = LongRunningOperation::from_response(
        StatusCode::ACCEPTED,
        &headers(&[
            ("azure-asyncoperation", "https://management.azure.com/ops/1"),
            ("location", "https://management.azure.com/ops/1/result"),
            ("retry-after", "17"),
        ]),
    );
    assert_eq!(
        op.monitor,
        OperationMonitor::AsyncOperation("https://management.azure.com/ops/1".into())
    );
    assert_eq!(op.retry_after, Some(Duration::from_secs(17)));
}

#[test]
fn accepted_create_falls_back_to_location() {
    let op = LongRunningOperation::from_response(
        StatusCode::ACCEPTED,
        &headers(&[("location", "https://management.azure.com/ops/2")]),
    );
    assert_eq!(
        op.monitor,
        OperationMonitor::Location("https://management.azure.com/ops/2".into())
    );
    assert_eq!(op.retry_after, None);
}

#[test]
fn async_status_mapping() {
    let parse = |v: serde_json::Value| serde_json::from_value::<AsyncOperationStatus>(v).unwrap();

    assert_eq!(
        async_status(parse(serde_json::json!({"status": "InProgress"})), None),
        OperationStatus::InProgress { retry_after: None }
    );
    assert_eq!(
        async_status(parse(serde_json::json!({"status": "Succeeded"})), None),
        OperationStatus::Succeeded
    );
    assert_eq!(
        async_status(
            parse(serde_json::json!({
                "status": "Failed",
                "error": {"code": "StorageAccountOperationFailed", "message": "quota exceeded"}
            })),
            None
        ),
        OperationStatus::Failed("quota exceeded".into())
    );
    assert_eq!(
        async_status(parse(serde_json::json!({"status": "Canceled"})), None),
        OperationStatus::Failed("operation canceled".into())
    );
}
