use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Method, StatusCode};

use crate::client::{check_status, ArmClient};
use crate::error::ArmError;
use crate::wire::AsyncOperationStatus;

const AZURE_ASYNC_OPERATION: &str = "azure-asyncoperation";

/// Where to poll for the outcome of an accepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationMonitor {
    /// The request finished synchronously.
    Completed,
    /// `Azure-AsyncOperation`: status document with an explicit `status`.
    AsyncOperation(String),
    /// `Location`: 202 while running, 200/204 when done.
    Location(String),
}

/// Handle to a long-running provider operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongRunningOperation {
    pub monitor: OperationMonitor,
    pub retry_after: Option<Duration>,
}

impl LongRunningOperation {
    /// Build a handle from the headers of a 2xx response.
    pub fn from_response(status: StatusCode, headers: &HeaderMap) -> Self {
        let retry_after = retry_after(headers);
        if status != StatusCode::ACCEPTED {
            return Self {
                monitor: OperationMonitor::Completed,
                retry_after,
            };
        }

        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };

        let monitor = if let Some(url) = header(AZURE_ASYNC_OPERATION) {
            OperationMonitor::AsyncOperation(url)
        } else if let Some(url) = header("location") {
            OperationMonitor::Location(url)
        } else {
            OperationMonitor::Completed
        };

        Self {
            monitor,
            retry_after,
        }
    }
}

/// Progress reported by one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationStatus {
    InProgress { retry_after: Option<Duration> },
    Succeeded,
    Failed(String),
}

fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Map an `Azure-AsyncOperation` status string.
pub fn async_status(body: AsyncOperationStatus, retry_after: Option<Duration>) -> OperationStatus {
    match body.status.as_str() {
        "Succeeded" => OperationStatus::Succeeded,
        "Failed" | "Canceled" => {
            let detail = body
                .error
                .map(|e| e.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("operation {}", body.status.to_lowercase()));
            OperationStatus::Failed(detail)
        }
        _ => OperationStatus::InProgress { retry_after },
    }
}

/// Issue one status request for `operation`.
pub async fn poll(
    client: &ArmClient,
    operation: &LongRunningOperation,
) -> Result<OperationStatus, ArmError> {
    match &operation.monitor {
        OperationMonitor::Completed => Ok(OperationStatus::Succeeded),
        OperationMonitor::AsyncOperation(url) => {
            let response = check_status(client.request(Method::GET, url).send().await?).await?;
            let hint = retry_after(response.headers());
            let body: AsyncOperationStatus = serde_json::from_slice(&response.bytes().await?)?;
            tracing::debug!(status = %body.status, "async operation status");
            Ok(async_status(body, hint))
        }
        OperationMonitor::Location(url) => {
            let response = check_status(client.request(Method::GET, url).send().await?).await?;
            let status = response.status();
            tracing::debug!(status = %status, "location poll");
            if status == StatusCode::ACCEPTED {
                Ok(OperationStatus::InProgress {
                    retry_after: retry_after(response.headers()),
                })
            } else {
                Ok(OperationStatus::Succeeded)
            }
        }
    }
}
