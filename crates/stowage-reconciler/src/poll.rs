use std::time::Duration;

use crate::error::ReconcileError;
use crate::provider::{
    LongRunningOperation, OperationStatus, ProviderClient, ProviderError, ProviderErrorKind,
};

/// Bounded exponential backoff for long-running operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
            max_attempts: 60,
        }
    }
}

impl PollPolicy {
    /// Delay before poll number `attempt + 1`. A provider `Retry-After`
    /// hint replaces the backoff but is still capped at `max_delay`.
    pub fn delay(&self, attempt: u32, hint: Option<Duration>) -> Duration {
        match hint {
            Some(hint) => hint.min(self.max_delay),
            None => self
                .initial_delay
                .saturating_mul(2u32.saturating_pow(attempt))
                .min(self.max_delay),
        }
    }

    /// Poll `operation` until it reaches a terminal status.
    pub async fn wait(
        &self,
        provider: &dyn ProviderClient,
        operation: &LongRunningOperation,
        name: &str,
    ) -> Result<(), ReconcileError> {
        for attempt in 0..self.max_attempts {
            let status = provider
                .poll_operation(operation)
                .await
                .map_err(ReconcileError::transport("Failed to create account"))?;

            match status {
                OperationStatus::Succeeded => {
                    tracing::debug!(name = %name, attempt, "operation succeeded");
                    return Ok(());
                }
                OperationStatus::Failed(message) => {
                    return Err(ReconcileError::Transport {
                        context: "Failed to create account".to_string(),
                        source: ProviderError::new(ProviderErrorKind::OperationFailed, message),
                    });
                }
                OperationStatus::InProgress { .. } if attempt + 1 == self.max_attempts => {
                    tracing::debug!(name = %name, attempt, "operation still in progress, giving up");
                }
                OperationStatus::InProgress { retry_after } => {
                    let delay = self.delay(attempt, retry_after.or(operation.retry_after));
                    tracing::debug!(
                        name = %name,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "operation in progress"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }

        Err(ReconcileError::Timeout {
            name: name.to_string(),
            attempts: self.max_attempts,
        })
    }
}
