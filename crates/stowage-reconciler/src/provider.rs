use std::future::Future;
use std::pin::Pin;

use stowage_core::models::{AccountUpdate, ObservedState};
use thiserror::Error;

pub use stowage_arm::operations::{LongRunningOperation, OperationMonitor, OperationStatus};

use crate::plan::CreatePlan;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// What went wrong talking to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// The addressed resource does not exist.
    NotFound,
    /// The provider answered with an error status.
    Api { status: u16, code: Option<String> },
    /// A long-running operation reported failure.
    OperationFailed,
    /// Connection, decoding or signing failure.
    Transport,
}

/// Tagged provider failure, returned as a value from every client call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::NotFound, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Transport, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ProviderErrorKind::NotFound
    }
}

/// Answer to a name availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameAvailability {
    pub available: bool,
    pub reason: Option<String>,
    pub message: Option<String>,
}

/// Authenticated handle to the storage control plane.
///
/// Methods return boxed futures so the reconciler can hold a
/// `&dyn ProviderClient`.
pub trait ProviderClient: Send + Sync {
    /// Location of the resource group, used when no location is given.
    fn resource_group_location<'a>(
        &'a self,
        resource_group: &'a str,
    ) -> BoxFuture<'a, Result<String, ProviderError>>;

    /// Current account state. A missing account is a `NotFound` error.
    fn get_properties<'a>(
        &'a self,
        resource_group: &'a str,
        name: &'a str,
    ) -> BoxFuture<'a, Result<ObservedState, ProviderError>>;

    fn check_name_availability<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<NameAvailability, ProviderError>>;

    /// Start creating the account described by `plan`.
    fn create<'a>(
        &'a self,
        plan: &'a CreatePlan,
    ) -> BoxFuture<'a, Result<LongRunningOperation, ProviderError>>;

    /// Check once on a long-running operation.
    fn poll_operation<'a>(
        &'a self,
        operation: &'a LongRunningOperation,
    ) -> BoxFuture<'a, Result<OperationStatus, ProviderError>>;

    /// Apply one single-field change.
    fn update<'a>(
        &'a self,
        resource_group: &'a str,
        name: &'a str,
        update: &'a AccountUpdate,
    ) -> BoxFuture<'a, Result<(), ProviderError>>;

    fn delete<'a>(
        &'a self,
        resource_group: &'a str,
        name: &'a str,
    ) -> BoxFuture<'a, Result<(), ProviderError>>;

    /// Account access keys, primary first.
    fn list_keys<'a>(
        &'a self,
        resource_group: &'a str,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Vec<String>, ProviderError>>;

    /// Blob container names, listed with a data-plane client built from
    /// `key`. `NotFound` when the account has no blob service.
    fn list_containers<'a>(
        &'a self,
        name: &'a str,
        key: &'a str,
    ) -> BoxFuture<'a, Result<Vec<String>, ProviderError>>;
}
