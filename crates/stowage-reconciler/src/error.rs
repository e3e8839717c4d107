use stowage_core::models::{AccountType, ProvisioningState, UpdateField};
use stowage_core::ValidationError;
use thiserror::Error;

use crate::provider::ProviderError;

/// Every way a reconciliation can fail. All kinds are terminal for the
/// current invocation.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(
        "Error: storage account {name} has not completed provisioning. State is {state}. \
         Expecting state to be Succeeded."
    )]
    Precondition {
        name: String,
        state: ProvisioningState,
    },

    #[error("{}", immutable_message(.current, .desired))]
    ImmutableField {
        current: AccountType,
        desired: AccountType,
    },

    #[error(
        "Account {name} contains blob containers. Is it in use? Use the force option to attempt deletion."
    )]
    InUse { name: String },

    #[error("Storage account name {name} is not available: {message} - {reason}")]
    NameUnavailable {
        name: String,
        reason: String,
        message: String,
    },

    #[error("{context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: ProviderError,
    },

    #[error("Timed out waiting for storage account {name} to finish provisioning after {attempts} polls")]
    Timeout { name: String, attempts: u32 },

    #[error(
        "{source} (changes already applied, not rolled back: {})",
        field_list(.applied)
    )]
    PartialUpdate {
        applied: Vec<UpdateField>,
        failed: UpdateField,
        #[source]
        source: Box<ReconcileError>,
    },

    /// A mutating call was accepted, then the run failed before the new
    /// state could be confirmed.
    #[error("{source} (the storage account was modified before this failure)")]
    AfterMutation {
        #[source]
        source: Box<ReconcileError>,
    },
}

impl ReconcileError {
    pub(crate) fn transport(context: impl Into<String>) -> impl FnOnce(ProviderError) -> Self {
        let context = context.into();
        move |source| Self::Transport { context, source }
    }

    pub(crate) fn after_mutation(self) -> Self {
        Self::AfterMutation {
            source: Box::new(self),
        }
    }

    /// Whether the remote account was modified before the failure.
    pub fn changed(&self) -> bool {
        matches!(self, Self::PartialUpdate { .. } | Self::AfterMutation { .. })
    }
}

fn immutable_message(current: &AccountType, desired: &AccountType) -> String {
    if current.is_conversion_locked() {
        format!(
            "Storage accounts of type {} and {} cannot be changed (current type {current}, requested {desired}).",
            AccountType::PremiumLrs,
            AccountType::StandardZrs
        )
    } else {
        format!(
            "Storage account of type {current} cannot be changed to a type of {} or {}.",
            AccountType::PremiumLrs,
            AccountType::StandardZrs
        )
    }
}

fn field_list(fields: &[UpdateField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Walk the full error chain and join all causes into one string.
pub fn format_err_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
