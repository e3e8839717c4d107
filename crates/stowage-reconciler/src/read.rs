use stowage_core::models::{ObservedState, ProvisioningState};

use crate::error::ReconcileError;
use crate::provider::ProviderClient;

/// Read the account before planning.
///
/// A missing account is `None`. An account that is not `Succeeded` is
/// mid-operation and must not be touched.
pub async fn fetch(
    provider: &dyn ProviderClient,
    resource_group: &str,
    name: &str,
) -> Result<Option<ObservedState>, ReconcileError> {
    let Some(state) = fetch_final(provider, resource_group, name).await? else {
        return Ok(None);
    };

    if state.provisioning_state != ProvisioningState::Succeeded {
        return Err(ReconcileError::Precondition {
            name: name.to_string(),
            state: state.provisioning_state,
        });
    }

    Ok(Some(state))
}

/// Read the account after a mutation, without the stability guard.
pub async fn fetch_final(
    provider: &dyn ProviderClient,
    resource_group: &str,
    name: &str,
) -> Result<Option<ObservedState>, ReconcileError> {
    tracing::debug!(name = %name, resource_group = %resource_group, "get properties");

    match provider.get_properties(resource_group, name).await {
        Ok(state) => Ok(Some(state)),
        Err(e) if e.is_not_found() => {
            tracing::debug!(name = %name, "storage account not found");
            Ok(None)
        }
        Err(e) => Err(ReconcileError::Transport {
            context: format!("Failed to get properties for storage account {name}"),
            source: e,
        }),
    }
}
