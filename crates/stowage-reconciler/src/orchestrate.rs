use stowage_core::models::{
    AccountUpdate, DesiredSpec, ObservedState, ReconciliationResult, ResourceState, TargetState,
};
use stowage_core::validate;

use crate::error::ReconcileError;
use crate::plan::{self, CreatePlan, PlannedAction};
use crate::poll::PollPolicy;
use crate::provider::{ProviderClient, ProviderError};
use crate::read;

/// Drives one reconciliation: validate → read → plan → apply → re-read.
///
/// Holds no state between invocations; every call re-reads the provider.
pub struct Reconciler<'a> {
    provider: &'a dyn ProviderClient,
    poll: PollPolicy,
    check_mode: bool,
}

impl<'a> Reconciler<'a> {
    pub fn new(provider: &'a dyn ProviderClient) -> Self {
        Self {
            provider,
            poll: PollPolicy::default(),
            check_mode: false,
        }
    }

    /// In check mode mutating calls are skipped and projected state is
    /// reported. Read-only calls still run.
    pub fn with_check_mode(mut self, check_mode: bool) -> Self {
        self.check_mode = check_mode;
        self
    }

    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    pub async fn reconcile(
        &self,
        desired: DesiredSpec,
    ) -> Result<ReconciliationResult, ReconcileError> {
        validate(&desired)?;

        tracing::info!(
            name = %desired.name,
            resource_group = %desired.resource_group,
            state = ?desired.state,
            check_mode = self.check_mode,
            "reconciling storage account"
        );

        let observed = read::fetch(self.provider, &desired.resource_group, &desired.name).await?;
        let desired = self.default_location(desired, observed.as_ref()).await?;

        match (plan::plan(&desired, observed.as_ref())?, observed) {
            (PlannedAction::Create(create), _) => self.create(&desired, create).await,
            (PlannedAction::Update(changes), Some(current)) => self.update(current, changes).await,
            (PlannedAction::Delete, Some(current)) => self.delete(current, desired.force).await,
            (_, observed) => {
                tracing::info!(name = %desired.name, "storage account in sync, no changes needed");
                Ok(self.finish(false, observed.into()))
            }
        }
    }

    /// Fill in the resource group's location when an account is about to be
    /// created and no location was given.
    async fn default_location(
        &self,
        mut desired: DesiredSpec,
        observed: Option<&ObservedState>,
    ) -> Result<DesiredSpec, ReconcileError> {
        if desired.location.is_some() || desired.state != TargetState::Present || observed.is_some()
        {
            return Ok(desired);
        }

        let location = self
            .provider
            .resource_group_location(&desired.resource_group)
            .await
            .map_err(ReconcileError::transport(format!(
                "Failed to get resource group {}",
                desired.resource_group
            )))?;
        tracing::debug!(location = %location, "defaulting location to resource group location");
        desired.location = Some(location);
        Ok(desired)
    }

    async fn create(
        &self,
        desired: &DesiredSpec,
        create: CreatePlan,
    ) -> Result<ReconciliationResult, ReconcileError> {
        if desired.custom_domain.is_some() {
            tracing::warn!(
                name = %create.name,
                "custom_domain is ignored when creating a storage account; it is applied on the next run"
            );
        }

        self.ensure_name_available(&create.name).await?;

        if self.check_mode {
            return Ok(self.finish(true, ResourceState::Projected(create.projected())));
        }

        tracing::info!(
            name = %create.name,
            location = %create.location,
            account_type = %create.account_type,
            "creating storage account"
        );
        let operation = self
            .provider
            .create(&create)
            .await
            .map_err(ReconcileError::transport("Failed to create account"))?;
        self.poll
            .wait(self.provider, &operation, &create.name)
            .await
            .map_err(ReconcileError::after_mutation)?;

        let state = read::fetch_final(self.provider, &create.resource_group, &create.name)
            .await
            .map_err(ReconcileError::after_mutation)?;
        tracing::info!(name = %create.name, "storage account created");
        Ok(self.finish(true, state.into()))
    }

    async fn ensure_name_available(&self, name: &str) -> Result<(), ReconcileError> {
        let availability = self
            .provider
            .check_name_availability(name)
            .await
            .map_err(ReconcileError::transport("Error checking name availability"))?;

        if !availability.available {
            tracing::info!(name = %name, "storage account name not available");
            return Err(ReconcileError::NameUnavailable {
                name: name.to_string(),
                reason: availability.reason.unwrap_or_default(),
                message: availability.message.unwrap_or_default(),
            });
        }
        Ok(())
    }

    /// Apply each change with its own call. A failure stops the run; changes
    /// already applied stay applied and are reported in the error.
    async fn update(
        &self,
        current: ObservedState,
        changes: Vec<AccountUpdate>,
    ) -> Result<ReconciliationResult, ReconcileError> {
        if self.check_mode {
            let projected = plan::project_update(&current, &changes);
            return Ok(self.finish(true, projected.into()));
        }

        let mut applied = Vec::with_capacity(changes.len());
        for change in &changes {
            tracing::info!(name = %current.name, field = %change.field(), "updating storage account");
            if let Err(source) = self
                .provider
                .update(&current.resource_group, &current.name, change)
                .await
            {
                let err = ReconcileError::Transport {
                    context: format!("Failed to update {}", change.field()),
                    source,
                };
                if applied.is_empty() {
                    return Err(err);
                }
                return Err(ReconcileError::PartialUpdate {
                    applied,
                    failed: change.field(),
                    source: Box::new(err),
                });
            }
            applied.push(change.field());
        }

        let state = read::fetch_final(self.provider, &current.resource_group, &current.name)
            .await
            .map_err(ReconcileError::after_mutation)?;
        Ok(self.finish(true, state.into()))
    }

    async fn delete(
        &self,
        current: ObservedState,
        force: bool,
    ) -> Result<ReconciliationResult, ReconcileError> {
        let has_containers = if force {
            false
        } else {
            self.has_blob_containers(&current).await?
        };
        plan::check_delete(&current, force, has_containers)?;

        if !self.check_mode {
            tracing::info!(name = %current.name, force, "deleting storage account");
            self.provider
                .delete(&current.resource_group, &current.name)
                .await
                .map_err(ReconcileError::transport("Failed to delete the account"))?;
        }

        Ok(self.finish(true, ResourceState::deleted()))
    }

    /// Containers suggest something depends on the account. Listing needs a
    /// data-plane client built from freshly fetched keys.
    async fn has_blob_containers(&self, current: &ObservedState) -> Result<bool, ReconcileError> {
        tracing::debug!(name = %current.name, "checking for existing blob containers");

        let keys = self
            .provider
            .list_keys(&current.resource_group, &current.name)
            .await
            .map_err(ReconcileError::transport("Failed to get account keys"))?;
        let key = keys.first().ok_or_else(|| ReconcileError::Transport {
            context: "Failed to get account keys".to_string(),
            source: ProviderError::transport("provider returned no access keys"),
        })?;

        match self.provider.list_containers(&current.name, key).await {
            Ok(containers) => Ok(!containers.is_empty()),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(ReconcileError::Transport {
                context: "Failed to list blob containers".to_string(),
                source: e,
            }),
        }
    }

    fn finish(&self, changed: bool, results: ResourceState) -> ReconciliationResult {
        ReconciliationResult {
            changed,
            check_mode: self.check_mode,
            results,
        }
    }
}
