//! [`ProviderClient`] backed by the Azure Resource Manager REST API.

use stowage_arm::blob::BlobServiceClient;
use stowage_arm::{accounts, operations, resource_groups, ArmClient, ArmError};
use stowage_core::models::{AccountUpdate, ObservedState};

use crate::error::format_err_chain;
use crate::plan::CreatePlan;
use crate::provider::{
    BoxFuture, LongRunningOperation, NameAvailability, OperationStatus, ProviderClient,
    ProviderError, ProviderErrorKind,
};

/// Blob listing only needs to know whether any container exists.
const CONTAINER_PROBE_LIMIT: u32 = 1;

impl From<ArmError> for ProviderError {
    fn from(err: ArmError) -> Self {
        match err {
            ArmError::Api { status: 404, message, .. } => ProviderError::not_found(message),
            ArmError::Api {
                status,
                code,
                message,
            } => ProviderError::new(ProviderErrorKind::Api { status, code }, message),
            other => ProviderError::transport(format_err_chain(&other)),
        }
    }
}

impl ProviderClient for ArmClient {
    fn resource_group_location<'a>(
        &'a self,
        resource_group: &'a str,
    ) -> BoxFuture<'a, Result<String, ProviderError>> {
        Box::pin(async move { Ok(resource_groups::location(self, resource_group).await?) })
    }

    fn get_properties<'a>(
        &'a self,
        resource_group: &'a str,
        name: &'a str,
    ) -> BoxFuture<'a, Result<ObservedState, ProviderError>> {
        Box::pin(async move {
            let account = accounts::get_properties(self, resource_group, name).await?;
            Ok(account.into_observed(resource_group))
        })
    }

    fn check_name_availability<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<NameAvailability, ProviderError>> {
        Box::pin(async move {
            let resp = accounts::check_name_availability(self, name).await?;
            Ok(NameAvailability {
                available: resp.name_available,
                reason: resp.reason,
                message: resp.message,
            })
        })
    }

    fn create<'a>(
        &'a self,
        plan: &'a CreatePlan,
    ) -> BoxFuture<'a, Result<LongRunningOperation, ProviderError>> {
        Box::pin(async move {
            Ok(accounts::create(
                self,
                &plan.resource_group,
                &plan.name,
                &plan.location,
                plan.account_type,
                plan.tags.as_ref(),
            )
            .await?)
        })
    }

    fn poll_operation<'a>(
        &'a self,
        operation: &'a LongRunningOperation,
    ) -> BoxFuture<'a, Result<OperationStatus, ProviderError>> {
        Box::pin(async move { Ok(operations::poll(self, operation).await?) })
    }

    fn update<'a>(
        &'a self,
        resource_group: &'a str,
        name: &'a str,
        update: &'a AccountUpdate,
    ) -> BoxFuture<'a, Result<(), ProviderError>> {
        Box::pin(async move {
            accounts::update(self, resource_group, name, update).await?;
            Ok(())
        })
    }

    fn delete<'a>(
        &'a self,
        resource_group: &'a str,
        name: &'a str,
    ) -> BoxFuture<'a, Result<(), ProviderError>> {
        Box::pin(async move { Ok(accounts::delete(self, resource_group, name).await?) })
    }

    fn list_keys<'a>(
        &'a self,
        resource_group: &'a str,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Vec<String>, ProviderError>> {
        Box::pin(async move { Ok(accounts::list_keys(self, resource_group, name).await?) })
    }

    fn list_containers<'a>(
        &'a self,
        name: &'a str,
        key: &'a str,
    ) -> BoxFuture<'a, Result<Vec<String>, ProviderError>> {
        Box::pin(async move {
            let blob = BlobServiceClient::new(name, key, &self.config().storage_endpoint_suffix)?;
            blob.list_containers(CONTAINER_PROBE_LIMIT)
                .await?
                .ok_or_else(|| ProviderError::not_found(format!("blob service for {name}")))
        })
    }
}
