use reqwest::{Method, StatusCode};
use stowage_core::models::{AccountType, AccountUpdate, Tags};

use crate::client::{check_status, read_json, ArmClient, STORAGE_API_VERSION};
use crate::error::ArmError;
use crate::operations::LongRunningOperation;
use crate::wire::{
    CreateParameters, CreateProperties, ListKeysResponse, NameAvailabilityRequest,
    NameAvailabilityResponse, StorageAccount, UpdateParameters,
};

const STORAGE_ACCOUNT_TYPE: &str = "Microsoft.Storage/storageAccounts";

/// Read an account's properties.
pub async fn get_properties(
    client: &ArmClient,
    resource_group: &str,
    name: &str,
) -> Result<StorageAccount, ArmError> {
    let url = client.account_url(resource_group, name);
    let response = client
        .api_request(Method::GET, &url, STORAGE_API_VERSION)
        .send()
        .await?;
    read_json(response).await
}

/// Ask whether `name` is free across the whole provider namespace.
pub async fn check_name_availability(
    client: &ArmClient,
    name: &str,
) -> Result<NameAvailabilityResponse, ArmError> {
    let url = format!(
        "{}/providers/Microsoft.Storage/checkNameAvailability",
        client.subscription_url()
    );
    let response = client
        .api_request(Method::POST, &url, STORAGE_API_VERSION)
        .json(&NameAvailabilityRequest {
            name,
            resource_type: STORAGE_ACCOUNT_TYPE,
        })
        .send()
        .await?;
    read_json(response).await
}

/// Start creating an account. Returns a handle to poll for completion.
pub async fn create(
    client: &ArmClient,
    resource_group: &str,
    name: &str,
    location: &str,
    account_type: AccountType,
    tags: Option<&Tags>,
) -> Result<LongRunningOperation, ArmError> {
    let url = client.account_url(resource_group, name);
    let body = CreateParameters {
        location,
        tags,
        properties: CreateProperties { account_type },
    };
    let response = check_status(
        client
            .api_request(Method::PUT, &url, STORAGE_API_VERSION)
            .json(&body)
            .send()
            .await?,
    )
    .await?;

    tracing::info!(
        name = %name,
        status = %response.status(),
        "storage account create accepted"
    );

    Ok(LongRunningOperation::from_response(
        response.status(),
        response.headers(),
    ))
}

/// Apply a single-field update.
pub async fn update(
    client: &ArmClient,
    resource_group: &str,
    name: &str,
    update: &AccountUpdate,
) -> Result<StorageAccount, ArmError> {
    let url = client.account_url(resource_group, name);
    let response = client
        .api_request(Method::PATCH, &url, STORAGE_API_VERSION)
        .json(&UpdateParameters::from(update))
        .send()
        .await?;
    read_json(response).await
}

/// Delete an account. Deleting an account that is already gone succeeds.
pub async fn delete(client: &ArmClient, resource_group: &str, name: &str) -> Result<(), ArmError> {
    let url = client.account_url(resource_group, name);
    let response = client
        .api_request(Method::DELETE, &url, STORAGE_API_VERSION)
        .send()
        .await?;

    if response.status() == StatusCode::NOT_FOUND {
        tracing::debug!(name = %name, "storage account already absent");
        return Ok(());
    }

    let response = check_status(response).await?;
    tracing::debug!(name = %name, status = %response.status(), "delete status");
    Ok(())
}

/// Fetch the account's access keys, `key1` first.
pub async fn list_keys(
    client: &ArmClient,
    resource_group: &str,
    name: &str,
) -> Result<Vec<String>, ArmError> {
    let url = format!("{}/listKeys", client.account_url(resource_group, name));
    let response = client
        .api_request(Method::POST, &url, STORAGE_API_VERSION)
        .header(reqwest::header::CONTENT_LENGTH, 0)
        .send()
        .await?;
    let keys: ListKeysResponse = read_json(response).await?;
    Ok(keys.into_keys())
}
