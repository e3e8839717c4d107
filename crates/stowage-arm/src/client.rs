use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::ArmError;
use crate::wire::ErrorResponse;

pub const DEFAULT_RESOURCE_MANAGER_ENDPOINT: &str = "https://management.azure.com";
pub const DEFAULT_STORAGE_ENDPOINT_SUFFIX: &str = "core.windows.net";

/// Storage resource provider API generation. Account type lives at
/// `properties.accountType` and update takes one field per call.
pub const STORAGE_API_VERSION: &str = "2015-06-15";
pub const RESOURCE_GROUP_API_VERSION: &str = "2016-09-01";

/// Upper bound on any single request, including reading the body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for the management plane.
#[derive(Debug, Clone)]
pub struct ArmConfig {
    pub subscription_id: String,
    /// Bearer token for `https://management.azure.com/`.
    pub access_token: String,
    pub resource_manager_endpoint: String,
    pub storage_endpoint_suffix: String,
}

impl ArmConfig {
    /// Read settings from `AZURE_*` environment variables.
    pub fn from_env() -> Result<Self, ArmError> {
        let subscription_id = std::env::var("AZURE_SUBSCRIPTION_ID")
            .map_err(|_| ArmError::MissingEnvVar("AZURE_SUBSCRIPTION_ID".to_string()))?;
        let access_token = std::env::var("AZURE_ACCESS_TOKEN")
            .map_err(|_| ArmError::MissingEnvVar("AZURE_ACCESS_TOKEN".to_string()))?;
        let resource_manager_endpoint = std::env::var("AZURE_RESOURCE_MANAGER_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_RESOURCE_MANAGER_ENDPOINT.to_string());
        let storage_endpoint_suffix = std::env::var("AZURE_STORAGE_ENDPOINT_SUFFIX")
            .unwrap_or_else(|_| DEFAULT_STORAGE_ENDPOINT_SUFFIX.to_string());

        Ok(Self {
            subscription_id,
            access_token,
            resource_manager_endpoint: resource_manager_endpoint.trim_end_matches('/').to_string(),
            storage_endpoint_suffix,
        })
    }
}

/// Authenticated management-plane client.
#[derive(Debug, Clone)]
pub struct ArmClient {
    http: reqwest::Client,
    config: ArmConfig,
}

impl ArmClient {
    pub fn new(config: ArmConfig) -> Result<Self, ArmError> {
        Ok(Self {
            http: http_client()?,
            config,
        })
    }

    pub fn config(&self) -> &ArmConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// `{endpoint}/subscriptions/{id}`
    pub fn subscription_url(&self) -> String {
        format!(
            "{}/subscriptions/{}",
            self.config.resource_manager_endpoint, self.config.subscription_id
        )
    }

    pub fn resource_group_url(&self, resource_group: &str) -> String {
        format!("{}/resourcegroups/{resource_group}", self.subscription_url())
    }

    pub fn account_url(&self, resource_group: &str, name: &str) -> String {
        format!(
            "{}/resourceGroups/{resource_group}/providers/Microsoft.Storage/storageAccounts/{name}",
            self.subscription_url()
        )
    }

    /// Start an authenticated request against an absolute management URL.
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.config.access_token)
    }

    /// Same as [`Self::request`] with `api-version` appended.
    pub(crate) fn api_request(&self, method: Method, url: &str, api_version: &str) -> RequestBuilder {
        self.request(method, url)
            .query(&[("api-version", api_version)])
    }
}

/// HTTP client shared by the management and blob clients.
pub(crate) fn http_client() -> Result<reqwest::Client, ArmError> {
    Ok(reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// Turn a non-success response into [`ArmError::Api`], keeping the
/// provider's code and message when the body carries them.
pub(crate) async fn check_status(response: Response) -> Result<Response, ArmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(ErrorResponse { error }) => (error.code, error.message),
        Err(_) if body.is_empty() => (None, status.canonical_reason().unwrap_or("").to_string()),
        Err(_) => (None, body),
    };

    Err(ArmError::Api {
        status: status.as_u16(),
        code,
        message,
    })
}

pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ArmError> {
    let body = check_status(response).await?.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
