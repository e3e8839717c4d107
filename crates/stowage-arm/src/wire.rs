//! JSON shapes of the storage resource provider, `2015-06-15` generation.

use serde::{Deserialize, Serialize};
use stowage_core::models::{
    AccountStatus, AccountType, AccountUpdate, CustomDomain, Endpoints, ObservedState,
    ProvisioningState, Tags,
};

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ResourceGroup {
    pub location: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageAccount {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub tags: Option<Tags>,
    pub properties: StorageAccountProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageAccountProperties {
    pub provisioning_state: ProvisioningState,
    pub account_type: AccountType,
    pub primary_endpoints: Option<EndpointsWire>,
    pub primary_location: Option<String>,
    pub status_of_primary: Option<AccountStatus>,
    pub secondary_location: Option<String>,
    pub status_of_secondary: Option<AccountStatus>,
    pub secondary_endpoints: Option<EndpointsWire>,
    pub custom_domain: Option<CustomDomainWire>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndpointsWire {
    pub blob: Option<String>,
    pub queue: Option<String>,
    pub table: Option<String>,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomDomainWire {
    pub name: String,
    #[serde(default)]
    pub use_sub_domain: Option<bool>,
}

impl From<EndpointsWire> for Endpoints {
    fn from(wire: EndpointsWire) -> Self {
        Self {
            blob: wire.blob,
            queue: wire.queue,
            table: wire.table,
            file: wire.file,
        }
    }
}

impl From<&CustomDomain> for CustomDomainWire {
    fn from(domain: &CustomDomain) -> Self {
        Self {
            name: domain.name.clone(),
            use_sub_domain: Some(domain.use_sub_domain),
        }
    }
}

impl StorageAccount {
    /// Normalize into the domain model. The provider does not echo the
    /// resource group back, so the caller supplies the one it asked for.
    pub fn into_observed(self, resource_group: &str) -> ObservedState {
        let props = self.properties;
        ObservedState {
            id: self.id,
            name: self.name,
            location: self.location,
            resource_group: resource_group.to_string(),
            resource_type: self.resource_type,
            account_type: props.account_type,
            provisioning_state: props.provisioning_state,
            secondary_location: props.secondary_location,
            status_of_primary: props.status_of_primary,
            status_of_secondary: props.status_of_secondary,
            primary_location: props.primary_location,
            custom_domain: props.custom_domain.map(|d| CustomDomain {
                name: d.name,
                use_sub_domain: d.use_sub_domain.unwrap_or(false),
            }),
            primary_endpoints: props.primary_endpoints.map(Endpoints::from),
            secondary_endpoints: props.secondary_endpoints.map(Endpoints::from),
            tags: self.tags.filter(|t| !t.is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NameAvailabilityRequest<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub resource_type: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameAvailabilityResponse {
    pub name_available: bool,
    pub reason: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateParameters<'a> {
    pub location: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<&'a Tags>,
    pub properties: CreateProperties,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProperties {
    pub account_type: AccountType,
}

/// Body of a PATCH. Exactly one member is set per request.
#[derive(Debug, Default, Serialize)]
pub struct UpdateParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<UpdateProperties>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_domain: Option<CustomDomainWire>,
}

impl From<&AccountUpdate> for UpdateParameters {
    fn from(update: &AccountUpdate) -> Self {
        match update {
            AccountUpdate::AccountType(account_type) => Self {
                properties: Some(UpdateProperties {
                    account_type: Some(*account_type),
                    ..Default::default()
                }),
                ..Default::default()
            },
            AccountUpdate::CustomDomain(domain) => Self {
                properties: Some(UpdateProperties {
                    custom_domain: Some(domain.into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            AccountUpdate::Tags(tags) => Self {
                tags: Some(tags.clone()),
                ..Default::default()
            },
        }
    }
}

/// `listKeys` response. Older API generations return `key1`/`key2`, newer
/// ones a `keys` array; both are accepted.
#[derive(Debug, Default, Deserialize)]
pub struct ListKeysResponse {
    pub key1: Option<String>,
    pub key2: Option<String>,
    #[serde(default)]
    pub keys: Vec<KeyEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEntry {
    pub key_name: String,
    pub value: String,
}

impl ListKeysResponse {
    /// Keys in provider order (`key1` first).
    pub fn into_keys(self) -> Vec<String> {
        let mut keys: Vec<String> = [self.key1, self.key2].into_iter().flatten().collect();
        keys.extend(self.keys.into_iter().map(|k| k.value));
        keys
    }
}

/// Body returned by an `Azure-AsyncOperation` status URL.
#[derive(Debug, Deserialize)]
pub struct AsyncOperationStatus {
    pub status: String,
    pub error: Option<ErrorBody>,
}
