use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::models::account::{AccountType, CustomDomain, Tags};

/// Whether the account should exist after reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetState {
    #[default]
    Present,
    Absent,
}

/// Custom domain as supplied by the host. Both fields are required, but are
/// kept optional here so the validator can name the missing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomDomainArgs {
    pub name: Option<String>,
    #[serde(alias = "useSubDomain")]
    pub use_sub_domain: Option<bool>,
}

impl CustomDomainArgs {
    pub fn resolve(&self) -> Result<CustomDomain, ValidationError> {
        let name = self
            .name
            .clone()
            .ok_or(ValidationError::CustomDomainName)?;
        let use_sub_domain = self
            .use_sub_domain
            .ok_or(ValidationError::CustomDomainUseSubDomain)?;
        Ok(CustomDomain {
            name,
            use_sub_domain,
        })
    }
}

impl From<CustomDomain> for CustomDomainArgs {
    fn from(domain: CustomDomain) -> Self {
        Self {
            name: Some(domain.name),
            use_sub_domain: Some(domain.use_sub_domain),
        }
    }
}

/// The declared configuration for one storage account.
///
/// Built once from the invocation payload and handed by value to the
/// reconciler. Field names follow the payload keys; camelCase aliases are
/// accepted for hosts that send them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesiredSpec {
    pub name: String,
    #[serde(alias = "resourceGroup")]
    pub resource_group: String,
    #[serde(default)]
    pub state: TargetState,
    /// Defaults to the resource group's location.
    #[serde(default)]
    pub location: Option<String>,
    /// Required on create.
    #[serde(default, alias = "type", alias = "accountType")]
    pub account_type: Option<AccountType>,
    /// Ignored on create.
    #[serde(default, alias = "customDomain")]
    pub custom_domain: Option<CustomDomainArgs>,
    /// Replaces all existing tags when set.
    #[serde(default)]
    pub tags: Option<Tags>,
    /// Allow deletion of an account that still holds blob containers.
    #[serde(default)]
    pub force: bool,
}

impl DesiredSpec {
    pub fn new(name: impl Into<String>, resource_group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_group: resource_group.into(),
            state: TargetState::Present,
            location: None,
            account_type: None,
            custom_domain: None,
            tags: None,
            force: false,
        }
    }

    /// Parse a host payload. Keys set to `null` are treated as unset.
    pub fn from_json(payload: Value) -> Result<Self, ValidationError> {
        let payload = match payload {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .filter(|(_, v)| !v.is_null())
                    .collect(),
            ),
            other => {
                return Err(ValidationError::Payload(format!(
                    "expected a JSON object, got {other}"
                )));
            }
        };
        Ok(serde_json::from_value(payload)?)
    }

    pub fn with_state(mut self, state: TargetState) -> Self {
        self.state = state;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_account_type(mut self, account_type: AccountType) -> Self {
        self.account_type = Some(account_type);
        self
    }

    pub fn with_custom_domain(mut self, domain: CustomDomain) -> Self {
        self.custom_domain = Some(domain.into());
        self
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}
