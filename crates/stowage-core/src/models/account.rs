use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Resource tags. Ordered so rendered results are stable.
pub type Tags = BTreeMap<String, String>;

/// Storage redundancy / performance tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    #[serde(rename = "Standard_LRS")]
    StandardLrs,
    #[serde(rename = "Standard_ZRS")]
    StandardZrs,
    #[serde(rename = "Standard_GRS")]
    StandardGrs,
    #[serde(rename = "Standard_RAGRS")]
    StandardRagrs,
    #[serde(rename = "Premium_LRS")]
    PremiumLrs,
}

impl AccountType {
    pub const ALL: [AccountType; 5] = [
        AccountType::StandardLrs,
        AccountType::StandardZrs,
        AccountType::StandardGrs,
        AccountType::StandardRagrs,
        AccountType::PremiumLrs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::StandardLrs => "Standard_LRS",
            Self::StandardZrs => "Standard_ZRS",
            Self::StandardGrs => "Standard_GRS",
            Self::StandardRagrs => "Standard_RAGRS",
            Self::PremiumLrs => "Premium_LRS",
        }
    }

    /// Accounts of these types cannot be converted to any other type, and
    /// no other type can be converted into them.
    pub fn is_conversion_locked(self) -> bool {
        matches!(self, Self::PremiumLrs | Self::StandardZrs)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                let choices: Vec<_> = Self::ALL.iter().map(|t| t.as_str()).collect();
                ValidationError::Payload(format!(
                    "value of account_type must be one of: {}, got: {s}",
                    choices.join(", ")
                ))
            })
    }
}

/// Lifecycle stage reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProvisioningState {
    Creating,
    #[serde(rename = "ResolvingDNS")]
    ResolvingDns,
    Succeeded,
    Failed,
}

impl ProvisioningState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Creating => "Creating",
            Self::ResolvingDns => "ResolvingDNS",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for ProvisioningState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    Available,
    Unavailable,
}

/// User domain assigned to the account. `name` is the CNAME source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDomain {
    pub name: String,
    pub use_sub_domain: bool,
}

impl CustomDomain {
    /// An empty name asks the provider to remove the current domain.
    pub fn is_clear_request(&self) -> bool {
        self.name.is_empty()
    }
}

/// Service URLs for one location of the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub blob: Option<String>,
    pub queue: Option<String>,
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// Storage account as reported by the provider, normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedState {
    pub id: String,
    pub name: String,
    pub location: String,
    pub resource_group: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub account_type: AccountType,
    pub provisioning_state: ProvisioningState,
    pub secondary_location: Option<String>,
    pub status_of_primary: Option<AccountStatus>,
    pub status_of_secondary: Option<AccountStatus>,
    pub primary_location: Option<String>,
    pub custom_domain: Option<CustomDomain>,
    pub primary_endpoints: Option<Endpoints>,
    pub secondary_endpoints: Option<Endpoints>,
    pub tags: Option<Tags>,
}
