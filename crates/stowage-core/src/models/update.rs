use std::fmt;

use serde::Serialize;

use crate::models::account::{AccountType, CustomDomain, ObservedState, Tags};

/// One in-place change. The provider accepts a single mutable field per
/// update call, so each value maps to exactly one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountUpdate {
    AccountType(AccountType),
    CustomDomain(CustomDomain),
    Tags(Tags),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateField {
    AccountType,
    CustomDomain,
    Tags,
}

impl fmt::Display for UpdateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AccountType => "account type",
            Self::CustomDomain => "custom domain",
            Self::Tags => "tags",
        })
    }
}

impl AccountUpdate {
    pub fn field(&self) -> UpdateField {
        match self {
            Self::AccountType(_) => UpdateField::AccountType,
            Self::CustomDomain(_) => UpdateField::CustomDomain,
            Self::Tags(_) => UpdateField::Tags,
        }
    }

    /// Project this change onto a copy of the observed state, the way the
    /// provider would report it afterwards.
    pub fn apply_to(&self, state: &mut ObservedState) {
        match self {
            Self::AccountType(account_type) => state.account_type = *account_type,
            Self::CustomDomain(domain) if domain.is_clear_request() => state.custom_domain = None,
            Self::CustomDomain(domain) => state.custom_domain = Some(domain.clone()),
            Self::Tags(tags) if tags.is_empty() => state.tags = None,
            Self::Tags(tags) => state.tags = Some(tags.clone()),
        }
    }
}
