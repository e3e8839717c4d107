use serde::Serialize;

use crate::models::account::{AccountType, ObservedState, Tags};

/// Best-effort state reported by check mode in place of a re-read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedAccount {
    pub name: String,
    pub resource_group: String,
    pub location: Option<String>,
    pub account_type: Option<AccountType>,
    pub tags: Tags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeletionStatus {
    Deleted,
}

/// The `results` member of the result record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResourceState {
    Observed(Box<ObservedState>),
    Projected(ProjectedAccount),
    Deleted { status: DeletionStatus },
    Empty {},
}

impl ResourceState {
    pub fn deleted() -> Self {
        Self::Deleted {
            status: DeletionStatus::Deleted,
        }
    }

    pub fn observed(&self) -> Option<&ObservedState> {
        match self {
            Self::Observed(state) => Some(state),
            _ => None,
        }
    }
}

impl From<ObservedState> for ResourceState {
    fn from(state: ObservedState) -> Self {
        Self::Observed(Box::new(state))
    }
}

impl From<Option<ObservedState>> for ResourceState {
    fn from(state: Option<ObservedState>) -> Self {
        state.map_or(Self::Empty {}, Self::from)
    }
}

/// Outcome of one reconciliation. Produced once, never mutated after return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationResult {
    pub changed: bool,
    pub check_mode: bool,
    pub results: ResourceState,
}
