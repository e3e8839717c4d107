pub mod account;
pub mod desired;
pub mod result;
pub mod update;

pub use account::{
    AccountStatus, AccountType, CustomDomain, Endpoints, ObservedState, ProvisioningState, Tags,
};
pub use desired::{CustomDomainArgs, DesiredSpec, TargetState};
pub use result::{DeletionStatus, ProjectedAccount, ReconciliationResult, ResourceState};
pub use update::{AccountUpdate, UpdateField};
