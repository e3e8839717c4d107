//! Diff & guard engine. Pure: no I/O, no clock.

use stowage_core::models::{
    AccountType, AccountUpdate, CustomDomain, DesiredSpec, ObservedState, ProjectedAccount,
    ProvisioningState, Tags, TargetState,
};
use stowage_core::ValidationError;

use crate::error::ReconcileError;

/// Everything the provider needs to create the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePlan {
    pub resource_group: String,
    pub name: String,
    pub location: String,
    pub account_type: AccountType,
    pub tags: Option<Tags>,
}

impl CreatePlan {
    /// What check mode reports instead of the created account.
    pub fn projected(&self) -> ProjectedAccount {
        ProjectedAccount {
            name: self.name.clone(),
            resource_group: self.resource_group.clone(),
            location: Some(self.location.clone()),
            account_type: Some(self.account_type),
            tags: self.tags.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    Create(CreatePlan),
    /// In-place changes, applied in order, one remote call each.
    Update(Vec<AccountUpdate>),
    Delete,
    NoOp,
}

/// Decide what to do with the account.
///
/// `desired.location` is expected to already carry the resource group
/// default when none was given.
pub fn plan(
    desired: &DesiredSpec,
    observed: Option<&ObservedState>,
) -> Result<PlannedAction, ReconcileError> {
    match (desired.state, observed) {
        (TargetState::Present, None) => plan_create(desired).map(PlannedAction::Create),
        (TargetState::Present, Some(current)) => {
            let changes = diff(desired, current)?;
            if changes.is_empty() {
                Ok(PlannedAction::NoOp)
            } else {
                Ok(PlannedAction::Update(changes))
            }
        }
        (TargetState::Absent, Some(current)) => {
            ensure_stable(current)?;
            Ok(PlannedAction::Delete)
        }
        (TargetState::Absent, None) => Ok(PlannedAction::NoOp),
    }
}

fn plan_create(desired: &DesiredSpec) -> Result<CreatePlan, ReconcileError> {
    let location = desired
        .location
        .clone()
        .ok_or(ValidationError::MissingForCreate("location"))?;
    let account_type = desired
        .account_type
        .ok_or(ValidationError::MissingForCreate("account_type"))?;

    Ok(CreatePlan {
        resource_group: desired.resource_group.clone(),
        name: desired.name.clone(),
        location,
        account_type,
        tags: desired.tags.clone(),
    })
}

/// Field-by-field comparison, in the order the changes must be applied.
///
/// A forbidden account type transition fails the whole diff, so nothing
/// is applied.
pub fn diff(
    desired: &DesiredSpec,
    current: &ObservedState,
) -> Result<Vec<AccountUpdate>, ReconcileError> {
    let mut changes = Vec::new();

    if let Some(account_type) = desired.account_type {
        if account_type != current.account_type {
            if account_type.is_conversion_locked() || current.account_type.is_conversion_locked() {
                return Err(ReconcileError::ImmutableField {
                    current: current.account_type,
                    desired: account_type,
                });
            }
            changes.push(AccountUpdate::AccountType(account_type));
        }
    }

    if let Some(args) = &desired.custom_domain {
        let domain = args.resolve()?;
        if custom_domain_differs(&domain, current.custom_domain.as_ref()) {
            changes.push(AccountUpdate::CustomDomain(domain));
        }
    }

    if let Some(tags) = &desired.tags {
        let current_tags = current.tags.clone().unwrap_or_default();
        if *tags != current_tags {
            changes.push(AccountUpdate::Tags(tags.clone()));
        }
    }

    Ok(changes)
}

/// Domains compare by name; the provider does not report `use_sub_domain`
/// back, it only governs how the CNAME is verified when the domain is set.
fn custom_domain_differs(desired: &CustomDomain, current: Option<&CustomDomain>) -> bool {
    match current {
        _ if desired.is_clear_request() => current.is_some(),
        Some(current) => !current.name.eq_ignore_ascii_case(&desired.name),
        None => true,
    }
}

fn ensure_stable(current: &ObservedState) -> Result<(), ReconcileError> {
    if current.provisioning_state != ProvisioningState::Succeeded {
        return Err(ReconcileError::Precondition {
            name: current.name.clone(),
            state: current.provisioning_state,
        });
    }
    Ok(())
}

/// Guard a planned delete. `has_containers` comes from listing the blob
/// service; callers that set `force` may skip the listing and pass `false`.
pub fn check_delete(
    current: &ObservedState,
    force: bool,
    has_containers: bool,
) -> Result<(), ReconcileError> {
    ensure_stable(current)?;
    if has_containers && !force {
        return Err(ReconcileError::InUse {
            name: current.name.clone(),
        });
    }
    Ok(())
}

/// Observed state with `changes` applied, for check mode.
pub fn project_update(current: &ObservedState, changes: &[AccountUpdate]) -> ObservedState {
    let mut projected = current.clone();
    for change in changes {
        change.apply_to(&mut projected);
    }
    projected
}
