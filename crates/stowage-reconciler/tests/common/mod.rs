#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use stowage_core::models::{
    AccountStatus, AccountType, AccountUpdate, Endpoints, ObservedState, ProvisioningState,
    UpdateField,
};
use stowage_reconciler::provider::{
    BoxFuture, LongRunningOperation, NameAvailability, OperationMonitor, OperationStatus,
    ProviderClient, ProviderError, ProviderErrorKind,
};
use stowage_reconciler::{CreatePlan, PollPolicy};

pub const RESOURCE_GROUP: &str = "Testing";

/// Every call the reconciler made, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ResourceGroupLocation(String),
    GetProperties(String),
    CheckNameAvailability(String),
    Create(CreatePlan),
    Poll,
    Update(AccountUpdate),
    Delete(String),
    ListKeys(String),
    ListContainers { name: String, key: String },
}

impl Call {
    pub fn is_mutating(&self) -> bool {
        matches!(self, Call::Create(_) | Call::Update(_) | Call::Delete(_))
    }
}

/// In-memory control plane.
pub struct FakeProvider {
    calls: Mutex<Vec<Call>>,
    account: Mutex<Option<ObservedState>>,
    poll_script: Mutex<VecDeque<OperationStatus>>,
    pub resource_group_location: String,
    pub name_available: bool,
    /// `None` means the account has no blob service.
    pub containers: Option<Vec<String>>,
    pub fail_update_on: Option<UpdateField>,
    pub get_error: Option<ProviderError>,
    /// Reads that succeed before `get_error` kicks in.
    pub get_error_after_reads: usize,
}

impl FakeProvider {
    pub fn empty() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            account: Mutex::new(None),
            poll_script: Mutex::new(VecDeque::new()),
            resource_group_location: "westus".into(),
            name_available: true,
            containers: Some(Vec::new()),
            fail_update_on: None,
            get_error: None,
            get_error_after_reads: 0,
        }
    }

    pub fn with_account(account: ObservedState) -> Self {
        let provider = Self::empty();
        *provider.account.lock().unwrap() = Some(account);
        provider
    }

    /// Statuses returned by successive polls; once drained, polls succeed.
    pub fn script_polls(&self, statuses: impl IntoIterator<Item = OperationStatus>) {
        self.poll_script.lock().unwrap().extend(statuses);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutating_calls(&self) -> usize {
        self.calls().iter().filter(|c| c.is_mutating()).count()
    }

    pub fn account(&self) -> Option<ObservedState> {
        self.account.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn account(name: &str, account_type: AccountType) -> ObservedState {
    ObservedState {
        id: format!(
            "/subscriptions/sub/resourceGroups/{RESOURCE_GROUP}/providers/Microsoft.Storage/storageAccounts/{name}"
        ),
        name: name.to_string(),
        location: "eastus2".into(),
        resource_group: RESOURCE_GROUP.into(),
        resource_type: "Microsoft.Storage/storageAccounts".into(),
        account_type,
        provisioning_state: ProvisioningState::Succeeded,
        secondary_location: Some("centralus".into()),
        status_of_primary: Some(AccountStatus::Available),
        status_of_secondary: Some(AccountStatus::Available),
        primary_location: Some("eastus2".into()),
        custom_domain: None,
        primary_endpoints: Some(Endpoints {
            blob: Some(format!("https://{name}.blob.core.windows.net/")),
            queue: Some(format!("https://{name}.queue.core.windows.net/")),
            table: Some(format!("https://{name}.table.core.windows.net/")),
            file: None,
        }),
        secondary_endpoints: None,
        tags: None,
    }
}

pub fn fast_polls(max_attempts: u32) -> PollPolicy {
    PollPolicy {
        initial_delay: std::time::Duration::ZERO,
        max_delay: std::time::Duration::ZERO,
        max_attempts,
    }
}

impl ProviderClient for FakeProvider {
    fn resource_group_location<'a>(
        &'a self,
        resource_group: &'a str,
    ) -> BoxFuture<'a, Result<String, ProviderError>> {
        Box::pin(async move {
            self.record(Call::ResourceGroupLocation(resource_group.to_string()));
            Ok(self.resource_group_location.clone())
        })
    }

    fn get_properties<'a>(
        &'a self,
        _resource_group: &'a str,
        name: &'a str,
    ) -> BoxFuture<'a, Result<ObservedState, ProviderError>> {
        Box::pin(async move {
            self.record(Call::GetProperties(name.to_string()));
            let reads = self
                .calls()
                .iter()
                .filter(|c| matches!(c, Call::GetProperties(_)))
                .count();
            if let Some(err) = &self.get_error {
                if reads > self.get_error_after_reads {
                    return Err(err.clone());
                }
            }
            self.account()
                .ok_or_else(|| ProviderError::not_found(format!("account {name} not found")))
        })
    }

    fn check_name_availability<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<NameAvailability, ProviderError>> {
        Box::pin(async move {
            self.record(Call::CheckNameAvailability(name.to_string()));
            Ok(NameAvailability {
                available: self.name_available,
                reason: (!self.name_available).then(|| "AlreadyExists".to_string()),
                message: (!self.name_available)
                    .then(|| format!("The storage account named {name} is already taken.")),
            })
        })
    }

    fn create<'a>(
        &'a self,
        plan: &'a CreatePlan,
    ) -> BoxFuture<'a, Result<LongRunningOperation, ProviderError>> {
        Box::pin(async move {
            self.record(Call::Create(plan.clone()));
            let mut created = account(&plan.name, plan.account_type);
            created.location = plan.location.clone();
            created.tags = plan.tags.clone().filter(|t| !t.is_empty());
            *self.account.lock().unwrap() = Some(created);
            Ok(LongRunningOperation {
                monitor: OperationMonitor::AsyncOperation("fake://operations/1".into()),
                retry_after: None,
            })
        })
    }

    fn poll_operation<'a>(
        &'a self,
        _operation: &'a LongRunningOperation,
    ) -> BoxFuture<'a, Result<OperationStatus, ProviderError>> {
        Box::pin(async move {
            self.record(Call::Poll);
            Ok(self
                .poll_script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(OperationStatus::Succeeded))
        })
    }

    fn update<'a>(
        &'a self,
        _resource_group: &'a str,
        _name: &'a str,
        update: &'a AccountUpdate,
    ) -> BoxFuture<'a, Result<(), ProviderError>> {
        Box::pin(async move {
            self.record(Call::Update(update.clone()));
            if self.fail_update_on == Some(update.field()) {
                return Err(ProviderError::new(
                    ProviderErrorKind::Api {
                        status: 409,
                        code: Some("Conflict".into()),
                    },
                    "The operation conflicts with the current state.",
                ));
            }
            if let Some(account) = self.account.lock().unwrap().as_mut() {
                update.apply_to(account);
            }
            Ok(())
        })
    }

    fn delete<'a>(
        &'a self,
        _resource_group: &'a str,
        name: &'a str,
    ) -> BoxFuture<'a, Result<(), ProviderError>> {
        Box::pin(async move {
            self.record(Call::Delete(name.to_string()));
            *self.account.lock().unwrap() = None;
            Ok(())
        })
    }

    fn list_keys<'a>(
        &'a self,
        _resource_group: &'a str,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Vec<String>, ProviderError>> {
        Box::pin(async move {
            self.record(Call::ListKeys(name.to_string()));
            Ok(vec!["a2V5MQ==".to_string(), "a2V5Mg==".to_string()])
        })
    }

    fn list_containers<'a>(
        &'a self,
        name: &'a str,
        key: &'a str,
    ) -> BoxFuture<'a, Result<Vec<String>, ProviderError>> {
        Box::pin(async move {
            self.record(Call::ListContainers {
                name: name.to_string(),
                key: key.to_string(),
            });
            self.containers
                .clone()
                .ok_or_else(|| ProviderError::not_found("blob service not found"))
        })
    }
}
