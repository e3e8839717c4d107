use serde_json::json;
use stowage_arm::wire::{ListKeysResponse, StorageAccount, UpdateParameters};
use stowage_core::models::{
    AccountStatus, AccountType, AccountUpdate, CustomDomain, ProvisioningState, Tags,
};

fn account_json() -> serde_json::Value {
    json!({
        "id": "/subscriptions/3f7e29ba/resourceGroups/testing/providers/Microsoft.Storage/storageAccounts/clh0003",
        "name": "clh0003",
        "type": "Microsoft.Storage/storageAccounts",
        "location": "eastus2",
        "tags": {},
        "properties": {
            "provisioningState": "Succeeded",
            "accountType": "Standard_RAGRS",
            "primaryEndpoints": {
                "blob": "https://clh0003.blob.core.windows.net/",
                "queue": "https://clh0003.queue.core.windows.net/",
                "table": "https://clh0003.table.core.windows.net/"
            },
            "primaryLocation": "eastus2",
            "statusOfPrimary": "Available",
            "secondaryLocation": "centralus",
            "statusOfSecondary": "Available",
            "secondaryEndpoints": {
                "blob": "https://clh0003-secondary.blob.core.windows.net/",
                "queue": "https://clh0003-secondary.queue.core.windows.net/",
                "table": "https://clh0003-secondary.table.core.windows.net/"
            },
            "creationTime": "2016-04-01T18:35:10.2290000Z"
        }
    })
}

#[test]
fn account_normalizes_into_observed_state() {
    let account: StorageAccount = serde_json::from_value(account_json()).unwrap();
    let observed = account.into_observed("Testing");

    assert_eq!(observed.name, "clh0003");
    assert_eq!(observed.resource_group, "Testing");
    assert_eq!(observed.account_type, AccountType::StandardRagrs);
    assert_eq!(observed.provisioning_state, ProvisioningState::Succeeded);
    assert_eq!(observed.status_of_primary, Some(AccountStatus::Available));
    assert_eq!(observed.secondary_location.as_deref(), Some("centralus"));
    assert_eq!(observed.custom_domain, None);
    assert_eq!(
        observed.primary_endpoints.unwrap().blob.as_deref(),
        Some("https://clh0003.blob.core.windows.net/")
    );
    // Empty tag maps are reported as no tags.
    assert_eq!(observed.tags, None);
}

#[test]
fn account_mid_provisioning_parses() {
    let mut value = account_json();
    value["properties"]["provisioningState"] = json!("ResolvingDNS");
    value["properties"]["statusOfSecondary"] = json!(null);
    value["properties"]["customDomain"] = json!({"name": "files.example.com"});

    let observed = serde_json::from_value::<StorageAccount>(value)
        .unwrap()
        .into_observed("Testing");

    assert_eq!(observed.provisioning_state, ProvisioningState::ResolvingDns);
    assert_eq!(observed.status_of_secondary, None);
    assert_eq!(
        observed.custom_domain,
        Some(CustomDomain {
            name: "files.example.com".into(),
            use_sub_domain: false,
        })
    );
}

#[test]
fn update_bodies_carry_one_field() {
    let body = serde_json::to_value(UpdateParameters::from(&AccountUpdate::AccountType(
        AccountType::StandardGrs,
    )))
    .unwrap();
    assert_eq!(body, json!({"properties": {"accountType": "Standard_GRS"}}));

    let body = serde_json::to_value(UpdateParameters::from(&AccountUpdate::CustomDomain(
        CustomDomain {
            name: "files.example.com".into(),
            use_sub_domain: true,
        },
    )))
    .unwrap();
    assert_eq!(
        body,
        json!({"properties": {"customDomain": {"name": "files.example.com", "useSubDomain": true}}})
    );

    let tags = Tags::from([("env".to_string(), "test".to_string())]);
    let body = serde_json::to_value(UpdateParameters::from(&AccountUpdate::Tags(tags))).unwrap();
    assert_eq!(body, json!({"tags": {"env": "test"}}));
}

#[test]
fn list_keys_accepts_both_shapes() {
    let legacy: ListKeysResponse =
        serde_json::from_value(json!({"key1": "a2V5MQ==", "key2": "a2V5Mg=="})).unwrap();
    assert_eq!(legacy.into_keys(), vec!["a2V5MQ==", "a2V5Mg=="]);

    let current: ListKeysResponse = serde_json::from_value(json!({
        "keys": [
            {"keyName": "key1", "value": "Zmlyc3Q=", "permissions": "Full"},
            {"keyName": "key2", "value": "c2Vjb25k", "permissions": "Full"}
        ]
    }))
    .unwrap();
    assert_eq!(current.into_keys(), vec!["Zmlyc3Q=", "c2Vjb25k"]);
}
