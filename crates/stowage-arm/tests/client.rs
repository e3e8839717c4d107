use stowage_arm::client::REQUEST_TIMEOUT;
use stowage_arm::{ArmClient, ArmConfig};

fn config() -> ArmConfig {
    ArmConfig {
        subscription_id: "3f7e29ba".into(),
        access_token: "token".into(),
        resource_manager_endpoint: "https://management.azure.com".into(),
        storage_endpoint_suffix: "core.windows.net".into(),
    }
}

#[test]
fn client_builds_with_bounded_requests() {
    let client = ArmClient::new(config()).unwrap();

    assert!(REQUEST_TIMEOUT.as_secs() > 0);
    assert_eq!(client.config().subscription_id, "3f7e29ba");
}

#[test]
fn account_urls() {
    let client = ArmClient::new(config()).unwrap();

    assert_eq!(
        client.account_url("Testing", "clh0002"),
        "https://management.azure.com/subscriptions/3f7e29ba/resourceGroups/Testing/providers/Microsoft.Storage/storageAccounts/clh0002"
    );
    assert_eq!(
        client.resource_group_url("Testing"),
        "https://management.azure.com/subscriptions/3f7e29ba/resourcegroups/Testing"
    );
}
