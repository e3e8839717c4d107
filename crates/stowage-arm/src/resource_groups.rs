use reqwest::Method;

use crate::client::{read_json, ArmClient, RESOURCE_GROUP_API_VERSION};
use crate::error::ArmError;
use crate::wire::ResourceGroup;

/// Location of a resource group. Fails with a 404 `Api` error when the
/// group does not exist.
pub async fn location(client: &ArmClient, resource_group: &str) -> Result<String, ArmError> {
    let url = client.resource_group_url(resource_group);
    let response = client
        .api_request(Method::GET, &url, RESOURCE_GROUP_API_VERSION)
        .send()
        .await?;
    let group: ResourceGroup = read_json(response).await?;
    Ok(group.location)
}
