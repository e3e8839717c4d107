//! Blob data-plane client authenticated with an account access key.
//!
//! Only container enumeration is needed: an account holding containers is
//! probably backing something (VM disks, application data) and must not be
//! deleted without an explicit override.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use reqwest::{Method, StatusCode};
use sha2::Sha256;

use crate::client::{check_status, http_client};
use crate::error::ArmError;

type HmacSha256 = Hmac<Sha256>;

pub const BLOB_API_VERSION: &str = "2015-04-05";

/// Second client, built from freshly fetched account keys.
pub struct BlobServiceClient {
    http: reqwest::Client,
    account: String,
    key: Vec<u8>,
    endpoint: String,
}

impl BlobServiceClient {
    /// `key` is the base64 account key as returned by `listKeys`.
    pub fn new(account: &str, key: &str, endpoint_suffix: &str) -> Result<Self, ArmError> {
        let key = STANDARD
            .decode(key)
            .map_err(|e| ArmError::Signing(format!("account key is not valid base64: {e}")))?;
        Ok(Self {
            http: http_client()?,
            account: account.to_string(),
            key,
            endpoint: format!("https://{account}.blob.{endpoint_suffix}"),
        })
    }

    /// Names of the containers in the account, up to `max_results`.
    ///
    /// Returns `None` when the blob service itself does not exist for the
    /// account (e.g. a premium account without blob storage).
    pub async fn list_containers(&self, max_results: u32) -> Result<Option<Vec<String>>, ArmError> {
        let max_results = max_results.to_string();
        let query = [("comp", "list"), ("maxresults", max_results.as_str())];
        let date = http_date();

        let string_to_sign = string_to_sign(
            "GET",
            &[("x-ms-date", date.as_str()), ("x-ms-version", BLOB_API_VERSION)],
            &self.account,
            "/",
            &query,
        );
        let signature = self.sign(&string_to_sign)?;

        let response = self
            .http
            .request(Method::GET, format!("{}/", self.endpoint))
            .query(&query)
            .header("x-ms-date", &date)
            .header("x-ms-version", BLOB_API_VERSION)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("SharedKey {}:{signature}", self.account),
            )
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(account = %self.account, "blob service not found");
            return Ok(None);
        }

        let body = check_status(response).await?.text().await?;
        Ok(Some(parse_container_names(&body)))
    }

    fn sign(&self, string_to_sign: &str) -> Result<String, ArmError> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| ArmError::Signing(e.to_string()))?;
        mac.update(string_to_sign.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// RFC 1123 date in GMT, as required by `x-ms-date`.
fn http_date() -> String {
    jiff::Timestamp::now()
        .strftime("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

/// Canonical SharedKey string for a body-less request.
///
/// Standard headers are all empty for a GET without a body; `x-ms-*`
/// headers and query parameters are lowercased and sorted by name.
pub fn string_to_sign(
    verb: &str,
    ms_headers: &[(&str, &str)],
    account: &str,
    path: &str,
    query: &[(&str, &str)],
) -> String {
    let mut out = String::from(verb);
    // Content-Encoding through Range: eleven empty standard headers.
    out.push_str(&"\n".repeat(12));

    let mut headers: Vec<(String, &str)> = ms_headers
        .iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v.trim()))
        .collect();
    headers.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, value) in headers {
        out.push_str(&format!("{name}:{value}\n"));
    }

    out.push_str(&format!("/{account}{path}"));

    let mut params: Vec<(String, &str)> = query
        .iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), *v))
        .collect();
    params.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, value) in params {
        out.push_str(&format!("\n{name}:{value}"));
    }

    out
}

/// Pull `<Name>` out of each `<Container>` in a List Containers response.
pub fn parse_container_names(body: &str) -> Vec<String> {
    body.split("<Container>")
        .skip(1)
        .filter_map(|chunk| {
            let start = chunk.find("<Name>")? + "<Name>".len();
            let end = chunk[start..].find("</Name>")? + start;
            Some(chunk[start..end].to_string())
        })
        .collect()
}
