use crate::constants::*;
use crate::credential::Token;
use lawsend_core::time::{from_timestamp, now, parse_rfc3339, DateTime};
use lawsend_core::{Context, Error, ProvideCredential, RequestTimeout, Result};
use std::time::Duration;

/// Off Azure the IMDS address is unroutable, so a connect hangs until the
/// timeout instead of failing fast.
const IMDS_TIMEOUT: Duration = Duration::from_secs(2);

/// Load a management token from the Azure Instance Metadata Service (IMDS).
///
/// Available on Azure VMs and other compute with a managed identity. The
/// identity is picked with `AZURE_OBJECT_ID`, `AZURE_CLIENT_ID` or
/// `AZURE_MSI_RES_ID`, the endpoint can be moved with `AZURE_IMDS_ENDPOINT`.
/// Each request is bounded by a short timeout, two seconds unless set with
/// [`ImdsCredentialProvider::with_timeout`].
///
/// Reference: <https://learn.microsoft.com/en-us/entra/identity/managed-identities-azure-resources/how-to-use-vm-token>
#[derive(Debug)]
pub struct ImdsCredentialProvider {
    timeout: Duration,
}

impl Default for ImdsCredentialProvider {
    fn default() -> Self {
        Self {
            timeout: IMDS_TIMEOUT,
        }
    }
}

impl ImdsCredentialProvider {
    /// Create a new IMDS provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout of the token request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl ProvideCredential for ImdsCredentialProvider {
    type Credential = Token;

    fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let token = get_access_token(MANAGEMENT_RESOURCE, self.timeout, ctx)?;

        let expires_on = match parse_expires_on(&token.expires_on) {
            Some(t) => t,
            None => now() + chrono::TimeDelta::try_minutes(10).expect("in bounds"),
        };

        Ok(Some(Token::new(&token.access_token, Some(expires_on))))
    }
}

#[derive(serde::Deserialize)]
struct AccessTokenResponse {
    access_token: String,
    #[serde(default)]
    expires_on: String,
}

/// IMDS reports unix seconds as a string, some hosts answer with RFC3339.
fn parse_expires_on(v: &str) -> Option<DateTime> {
    if v.is_empty() {
        return None;
    }
    match v.parse::<i64>() {
        Ok(secs) => from_timestamp(secs).ok(),
        Err(_) => parse_rfc3339(v).ok(),
    }
}

fn get_access_token(
    resource: &str,
    timeout: Duration,
    ctx: &Context,
) -> Result<AccessTokenResponse> {
    let endpoint = ctx
        .env_var_non_empty(AZURE_IMDS_ENDPOINT)
        .unwrap_or_else(|| IMDS_ENDPOINT.to_string());

    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("api-version", "2018-02-01")
        .append_pair("resource", resource);

    if let Some(object_id) = ctx.env_var_non_empty(AZURE_OBJECT_ID) {
        query.append_pair("object_id", &object_id);
    } else if let Some(client_id) = ctx.env_var_non_empty(AZURE_CLIENT_ID) {
        query.append_pair("client_id", &client_id);
    } else if let Some(msi_res_id) = ctx.env_var_non_empty(AZURE_MSI_RES_ID) {
        query.append_pair("msi_res_id", &msi_res_id);
    }

    let mut req = http::Request::builder()
        .method(http::Method::GET)
        .uri(format!("{endpoint}?{}", query.finish()))
        .header("Metadata", "true");

    if let Some(msi_secret) = ctx.env_var_non_empty(AZURE_MSI_SECRET) {
        req = req.header("X-IDENTITY-HEADER", msi_secret);
    }

    let mut req = req
        .body(bytes::Bytes::new())
        .map_err(|e| Error::unexpected("failed to build IMDS request").with_source(e))?;
    req.extensions_mut().insert(RequestTimeout(timeout));

    let resp = ctx.http_send(req)?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = String::from_utf8_lossy(resp.body());
        return Err(Error::credential_invalid(format!(
            "IMDS request failed with status {status}: {body}"
        )));
    }

    serde_json::from_slice(resp.body())
        .map_err(|e| Error::unexpected("failed to parse IMDS response").with_source(e))
}
