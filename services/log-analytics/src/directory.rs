use crate::constants::*;
use crate::credential::{SharedKey, Token};
use crate::resolve::{DirectoryService, WorkspaceEntry, WorkspacePage, WorkspaceRef};
use bytes::Bytes;
use http::header;
use http::HeaderValue;
use http::Method;
use http::StatusCode;
use lawsend_core::{Context, CredentialLoader, Error, ProvideCredential, Rejection, Result};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// ArmDirectoryService talks to Azure Resource Manager to list Log Analytics
/// workspaces and read their shared keys.
///
/// Calls are authorized with a bearer token from the given credential
/// provider. The token is cached for the lifetime of this service.
#[derive(Debug, Clone)]
pub struct ArmDirectoryService {
    ctx: Context,
    management_endpoint: String,
    loader: CredentialLoader<Token>,
}

impl ArmDirectoryService {
    /// Create a new directory service against the public management endpoint.
    pub fn new(ctx: Context, provider: impl ProvideCredential<Credential = Token>) -> Self {
        Self {
            loader: CredentialLoader::new(ctx.clone(), provider),
            ctx,
            management_endpoint: DEFAULT_MANAGEMENT_ENDPOINT.to_string(),
        }
    }

    /// Set the management endpoint, for example `https://management.usgovcloudapi.net`.
    pub fn with_management_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.management_endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    fn send<T: DeserializeOwned>(&self, method: Method, url: &str) -> Result<T> {
        let token = self.loader.load()?;
        let mut auth: HeaderValue = token.authorization().parse()?;
        auth.set_sensitive(true);

        let req = http::Request::builder()
            .method(method)
            .uri(url)
            .header(header::AUTHORIZATION, auth)
            .header(header::CONTENT_LENGTH, "0")
            .body(Bytes::new())?;

        debug!("sending {} {url}", req.method());
        let resp = self.ctx.http_send(req)?;
        let status = resp.status();

        if status.as_u16() > 399 {
            return Err(Error::remote_rejection(parse_arm_rejection(
                status,
                resp.body(),
            )));
        }

        serde_json::from_slice(resp.body()).map_err(|e| {
            Error::unexpected(format!("failed to parse response of {url}")).with_source(e)
        })
    }
}

#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    value: Vec<WorkspaceResource>,
    #[serde(rename = "nextLink", default)]
    next_link: Option<String>,
}

#[derive(Deserialize)]
struct WorkspaceResource {
    id: String,
    #[serde(default)]
    properties: WorkspaceProperties,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct WorkspaceProperties {
    #[serde(default)]
    customer_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SharedKeysResponse {
    primary_shared_key: String,
}

#[derive(Deserialize, Default)]
struct ArmErrorResponse {
    #[serde(default)]
    error: ArmError,
}

#[derive(Deserialize, Default)]
struct ArmError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

fn parse_arm_rejection(status: StatusCode, body: &[u8]) -> Rejection {
    let resp: ArmErrorResponse = serde_json::from_slice(body).unwrap_or_default();

    Rejection {
        status,
        code: resp.error.code,
        message: resp.error.message,
    }
}

impl DirectoryService for ArmDirectoryService {
    fn list_workspaces(
        &self,
        subscription_id: &str,
        next_link: Option<&str>,
    ) -> Result<WorkspacePage> {
        let url = match next_link {
            Some(link) => link.to_string(),
            None => format!(
                "{}/subscriptions/{subscription_id}/providers/Microsoft.OperationalInsights/workspaces?api-version={WORKSPACES_API_VERSION}",
                self.management_endpoint
            ),
        };

        let resp: ListResponse = self.send(Method::GET, &url)?;
        Ok(WorkspacePage {
            entries: resp
                .value
                .into_iter()
                .map(|w| WorkspaceEntry {
                    customer_id: w.properties.customer_id,
                    resource_path: w.id,
                })
                .collect(),
            next_link: resp.next_link.filter(|v| !v.is_empty()),
        })
    }

    fn get_shared_key(&self, subscription_id: &str, workspace: &WorkspaceRef) -> Result<SharedKey> {
        let url = format!(
            "{}/subscriptions/{subscription_id}/resourceGroups/{}/providers/Microsoft.OperationalInsights/workspaces/{}/sharedKeys?api-version={SHARED_KEYS_API_VERSION}",
            self.management_endpoint, workspace.resource_group, workspace.name
        );

        let resp: SharedKeysResponse = self.send(Method::POST, &url)?;
        Ok(SharedKey::new(resp.primary_shared_key))
    }
}
