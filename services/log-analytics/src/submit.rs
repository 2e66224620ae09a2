use crate::build::PreparedRequest;
use http::StatusCode;
use lawsend_core::{Context, Error, Rejection, Result};
use log::debug;
use serde::Deserialize;

/// Submitter sends a signed request to the data collector API.
///
/// It makes exactly one attempt. Anything at or below 399 is a success,
/// everything above becomes a `RemoteRejection`.
#[derive(Debug, Clone)]
pub struct Submitter {
    ctx: Context,
}

impl Submitter {
    /// Create a new submitter using the http client of `ctx`.
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    /// Authorize the request with `SharedKey {workspace_id}:{signature}` and send it.
    pub fn submit(&self, req: PreparedRequest, workspace_id: &str, signature: &str) -> Result<()> {
        let req = req.into_request(&format!("SharedKey {workspace_id}:{signature}"))?;

        let resp = self.ctx.http_send(req)?;
        let status = resp.status();
        debug!("data collector responded with status {status}");

        if is_success(status) {
            return Ok(());
        }

        Err(Error::remote_rejection(parse_rejection(status, resp.body())))
    }
}

fn is_success(status: StatusCode) -> bool {
    status.as_u16() <= 399
}

#[derive(Default, Deserialize)]
struct ErrorResponse {
    #[serde(rename = "Error", default)]
    error: String,
    #[serde(rename = "Message", default)]
    message: String,
}

/// Build the rejection from the data collector error body.
///
/// A body that is not the expected JSON object yields empty code and message.
pub(crate) fn parse_rejection(status: StatusCode, body: &[u8]) -> Rejection {
    let resp: ErrorResponse = serde_json::from_slice(body).unwrap_or_default();

    Rejection {
        status,
        code: resp.error,
        message: resp.message,
    }
}
