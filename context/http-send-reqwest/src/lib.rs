//! Blocking reqwest implementation of [`HttpSend`].
//!
//! ```no_run
//! use lawsend_core::{Context, OsEnv};
//! use lawsend_http_send_reqwest::ReqwestHttpSend;
//!
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//! ```

use bytes::Bytes;
use lawsend_core::{Error, HttpSend, RequestTimeout, Result};
use log::debug;
use reqwest::blocking::Client;

/// HttpSend backed by [`reqwest::blocking::Client`].
///
/// Every call is a single round trip. Connection, DNS and timeout failures
/// surface as [`ErrorKind::Transport`](lawsend_core::ErrorKind::Transport),
/// responses are returned whatever their status. A [`RequestTimeout`]
/// extension overrides the client timeout for that request.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::blocking::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl HttpSend for ReqwestHttpSend {
    fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        debug!("sending {} {}", parts.method, parts.uri);

        let mut builder = self
            .client
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers)
            .body(body.to_vec());
        if let Some(RequestTimeout(timeout)) = parts.extensions.get::<RequestTimeout>() {
            builder = builder.timeout(*timeout);
        }
        let req = builder
            .build()
            .map_err(|e| Error::request_invalid("failed to build http request").with_source(e))?;

        let resp = self.client.execute(req).map_err(|e| {
            Error::transport(format!("failed to send http request: {e}")).with_source(e)
        })?;

        let mut builder = http::Response::builder()
            .status(resp.status())
            .version(resp.version());
        if let Some(headers) = builder.headers_mut() {
            *headers = resp.headers().clone();
        }
        let bs = resp.bytes().map_err(|e| {
            Error::transport(format!("failed to read http response: {e}")).with_source(e)
        })?;
        debug!("got response with {} bytes", bs.len());

        Ok(builder.body(bs)?)
    }
}
