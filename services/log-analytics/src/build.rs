use crate::constants::*;
use crate::sign_request::CanonicalRequest;
use bytes::Bytes;
use http::header;
use http::request::Parts;
use http::HeaderValue;
use http::Method;
use lawsend_core::time::{format_http_date, format_rfc3339, now, DateTime};
use lawsend_core::{Error, Result};
use log::debug;
use std::fmt::{Debug, Formatter};
use std::io::Read;

/// Body of a log record.
///
/// The data collector API signs the content length, so a streamed payload is
/// read into memory before the request is built.
pub enum Payload {
    /// Body whose length is already known.
    Buffered(Bytes),
    /// Body that can only be read once, its length is unknown up front.
    Stream(Box<dyn Read + Send>),
}

impl Payload {
    /// Build a payload from a non-seekable reader.
    pub fn from_reader(r: impl Read + Send + 'static) -> Self {
        Payload::Stream(Box::new(r))
    }

    /// Consume the payload into its exact bytes.
    pub fn into_bytes(self) -> Result<Bytes> {
        match self {
            Payload::Buffered(bs) => Ok(bs),
            Payload::Stream(mut r) => {
                let mut buf = Vec::new();
                r.read_to_end(&mut buf).map_err(|e| {
                    Error::request_invalid("failed to read payload stream").with_source(e)
                })?;
                debug!("buffered {} bytes from payload stream", buf.len());
                Ok(Bytes::from(buf))
            }
        }
    }
}

impl Debug for Payload {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Buffered(bs) => f.debug_tuple("Payload::Buffered").field(&bs.len()).finish(),
            Payload::Stream(_) => f.write_str("Payload::Stream"),
        }
    }
}

impl From<Bytes> for Payload {
    fn from(value: Bytes) -> Self {
        Payload::Buffered(value)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(value: Vec<u8>) -> Self {
        Payload::Buffered(Bytes::from(value))
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Buffered(Bytes::from(value))
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Buffered(Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Buffered(Bytes::from(value.to_string()))
    }
}

/// A data collector request ready to be signed.
///
/// Carries every header except `Authorization`.
#[derive(Debug)]
pub struct PreparedRequest {
    parts: Parts,
    body: Bytes,
}

impl PreparedRequest {
    /// Request head.
    pub fn parts(&self) -> &Parts {
        &self.parts
    }

    /// Request body, exactly as it will be sent.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The metadata the signature is computed over.
    pub fn canonical(&self) -> Result<CanonicalRequest> {
        CanonicalRequest::from_parts(&self.parts)
    }

    /// Attach the `Authorization` header and turn into a sendable request.
    pub fn into_request(mut self, authorization: &str) -> Result<http::Request<Bytes>> {
        let mut value: HeaderValue = authorization.parse()?;
        value.set_sensitive(true);
        self.parts.headers.insert(header::AUTHORIZATION, value);

        Ok(http::Request::from_parts(self.parts, self.body))
    }
}

/// RequestBuilder assembles requests for the Azure Monitor HTTP Data Collector API.
///
/// - [Send log data with the HTTP Data Collector API](https://learn.microsoft.com/en-us/azure/azure-monitor/logs/data-collector-api)
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    ingestion_domain: String,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    /// Create a new builder targeting the public Azure cloud.
    pub fn new() -> Self {
        Self {
            ingestion_domain: DEFAULT_INGESTION_DOMAIN.to_string(),
        }
    }

    /// Set the ingestion domain, for example `ods.opinsights.azure.us`.
    pub fn with_ingestion_domain(mut self, domain: impl Into<String>) -> Self {
        self.ingestion_domain = domain.into();
        self
    }

    /// Endpoint for the given workspace.
    pub fn endpoint(&self, workspace_id: &str) -> String {
        format!(
            "https://{workspace_id}.{}{RESOURCE_PATH}?api-version={API_VERSION}",
            self.ingestion_domain
        )
    }

    /// Build the request for one record.
    ///
    /// `timestamp` defaults to now. It is normalized to UTC and written twice:
    /// as an HTTP date in `X-Ms-Date` and as RFC3339 in `Time-Generated-Field`.
    pub fn build(
        &self,
        workspace_id: &str,
        table: &str,
        timestamp: Option<DateTime>,
        body: impl Into<Payload>,
    ) -> Result<PreparedRequest> {
        if workspace_id.is_empty() {
            return Err(Error::request_invalid("workspace id is required"));
        }
        if table.is_empty() {
            return Err(Error::request_invalid("table name is required"));
        }

        let timestamp = timestamp.unwrap_or_else(now);
        // Content length is signed, the body must be complete before we go on.
        let body = body.into().into_bytes()?;

        let (mut parts, ()) = http::Request::builder()
            .method(Method::POST)
            .uri(self.endpoint(workspace_id))
            .body(())?
            .into_parts();

        let headers = &mut parts.headers;
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));
        headers.insert(X_MS_DATE, format_http_date(timestamp).parse()?);
        headers.insert(LOG_TYPE, table.parse()?);
        headers.insert(TIME_GENERATED_FIELD, format_rfc3339(timestamp).parse()?);

        debug!(
            "built request {} {} with {} bytes body",
            parts.method,
            parts.uri,
            body.len()
        );
        Ok(PreparedRequest { parts, body })
    }
}
