use crate::constants::*;
use crate::SharedKey;
use http::header;
use http::request::Parts;
use http::Method;
use lawsend_core::hash::{base64_decode, base64_hmac_sha256};
use lawsend_core::{Error, Result};

/// Metadata of a data collector request that goes into the signature.
///
/// Built once the body is fully buffered, so that `content_length` is the
/// exact number of bytes that will be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    method: Method,
    content_length: u64,
    content_type: String,
    date: String,
}

impl CanonicalRequest {
    /// Create a new canonical request.
    pub fn new(
        method: Method,
        content_length: u64,
        content_type: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            method,
            content_length,
            content_type: content_type.into(),
            date: date.into(),
        }
    }

    /// Read the canonical request from the request headers.
    ///
    /// A missing `Content-Type` or `X-Ms-Date` header is read as an empty
    /// string and a missing `Content-Length` as zero.
    pub fn from_parts(parts: &Parts) -> Result<Self> {
        let content_length = match parts.headers.get(header::CONTENT_LENGTH) {
            Some(v) => v.to_str()?.parse::<u64>().map_err(|e| {
                Error::request_invalid("content-length is not a number").with_source(e)
            })?,
            None => 0,
        };
        let content_type = match parts.headers.get(header::CONTENT_TYPE) {
            Some(v) => v.to_str()?,
            None => "",
        };
        let date = match parts.headers.get(X_MS_DATE) {
            Some(v) => v.to_str()?,
            None => "",
        };

        Ok(Self::new(
            parts.method.clone(),
            content_length,
            content_type,
            date,
        ))
    }

    /// Content length carried by this request.
    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    /// Construct string to sign
    ///
    /// ## Format
    ///
    /// ```text
    /// VERB + "\n" +
    /// Content-Length + "\n" +
    /// Content-Type + "\n" +
    /// "x-ms-date:" + X-Ms-Date + "\n" +
    /// "/api/logs"
    /// ```
    ///
    /// ## Reference
    ///
    /// - [Data Collector API: Authorization](https://learn.microsoft.com/en-us/azure/azure-monitor/logs/data-collector-api#authorization)
    pub fn string_to_sign(&self) -> String {
        [
            self.method.as_str().to_string(),
            self.content_length.to_string(),
            self.content_type.clone(),
            format!("{X_MS_DATE}:{}", self.date),
            RESOURCE_PATH.to_string(),
        ]
        .join("\n")
    }
}

/// Sign the canonical request with a base64 encoded shared key.
///
/// Returns the base64 encoded HMAC-SHA256 of [`CanonicalRequest::string_to_sign`].
/// Fails with `InvalidKeyEncoding` if the key is not valid base64.
pub fn sign(req: &CanonicalRequest, key: &SharedKey) -> Result<String> {
    sign_string(&req.string_to_sign(), key.as_str())
}

/// Base64 encoded HMAC-SHA256 of `content`, keyed by the decoded `b64_key`.
///
/// Both inputs are `&str`, so they are valid UTF-8 already and are used as-is.
pub fn sign_string(content: &str, b64_key: &str) -> Result<String> {
    let key = base64_decode(b64_key)?;

    Ok(base64_hmac_sha256(&key, content.as_bytes()))
}
