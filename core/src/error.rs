use std::fmt;
use thiserror::Error;

/// The error type for every lawsend operation.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    rejection: Option<Rejection>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The shared key is not valid base64.
    InvalidKeyEncoding,

    /// No workspace under the subscription carries the requested customer id.
    WorkspaceNotFound,

    /// A workspace matched but its resource path has no usable name or resource group.
    MalformedResourcePath,

    /// The request never got a response (connection refused, timeout, DNS failure).
    Transport,

    /// The remote service answered with a status above 399.
    RemoteRejection,

    /// Credentials exist but are invalid/malformed, or none could be loaded.
    CredentialInvalid,

    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,

    /// Request cannot be built (missing required fields, invalid header text, etc.)
    RequestInvalid,

    /// Unexpected errors (I/O, unparseable service responses, etc.)
    Unexpected,
}

/// What the remote service told us when it refused a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// HTTP status of the response.
    pub status: http::StatusCode,
    /// Service error code, empty when the body could not be parsed.
    pub code: String,
    /// Human readable message, empty when the body could not be parsed.
    pub message: String,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "response with status {} error: {:?} => {:?}",
            self.status, self.code, self.message
        )
    }
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            rejection: None,
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the remote rejection details, only set for [`ErrorKind::RemoteRejection`].
    pub fn rejection(&self) -> Option<&Rejection> {
        self.rejection.as_ref()
    }
}

// Convenience constructors
impl Error {
    /// Create an invalid key encoding error
    pub fn invalid_key_encoding(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidKeyEncoding, message)
    }

    /// Create a workspace not found error
    pub fn workspace_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::WorkspaceNotFound, message)
    }

    /// Create a malformed resource path error
    pub fn malformed_resource_path(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedResourcePath, message)
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create a remote rejection error carrying the parsed response.
    pub fn remote_rejection(rejection: Rejection) -> Self {
        let mut err = Self::new(ErrorKind::RemoteRejection, rejection.to_string());
        err.rejection = Some(rejection);
        err
    }

    /// Create a credential invalid error
    pub fn credential_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialInvalid, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidKeyEncoding => write!(f, "invalid key encoding"),
            ErrorKind::WorkspaceNotFound => write!(f, "workspace not found"),
            ErrorKind::MalformedResourcePath => write!(f, "malformed resource path"),
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::RemoteRejection => write!(f, "remote rejection"),
            ErrorKind::CredentialInvalid => write!(f, "invalid credentials"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::ToStrError> for Error {
    fn from(err: http::header::ToStrError) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
