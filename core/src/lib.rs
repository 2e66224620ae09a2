//! Core components for sending signed records to Azure Log Analytics.
//!
//! This crate provides the foundational types and traits shared by the
//! lawsend crates.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for HTTP sending, environment access
//!   and command execution. Every side effect goes through it, so tests can swap them out.
//! - **Traits**: Abstract interfaces for credential loading (`ProvideCredential`) and
//!   credential validation (`SigningCredential`)
//! - **CredentialLoader**: Caches a loaded credential for the lifetime of one operation
//! - **Error**: One error type with a typed [`ErrorKind`] for every failure of a send
//!
//! ## Example
//!
//! ```no_run
//! use lawsend_core::{Context, CredentialLoader, ProvideCredential, Result, SigningCredential};
//!
//! #[derive(Clone, Debug)]
//! struct MyToken(String);
//!
//! impl SigningCredential for MyToken {
//!     fn is_valid(&self) -> bool {
//!         !self.0.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyProvider;
//!
//! impl ProvideCredential for MyProvider {
//!     type Credential = MyToken;
//!
//!     fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
//!         Ok(ctx.env_var("MY_TOKEN").map(MyToken))
//!     }
//! }
//!
//! # fn example() -> Result<()> {
//! let loader = CredentialLoader::new(Context::new(), MyProvider);
//! let token = loader.load()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: HMAC and base64 helpers
//! - [`time`]: Time formatting helpers
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Rejection, Result};

mod context;
pub use context::{
    CommandExecute, CommandOutput, Context, Env, HttpSend, NoopCommandExecute, NoopEnv,
    NoopHttpSend, OsEnv, RequestTimeout, StaticEnv,
};

mod api;
pub use api::{ProvideCredential, ProvideCredentialChain, SigningCredential};
mod loader;
pub use loader::CredentialLoader;
