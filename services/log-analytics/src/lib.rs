//! Azure Log Analytics shared key sender
//!
//! This crate sends JSON records to a Log Analytics workspace through the
//! HTTP Data Collector API:
//! - Workspace lookup and shared key retrieval through Azure Resource Manager
//! - Shared Key signing of the ingestion request
//! - Management tokens from client secret, Azure CLI or managed identity
//!
//! # Example
//!
//! ```rust,no_run
//! use anyhow::Result;
//! use lawsend_command_execute_std::StdCommandExecute;
//! use lawsend_core::{Context, OsEnv};
//! use lawsend_http_send_reqwest::ReqwestHttpSend;
//! use lawsend_log_analytics::{
//!     ArmDirectoryService, Collector, Config, DefaultCredentialProvider, LogAnalyticsCollector,
//!     Payload,
//! };
//!
//! fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_command_execute(StdCommandExecute)
//!         .with_env(OsEnv);
//!
//!     // Subscription, workspace and table from LAW_* env.
//!     let cfg = Config::default().from_env(&ctx);
//!
//!     let directory = ArmDirectoryService::new(ctx.clone(), DefaultCredentialProvider::new());
//!     let collector = LogAnalyticsCollector::connect(ctx, &cfg, &directory)?;
//!
//!     collector.send_data(Payload::from(r#"{"name":"tester"}"#))?;
//!     Ok(())
//! }
//! ```

mod constants;
pub use constants::*;

mod config;
pub use config::Config;

mod credential;
pub use credential::{SharedKey, Token};

mod sign_request;
pub use sign_request::{sign, sign_string, CanonicalRequest};

mod build;
pub use build::{Payload, PreparedRequest, RequestBuilder};

mod submit;
pub use submit::Submitter;

mod resolve;
pub use resolve::{
    parse_resource_path, DirectoryService, WorkspaceEntry, WorkspacePage, WorkspaceRef,
    WorkspaceResolver,
};

mod directory;
pub use directory::ArmDirectoryService;

mod provide_credential;
pub use provide_credential::*;

mod collector;
pub use collector::{Collector, LogAnalyticsCollector};
