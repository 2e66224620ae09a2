use crate::build::{Payload, RequestBuilder};
use crate::config::Config;
use crate::credential::SharedKey;
use crate::resolve::{DirectoryService, WorkspaceResolver};
use crate::sign_request::sign;
use crate::submit::Submitter;
use lawsend_core::time::DateTime;
use lawsend_core::{Context, Result};
use log::debug;

/// Collector accepts log records for one destination table.
pub trait Collector {
    /// Send one record, exactly one attempt.
    fn send_data(&self, payload: Payload) -> Result<()>;
}

/// LogAnalyticsCollector sends records to a Log Analytics workspace through
/// the HTTP Data Collector API.
#[derive(Debug)]
pub struct LogAnalyticsCollector {
    workspace_id: String,
    table: String,
    shared_key: SharedKey,
    timestamp: Option<DateTime>,
    builder: RequestBuilder,
    submitter: Submitter,
}

impl LogAnalyticsCollector {
    /// Create a collector for callers that already hold the shared key.
    pub fn new(
        ctx: Context,
        workspace_id: impl Into<String>,
        table: impl Into<String>,
        shared_key: SharedKey,
    ) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            table: table.into(),
            shared_key,
            timestamp: None,
            builder: RequestBuilder::new(),
            submitter: Submitter::new(ctx),
        }
    }

    /// Resolve the workspace of `cfg` and fetch its shared key.
    ///
    /// The directory is only consulted here, sends reuse the fetched key.
    pub fn connect(ctx: Context, cfg: &Config, directory: &dyn DirectoryService) -> Result<Self> {
        cfg.validate()?;

        let workspace =
            WorkspaceResolver::new(directory).resolve(&cfg.subscription_id, &cfg.workspace_id)?;
        debug!(
            "workspace {} resolved to {} in resource group {}",
            cfg.workspace_id, workspace.name, workspace.resource_group
        );
        let shared_key = directory.get_shared_key(&cfg.subscription_id, &workspace)?;

        let mut collector = Self::new(ctx, &cfg.workspace_id, &cfg.table, shared_key);
        if let Some(domain) = &cfg.ingestion_domain {
            collector = collector.with_ingestion_domain(domain);
        }
        Ok(collector)
    }

    /// Set the ingestion domain for sovereign clouds.
    pub fn with_ingestion_domain(mut self, domain: impl Into<String>) -> Self {
        self.builder = self.builder.with_ingestion_domain(domain);
        self
    }

    /// Stamp every record with a fixed time instead of now.
    pub fn with_timestamp(mut self, timestamp: DateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl Collector for LogAnalyticsCollector {
    fn send_data(&self, payload: Payload) -> Result<()> {
        let req = self
            .builder
            .build(&self.workspace_id, &self.table, self.timestamp, payload)?;
        let signature = sign(&req.canonical()?, &self.shared_key)?;

        self.submitter.submit(req, &self.workspace_id, &signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{WorkspaceEntry, WorkspacePage, WorkspaceRef};
    use bytes::Bytes;
    use chrono::TimeZone;
    use lawsend_core::{Error, ErrorKind, HttpSend};
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Default)]
    struct Recorder {
        seen: Arc<Mutex<Vec<http::Request<Bytes>>>>,
    }

    impl HttpSend for Recorder {
        fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            self.seen.lock().unwrap().push(req);
            Ok(http::Response::new(Bytes::new()))
        }
    }

    #[derive(Debug)]
    struct OneWorkspace {
        path: &'static str,
    }

    impl DirectoryService for OneWorkspace {
        fn list_workspaces(&self, _: &str, _: Option<&str>) -> Result<WorkspacePage> {
            Ok(WorkspacePage {
                entries: vec![WorkspaceEntry {
                    customer_id: "ws".to_string(),
                    resource_path: self.path.to_string(),
                }],
                next_link: None,
            })
        }

        fn get_shared_key(&self, _: &str, workspace: &WorkspaceRef) -> Result<SharedKey> {
            if workspace.name != "my-ws" || workspace.resource_group != "my-rg" {
                return Err(Error::unexpected("unknown workspace"));
            }
            Ok(SharedKey::new("c2VjcmV0S2V5"))
        }
    }

    fn test_time() -> DateTime {
        chrono::Utc.with_ymd_and_hms(2000, 1, 1, 1, 1, 1).unwrap()
    }

    #[test]
    fn test_send_data_signs_request() {
        let http = Recorder::default();
        let collector = LogAnalyticsCollector::new(
            Context::new().with_http_send(http.clone()),
            "ws",
            "MyTable",
            SharedKey::new("c2VjcmV0S2V5"),
        )
        .with_timestamp(test_time());

        collector.send_data(Payload::from("test body")).unwrap();

        let seen = http.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0].headers().get("authorization").unwrap(),
            "SharedKey ws:j/eWehIKRuuTaoq+9PY56s4eU1eNtob7yvw7WehiB2E="
        );
        assert_eq!(seen[0].headers().get("log-type").unwrap(), "MyTable");
    }

    #[test]
    fn test_connect_resolves_workspace() {
        let http = Recorder::default();
        let directory = OneWorkspace {
            path: "/subscriptions/sub/resourceGroups/my-rg/providers/Microsoft.OperationalInsights/workspaces/my-ws",
        };
        let mut cfg = Config::new("sub", "ws", "MyTable");
        cfg.ingestion_domain = Some("ods.opinsights.azure.us".to_string());

        let collector =
            LogAnalyticsCollector::connect(Context::new().with_http_send(http.clone()), &cfg, &directory)
                .unwrap();
        collector.send_data(Payload::from("{}")).unwrap();

        let seen = http.seen.lock().unwrap();
        assert_eq!(
            seen[0].uri().to_string(),
            "https://ws.ods.opinsights.azure.us/api/logs?api-version=2016-04-01"
        );
    }

    #[test]
    fn test_connect_with_malformed_path() {
        let directory = OneWorkspace {
            path: "/subscriptions/sub/resourceGroups/my-rg/providers/Microsoft.OperationalInsights/workspaces/",
        };

        let err = LogAnalyticsCollector::connect(
            Context::new(),
            &Config::new("sub", "ws", "MyTable"),
            &directory,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResourcePath);
    }

    #[test]
    fn test_connect_with_invalid_config() {
        let directory = OneWorkspace { path: "" };

        let err = LogAnalyticsCollector::connect(Context::new(), &Config::default(), &directory)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_send_data_with_invalid_key() {
        let collector = LogAnalyticsCollector::new(
            Context::new().with_http_send(Recorder::default()),
            "ws",
            "MyTable",
            SharedKey::new("not base64!"),
        );

        let err = collector.send_data(Payload::from("{}")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKeyEncoding);
    }
}
