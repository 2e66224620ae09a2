//! End to end send against mocked Azure endpoints.

use bytes::Bytes;
use chrono::TimeZone;
use lawsend_core::{Context, ErrorKind, HttpSend, Result};
use lawsend_log_analytics::{
    ArmDirectoryService, Collector, Config, LogAnalyticsCollector, Payload, StaticTokenProvider,
    WorkspaceResolver,
};
use pretty_assertions::assert_eq;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

const WORKSPACE_ID: &str = "4f0e7b3c-0000-4000-8000-000000000000";
const PAGE_1: &str = r#"{
    "value": [
        {
            "id": "/subscriptions/sub/resourceGroups/other-rg/providers/Microsoft.OperationalInsights/workspaces/other",
            "properties": {"customerId": "11111111-0000-4000-8000-000000000000"}
        }
    ],
    "nextLink": "https://management.azure.com/subscriptions/sub/providers/Microsoft.OperationalInsights/workspaces?api-version=2022-10-01&$skiptoken=page2"
}"#;
const PAGE_2: &str = r#"{
    "value": [
        {
            "id": "/subscriptions/sub/resourceGroups/my-rg/providers/Microsoft.OperationalInsights/workspaces/my-ws",
            "properties": {"customerId": "4f0e7b3c-0000-4000-8000-000000000000"}
        }
    ]
}"#;

/// Answers like ARM and the data collector would.
#[derive(Debug, Clone, Default)]
struct MockAzure {
    ingestion_status: u16,
    seen: Arc<Mutex<Vec<String>>>,
    ingested: Arc<Mutex<Vec<http::Request<Bytes>>>>,
}

impl HttpSend for MockAzure {
    fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let uri = req.uri().to_string();
        self.seen
            .lock()
            .unwrap()
            .push(format!("{} {uri}", req.method()));

        let (status, body): (u16, &'static str) = if uri.contains("/sharedKeys") {
            (200, r#"{"primarySharedKey":"c2VjcmV0S2V5","secondarySharedKey":"b3RoZXI="}"#)
        } else if uri.contains("skiptoken=page2") {
            (200, PAGE_2)
        } else if uri.contains("/workspaces?") {
            (200, PAGE_1)
        } else {
            self.ingested.lock().unwrap().push(req);
            (
                self.ingestion_status,
                r#"{"Error":"InvalidLogType","Message":"Log-Type header is invalid"}"#,
            )
        };

        Ok(http::Response::builder()
            .status(status)
            .body(Bytes::from_static(body.as_bytes()))?)
    }
}

fn setup(ingestion_status: u16) -> (MockAzure, Context, ArmDirectoryService) {
    let _ = env_logger::builder().is_test(true).try_init();

    let azure = MockAzure {
        ingestion_status,
        ..Default::default()
    };
    let ctx = Context::new().with_http_send(azure.clone());
    let directory = ArmDirectoryService::new(ctx.clone(), StaticTokenProvider::new("arm-token"));
    (azure, ctx, directory)
}

#[test]
fn test_resolve_on_second_page() {
    let (azure, _, directory) = setup(200);

    let workspace = WorkspaceResolver::new(&directory)
        .resolve("sub", WORKSPACE_ID)
        .unwrap();
    assert_eq!(workspace.name, "my-ws");
    assert_eq!(workspace.resource_group, "my-rg");
    assert_eq!(azure.seen.lock().unwrap().len(), 2);
}

#[test]
fn test_resolve_not_found_after_all_pages() {
    let (azure, _, directory) = setup(200);

    let err = WorkspaceResolver::new(&directory)
        .resolve("sub", "4F0E7B3C-0000-4000-8000-000000000000")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::WorkspaceNotFound);
    assert_eq!(azure.seen.lock().unwrap().len(), 2);
}

#[test]
fn test_send_streamed_record() {
    let (azure, ctx, directory) = setup(200);
    let timestamp = chrono::Utc.with_ymd_and_hms(2000, 1, 1, 1, 1, 1).unwrap();

    let collector = LogAnalyticsCollector::connect(
        ctx,
        &Config::new("sub", WORKSPACE_ID, "MyTable"),
        &directory,
    )
    .unwrap()
    .with_timestamp(timestamp);
    collector
        .send_data(Payload::from_reader(Cursor::new(b"test body".to_vec())))
        .unwrap();

    assert_eq!(
        azure.seen.lock().unwrap().clone(),
        vec![
            "GET https://management.azure.com/subscriptions/sub/providers/Microsoft.OperationalInsights/workspaces?api-version=2022-10-01".to_string(),
            "GET https://management.azure.com/subscriptions/sub/providers/Microsoft.OperationalInsights/workspaces?api-version=2022-10-01&$skiptoken=page2".to_string(),
            "POST https://management.azure.com/subscriptions/sub/resourceGroups/my-rg/providers/Microsoft.OperationalInsights/workspaces/my-ws/sharedKeys?api-version=2020-08-01".to_string(),
            "POST https://4f0e7b3c-0000-4000-8000-000000000000.ods.opinsights.azure.com/api/logs?api-version=2016-04-01".to_string(),
        ]
    );

    let ingested = azure.ingested.lock().unwrap();
    let req = &ingested[0];
    let header = |name: &str| req.headers().get(name).unwrap().to_str().unwrap().to_string();
    assert_eq!(header("content-length"), "9");
    assert_eq!(header("content-type"), "application/json");
    assert_eq!(header("x-ms-date"), "Sat, 01 Jan 2000 01:01:01 GMT");
    assert_eq!(header("time-generated-field"), "2000-01-01T01:01:01Z");
    assert_eq!(header("log-type"), "MyTable");
    assert_eq!(
        header("authorization"),
        "SharedKey 4f0e7b3c-0000-4000-8000-000000000000:j/eWehIKRuuTaoq+9PY56s4eU1eNtob7yvw7WehiB2E="
    );
    assert_eq!(req.body().as_ref(), b"test body");
}

#[test]
fn test_send_rejected_record() {
    let (_, ctx, directory) = setup(400);

    let collector = LogAnalyticsCollector::connect(
        ctx,
        &Config::new("sub", WORKSPACE_ID, "MyTable"),
        &directory,
    )
    .unwrap();
    let err = collector.send_data(Payload::from("{}")).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RemoteRejection);
    let rejection = err.rejection().unwrap();
    assert_eq!(rejection.status.as_u16(), 400);
    assert_eq!(rejection.code, "InvalidLogType");
    assert_eq!(rejection.message, "Log-Type header is invalid");
}
