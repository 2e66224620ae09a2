//! Live tests against a real workspace, enabled with `LAWSEND_TEST=on`.

use std::env;

use anyhow::Result;
use lawsend_command_execute_std::StdCommandExecute;
use lawsend_core::{Context, ErrorKind, OsEnv};
use lawsend_http_send_reqwest::ReqwestHttpSend;
use lawsend_log_analytics::{
    ArmDirectoryService, Collector, Config, DefaultCredentialProvider, DirectoryService,
    LogAnalyticsCollector, Payload, SharedKey, WorkspaceResolver,
};
use log::debug;
use log::warn;

fn init_context() -> Option<Context> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("LAWSEND_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    Some(
        Context::new()
            .with_http_send(ReqwestHttpSend::default())
            .with_command_execute(StdCommandExecute)
            .with_env(OsEnv),
    )
}

fn directory(ctx: &Context, cfg: &Config) -> ArmDirectoryService {
    let directory = ArmDirectoryService::new(ctx.clone(), DefaultCredentialProvider::new());
    match &cfg.management_endpoint {
        Some(endpoint) => directory.with_management_endpoint(endpoint),
        None => directory,
    }
}

#[test]
fn test_send_data() -> Result<()> {
    let Some(ctx) = init_context() else {
        warn!("LAWSEND_TEST is not set, skipped");
        return Ok(());
    };

    let cfg = Config::default().from_env(&ctx);
    let directory = directory(&ctx, &cfg);
    let collector = LogAnalyticsCollector::connect(ctx, &cfg, &directory)?;

    collector.send_data(Payload::from(serde_json::json!({"name": "lawsend"})))?;
    Ok(())
}

#[test]
fn test_resolve_unknown_workspace() -> Result<()> {
    let Some(ctx) = init_context() else {
        warn!("LAWSEND_TEST is not set, skipped");
        return Ok(());
    };

    let cfg = Config::default().from_env(&ctx);
    let directory = directory(&ctx, &cfg);

    let err = WorkspaceResolver::new(&directory)
        .resolve(&cfg.subscription_id, "00000000-0000-0000-0000-000000000000")
        .unwrap_err();
    debug!("got error: {err:?}");
    assert_eq!(err.kind(), ErrorKind::WorkspaceNotFound);
    Ok(())
}

#[test]
fn test_send_with_wrong_key() -> Result<()> {
    let Some(ctx) = init_context() else {
        warn!("LAWSEND_TEST is not set, skipped");
        return Ok(());
    };

    let cfg = Config::default().from_env(&ctx);
    let directory = directory(&ctx, &cfg);
    let workspace = WorkspaceResolver::new(&directory).resolve(&cfg.subscription_id, &cfg.workspace_id)?;
    // Make sure the workspace has a key at all before sending with another one.
    directory.get_shared_key(&cfg.subscription_id, &workspace)?;

    let collector =
        LogAnalyticsCollector::new(ctx, &cfg.workspace_id, &cfg.table, SharedKey::new("c2VjcmV0S2V5"));
    let err = collector.send_data(Payload::from("{}")).unwrap_err();
    debug!("got error: {err:?}");
    assert_eq!(err.kind(), ErrorKind::RemoteRejection);
    assert_eq!(err.rejection().map(|r| r.status.as_u16()), Some(403));
    Ok(())
}
