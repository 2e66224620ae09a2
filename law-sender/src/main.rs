mod cli;

use std::io;

use anyhow::Result;
use clap::Parser;
use lawsend_command_execute_std::StdCommandExecute;
use lawsend_core::{Context, OsEnv};
use lawsend_http_send_reqwest::ReqwestHttpSend;
use lawsend_log_analytics::{
    ArmDirectoryService, Collector, DefaultCredentialProvider, LogAnalyticsCollector, Payload,
};
use log::debug;

use crate::cli::{Cli, Command, SendArgs};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Send(send) => run_send(&send),
    }
}

fn run_send(send: &SendArgs) -> Result<()> {
    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_command_execute(StdCommandExecute)
        .with_env(OsEnv);

    let cfg = send.config();
    let mut directory = ArmDirectoryService::new(ctx.clone(), DefaultCredentialProvider::new());
    if let Some(endpoint) = &cfg.management_endpoint {
        directory = directory.with_management_endpoint(endpoint);
    }

    let collector = LogAnalyticsCollector::connect(ctx, &cfg, &directory)?;

    let payload = if send.reads_stdin() {
        Payload::from_reader(io::stdin())
    } else {
        Payload::from(send.data.as_str())
    };
    debug!("sending record to table {}", cfg.table);
    collector.send_data(payload)?;

    Ok(())
}
