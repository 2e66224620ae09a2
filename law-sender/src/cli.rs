use clap::Parser;
use lawsend_log_analytics::{
    Config, LAW_INGESTION_DOMAIN, LAW_MANAGEMENT_ENDPOINT, LAW_SUBSCRIPTION_ID, LAW_TABLE,
    LAW_WORKSPACE_ID,
};

pub(crate) const DEFAULT_DATA: &str = r#"{"name":"tester"}"#;

/// Azure Log Analytics workspace data sender
#[derive(Parser, Debug)]
#[clap(name = "azure-law-sender", author, version)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub(crate) command: Command,
}

#[derive(Parser, Debug)]
pub(crate) enum Command {
    /// Send data to Azure Log Analytics workspace.
    Send(SendArgs),
}

#[derive(Parser, Debug)]
pub(crate) struct SendArgs {
    /// JSON record to send as-is, `-` reads it from stdin
    #[clap(default_value = DEFAULT_DATA)]
    pub(crate) data: String,
    /// Azure Log Analytics Workspace ID as UUID
    #[clap(short, long, env = LAW_WORKSPACE_ID)]
    pub(crate) workspace_id: String,
    /// Azure Log Analytics Workspace table name
    #[clap(short, long, env = LAW_TABLE)]
    pub(crate) table: String,
    /// Azure Subscription ID as UUID
    #[clap(short, long, env = LAW_SUBSCRIPTION_ID)]
    pub(crate) subscription_id: String,
    /// Ingestion domain, for example `ods.opinsights.azure.us`
    #[clap(long, env = LAW_INGESTION_DOMAIN)]
    pub(crate) ingestion_domain: Option<String>,
    /// Azure Resource Manager endpoint
    #[clap(long, env = LAW_MANAGEMENT_ENDPOINT)]
    pub(crate) management_endpoint: Option<String>,
}

impl SendArgs {
    pub(crate) fn config(&self) -> Config {
        Config {
            subscription_id: self.subscription_id.clone(),
            workspace_id: self.workspace_id.clone(),
            table: self.table.clone(),
            ingestion_domain: self.ingestion_domain.clone(),
            management_endpoint: self.management_endpoint.clone(),
        }
    }

    pub(crate) fn reads_stdin(&self) -> bool {
        self.data == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> SendArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Send(send) = cli.command;
        send
    }

    #[test]
    fn test_send_defaults() {
        let send = parse(&[
            "azure-law-sender",
            "send",
            "-w",
            "ws",
            "-t",
            "MyTable",
            "-s",
            "sub",
        ]);

        assert_eq!(send.data, DEFAULT_DATA);
        assert!(!send.reads_stdin());
        assert_eq!(send.config(), Config::new("sub", "ws", "MyTable"));
    }

    #[test]
    fn test_send_long_flags() {
        let send = parse(&[
            "azure-law-sender",
            "send",
            "-",
            "--workspace-id",
            "ws",
            "--table",
            "MyTable",
            "--subscription-id",
            "sub",
            "--ingestion-domain",
            "ods.opinsights.azure.us",
        ]);

        assert!(send.reads_stdin());
        assert_eq!(
            send.config().ingestion_domain.as_deref(),
            Some("ods.opinsights.azure.us")
        );
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
