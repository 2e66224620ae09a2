use crate::constants::MANAGEMENT_RESOURCE;
use crate::credential::Token;
use lawsend_core::time::{from_timestamp, DateTime};
use lawsend_core::{Context, Error, ProvideCredential, Result};
use log::debug;
use serde::Deserialize;

/// AzureCliCredentialProvider provides management tokens from the Azure CLI.
///
/// It invokes `az account get-access-token` through the context's
/// [`CommandExecute`](lawsend_core::CommandExecute). A missing CLI or a
/// logged out user yields `None`.
#[derive(Clone, Debug, Default)]
pub struct AzureCliCredentialProvider {}

impl AzureCliCredentialProvider {
    /// Create a new Azure CLI provider.
    pub fn new() -> Self {
        Self {}
    }

    fn get_access_token_from_cli(&self, ctx: &Context) -> Result<AzureCliToken> {
        let output = ctx.command_execute(
            "az",
            &[
                "account",
                "get-access-token",
                "--resource",
                MANAGEMENT_RESOURCE,
                "--output",
                "json",
            ],
        )?;

        if !output.success() {
            return Err(Error::credential_invalid(format!(
                "Azure CLI command failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| Error::unexpected("failed to parse Azure CLI output").with_source(e))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AzureCliToken {
    access_token: String,
    expires_on: Option<String>,
    #[serde(rename = "expires_on")]
    expires_on_timestamp: Option<i64>,
}

impl AzureCliToken {
    fn expires_at(&self) -> Option<DateTime> {
        if let Some(ts) = self.expires_on_timestamp {
            return from_timestamp(ts).ok();
        }

        // Older CLIs only report local time like "2023-10-31 21:59:10.000000".
        let expires = self.expires_on.as_deref()?;
        chrono::NaiveDateTime::parse_from_str(expires, "%Y-%m-%d %H:%M:%S%.f")
            .ok()
            .and_then(|dt| dt.and_local_timezone(chrono::Local).single())
            .map(|dt| dt.with_timezone(&chrono::Utc))
    }
}

impl ProvideCredential for AzureCliCredentialProvider {
    type Credential = Token;

    fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        match self.get_access_token_from_cli(ctx) {
            Ok(token) => Ok(Some(Token::new(&token.access_token, token.expires_at()))),
            Err(err) => {
                debug!("Azure CLI is not available: {err}");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawsend_core::{CommandExecute, CommandOutput};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Default)]
    struct MockCommand {
        status: i32,
        stdout: &'static str,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl CommandExecute for MockCommand {
        fn command_execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("{program} {}", args.join(" ")));
            Ok(CommandOutput {
                status: self.status,
                stdout: self.stdout.as_bytes().to_vec(),
                stderr: b"Please run 'az login' to setup account.".to_vec(),
            })
        }
    }

    #[test]
    fn test_parse_azure_cli_token() {
        let json = r#"{
            "accessToken": "eyJ0eXAiOiJKV1QiLCJhbGciOiJSUzI1NiIsIng1dCI6IjJaUXBKM...",
            "expiresOn": "2023-10-31 21:59:10.000000",
            "expires_on": 1698760750,
            "subscription": "0b1f6471-1bf0-4dda-aec3-cb9272f09590",
            "tenant": "54826b22-38d6-4fb2-bad9-b7b93a3e9c5a",
            "tokenType": "Bearer"
        }"#;

        let token: AzureCliToken = serde_json::from_str(json).unwrap();
        assert_eq!(
            token.access_token,
            "eyJ0eXAiOiJKV1QiLCJhbGciOiJSUzI1NiIsIng1dCI6IjJaUXBKM..."
        );
        assert_eq!(token.expires_at().unwrap().timestamp(), 1698760750);
    }

    #[test]
    fn test_provide_credential_from_cli() {
        let cmd = MockCommand {
            status: 0,
            stdout: r#"{"accessToken":"cli-token","expires_on":4102444800,"tokenType":"Bearer"}"#,
            ..Default::default()
        };
        let ctx = Context::new().with_command_execute(cmd.clone());

        let token = AzureCliCredentialProvider::new()
            .provide_credential(&ctx)
            .unwrap()
            .unwrap();
        assert_eq!(token.access_token, "cli-token");
        assert_eq!(token.expires_on.unwrap().timestamp(), 4102444800);
        assert_eq!(
            cmd.calls.lock().unwrap()[0],
            "az account get-access-token --resource https://management.azure.com/ --output json"
        );
    }

    #[test]
    fn test_provide_credential_not_logged_in() {
        let cmd = MockCommand {
            status: 1,
            ..Default::default()
        };
        let ctx = Context::new().with_command_execute(cmd);

        let token = AzureCliCredentialProvider::new()
            .provide_credential(&ctx)
            .unwrap();
        assert!(token.is_none());
    }

    #[test]
    fn test_provide_credential_cli_missing() {
        // The noop executor fails like a missing binary would.
        let token = AzureCliCredentialProvider::new()
            .provide_credential(&Context::new())
            .unwrap();
        assert!(token.is_none());
    }
}
