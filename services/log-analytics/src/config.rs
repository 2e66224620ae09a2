use crate::constants::*;
use lawsend_core::{Context, Error, Result};

/// Config carries everything needed to send records to one table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// `subscription_id` will be loaded from
    ///
    /// - this field if it's not empty
    /// - env value: [`LAW_SUBSCRIPTION_ID`]
    pub subscription_id: String,
    /// Customer id of the workspace, loaded from
    ///
    /// - this field if it's not empty
    /// - env value: [`LAW_WORKSPACE_ID`]
    pub workspace_id: String,
    /// Custom log table records are written to, loaded from
    ///
    /// - this field if it's not empty
    /// - env value: [`LAW_TABLE`]
    pub table: String,
    /// Ingestion domain, `ods.opinsights.azure.com` if unset.
    ///
    /// - env value: [`LAW_INGESTION_DOMAIN`]
    pub ingestion_domain: Option<String>,
    /// Azure Resource Manager endpoint, `https://management.azure.com` if unset.
    ///
    /// - env value: [`LAW_MANAGEMENT_ENDPOINT`]
    pub management_endpoint: Option<String>,
}

impl Config {
    /// Create a config with the three required values.
    pub fn new(
        subscription_id: impl Into<String>,
        workspace_id: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            workspace_id: workspace_id.into(),
            table: table.into(),
            ..Default::default()
        }
    }

    /// Fill unset values from env.
    ///
    /// Values already set on the config are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if self.subscription_id.is_empty() {
            if let Some(v) = ctx.env_var_non_empty(LAW_SUBSCRIPTION_ID) {
                self.subscription_id = v;
            }
        }
        if self.workspace_id.is_empty() {
            if let Some(v) = ctx.env_var_non_empty(LAW_WORKSPACE_ID) {
                self.workspace_id = v;
            }
        }
        if self.table.is_empty() {
            if let Some(v) = ctx.env_var_non_empty(LAW_TABLE) {
                self.table = v;
            }
        }
        if self.ingestion_domain.is_none() {
            self.ingestion_domain = ctx.env_var_non_empty(LAW_INGESTION_DOMAIN);
        }
        if self.management_endpoint.is_none() {
            self.management_endpoint = ctx.env_var_non_empty(LAW_MANAGEMENT_ENDPOINT);
        }

        self
    }

    /// Check that every required value is present.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("subscription id", &self.subscription_id),
            ("workspace id", &self.workspace_id),
            ("table", &self.table),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(Error::config_invalid(format!("{name} is required")));
            }
        }

        Ok(())
    }
}
