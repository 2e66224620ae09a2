// Headers used by the data collector API.
pub const X_MS_DATE: &str = "x-ms-date";
pub const LOG_TYPE: &str = "log-type";
pub const TIME_GENERATED_FIELD: &str = "time-generated-field";

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Resource path, both in the url and as the last line of the string to sign.
pub const RESOURCE_PATH: &str = "/api/logs";
pub const API_VERSION: &str = "2016-04-01";
pub const DEFAULT_INGESTION_DOMAIN: &str = "ods.opinsights.azure.com";

// Azure Resource Manager.
pub const DEFAULT_MANAGEMENT_ENDPOINT: &str = "https://management.azure.com";
pub const MANAGEMENT_RESOURCE: &str = "https://management.azure.com/";
pub const MANAGEMENT_SCOPE: &str = "https://management.azure.com/.default";
pub const WORKSPACES_API_VERSION: &str = "2022-10-01";
pub const SHARED_KEYS_API_VERSION: &str = "2020-08-01";

// Env values used in lawsend.
pub const LAW_SUBSCRIPTION_ID: &str = "LAW_SUBSCRIPTION_ID";
pub const LAW_WORKSPACE_ID: &str = "LAW_WORKSPACE_ID";
pub const LAW_TABLE: &str = "LAW_TABLE";
pub const LAW_INGESTION_DOMAIN: &str = "LAW_INGESTION_DOMAIN";
pub const LAW_MANAGEMENT_ENDPOINT: &str = "LAW_MANAGEMENT_ENDPOINT";

// Env values used by the azure credential providers.
pub const AZURE_TENANT_ID: &str = "AZURE_TENANT_ID";
pub const AZURE_CLIENT_ID: &str = "AZURE_CLIENT_ID";
pub const AZURE_CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";
pub const AZURE_AUTHORITY_HOST: &str = "AZURE_AUTHORITY_HOST";
pub const AZURE_OBJECT_ID: &str = "AZURE_OBJECT_ID";
pub const AZURE_MSI_RES_ID: &str = "AZURE_MSI_RES_ID";
pub const AZURE_MSI_SECRET: &str = "AZURE_MSI_SECRET";
pub const AZURE_IMDS_ENDPOINT: &str = "AZURE_IMDS_ENDPOINT";

pub const AZURE_PUBLIC_CLOUD: &str = "https://login.microsoftonline.com";
pub const IMDS_ENDPOINT: &str = "http://169.254.169.254/metadata/identity/oauth2/token";
