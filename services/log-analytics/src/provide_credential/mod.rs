mod static_provider;
pub use static_provider::StaticTokenProvider;

mod client_secret;
pub use client_secret::ClientSecretCredentialProvider;

mod azure_cli;
pub use azure_cli::AzureCliCredentialProvider;

mod imds;
pub use imds::ImdsCredentialProvider;

mod default;
pub use default::DefaultCredentialProvider;
