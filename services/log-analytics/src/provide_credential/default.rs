use crate::credential::Token;
use crate::provide_credential::{
    AzureCliCredentialProvider, ClientSecretCredentialProvider, ImdsCredentialProvider,
};
use lawsend_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

/// Default provider that tries multiple credential sources in order.
///
/// 1. Client secret (service principal from `AZURE_*` env)
/// 2. Azure CLI (`az account get-access-token`)
/// 3. IMDS (managed identity)
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Token>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        let chain = ProvideCredentialChain::new()
            .push(ClientSecretCredentialProvider::new())
            .push(AzureCliCredentialProvider::new())
            .push(ImdsCredentialProvider::new());

        Self { chain }
    }
}

impl DefaultCredentialProvider {
    /// Create a new default provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `provider` in front of the default sources.
    pub fn push_front(self, provider: impl ProvideCredential<Credential = Token>) -> Self {
        let chain = ProvideCredentialChain::new().push(provider).push(self.chain);
        Self { chain }
    }
}

impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Token;

    fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx)
    }
}
