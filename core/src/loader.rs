use crate::{Context, Error, ProvideCredential, Result, SigningCredential};
use std::sync::{Arc, Mutex};

/// CredentialLoader loads a credential once and hands out clones until it
/// stops being valid.
#[derive(Clone, Debug)]
pub struct CredentialLoader<K: SigningCredential> {
    ctx: Context,
    provider: Arc<dyn ProvideCredential<Credential = K>>,
    credential: Arc<Mutex<Option<K>>>,
}

impl<K: SigningCredential> CredentialLoader<K> {
    /// Create a new loader.
    pub fn new(ctx: Context, provider: impl ProvideCredential<Credential = K>) -> Self {
        Self {
            ctx,
            provider: Arc::new(provider),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Return the cached credential, loading a fresh one if needed.
    ///
    /// Fails with [`ErrorKind::CredentialInvalid`](crate::ErrorKind::CredentialInvalid)
    /// when the provider has nothing to offer.
    pub fn load(&self) -> Result<K> {
        let cached = self.credential.lock().expect("lock poisoned").clone();
        if let Some(cred) = cached.filter(|c| c.is_valid()) {
            return Ok(cred);
        }

        let cred = self
            .provider
            .provide_credential(&self.ctx)?
            .ok_or_else(|| Error::credential_invalid("no valid credential found"))?;
        *self.credential.lock().expect("lock poisoned") = Some(cred.clone());
        Ok(cred)
    }
}
