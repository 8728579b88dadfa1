use crate::db::models::{AppSettings, Credential};
use crate::db::sqlite::RecordStore;
use crate::error::ReaderError;
use subtle::ConstantTimeEq;
use tracing::{info, warn};

/// The single stored password.
#[derive(Clone)]
pub struct CredentialService {
    store: RecordStore,
}

impl CredentialService {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Replace any stored secret with `secret`. Empty secrets are rejected
    /// before touching the store.
    pub async fn set_credential(&self, secret: &str) -> Result<(), ReaderError> {
        if secret.is_empty() {
            return Err(ReaderError::validation("The password cannot be empty!"));
        }
        self.store
            .replace_singleton(&Credential {
                secret: secret.to_string(),
            })
            .await?;
        info!("credential updated");
        Ok(())
    }

    /// Password form flow: both entries must be present and identical.
    pub async fn set_credential_confirmed(
        &self,
        secret: &str,
        confirmation: &str,
    ) -> Result<(), ReaderError> {
        if secret.is_empty() || confirmation.is_empty() {
            return Err(ReaderError::validation("The password cannot be empty!"));
        }
        if secret != confirmation {
            return Err(ReaderError::validation(
                "The passwords entered twice do not match!",
            ));
        }
        self.set_credential(secret).await
    }

    pub async fn get_credential(&self) -> Result<Option<String>, ReaderError> {
        Ok(self
            .store
            .get_singleton::<Credential>()
            .await?
            .map(|c| c.secret))
    }

    pub async fn has_credential(&self) -> Result<bool, ReaderError> {
        Ok(self
            .get_credential()
            .await?
            .is_some_and(|secret| !secret.is_empty()))
    }

    /// Check an unlock attempt. Surrounding whitespace in `input` is ignored.
    pub async fn verify(&self, input: &str) -> Result<bool, ReaderError> {
        let Some(stored) = self.get_credential().await? else {
            return Ok(false);
        };
        let matched = bool::from(input.trim().as_bytes().ct_eq(stored.as_bytes()));
        if !matched {
            warn!("credential verification failed");
        }
        Ok(matched)
    }

    /// Whether the app must ask for the password before opening the library.
    pub async fn startup_lock_required(&self, settings: &AppSettings) -> Result<bool, ReaderError> {
        if !settings.startup_password_enabled {
            return Ok(false);
        }
        self.has_credential().await
    }
}
