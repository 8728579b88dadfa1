use crate::db::models::{AppSettings, ReadingPreferences, ReadingProgress};
use crate::db::sqlite::RecordStore;
use crate::error::ReaderError;
use crate::service::credential::CredentialService;
use tracing::{debug, info};

/// Settings, reading preferences and per-file progress over the record store.
///
/// The `save_*` methods persist exactly what they are given. Cross-field
/// rules (exit lock needs the startup password) live in the `set_*` toggles.
#[derive(Clone)]
pub struct PreferencesService {
    store: RecordStore,
}

impl PreferencesService {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Stored settings, or all-false defaults when the row is missing.
    pub async fn get_app_settings(&self) -> Result<AppSettings, ReaderError> {
        Ok(self
            .store
            .get_singleton::<AppSettings>()
            .await?
            .unwrap_or_default())
    }

    pub async fn save_app_settings(
        &self,
        keep_screen_on: bool,
        startup_password_enabled: bool,
        exit_lock_enabled: bool,
    ) -> Result<(), ReaderError> {
        let settings = AppSettings {
            keep_screen_on,
            startup_password_enabled,
            exit_lock_enabled,
        };
        self.store.upsert_singleton(&settings).await?;
        debug!(?settings, "app settings saved");
        Ok(())
    }

    pub async fn get_reading_preferences(&self) -> Result<ReadingPreferences, ReaderError> {
        Ok(self
            .store
            .get_singleton::<ReadingPreferences>()
            .await?
            .unwrap_or_default())
    }

    pub async fn save_reading_preferences(
        &self,
        font_size: u32,
        background_color: impl Into<String>,
    ) -> Result<(), ReaderError> {
        let prefs = ReadingPreferences {
            font_size,
            background_color: background_color.into(),
        };
        self.store.upsert_singleton(&prefs).await?;
        debug!(
            font_size,
            background = %prefs.background_color,
            "reading preferences saved"
        );
        Ok(())
    }

    /// Last page read for `file_name`, 0 when the file has no progress yet.
    pub async fn get_reading_progress(&self, file_name: &str) -> Result<u32, ReaderError> {
        Ok(self
            .store
            .get_by_key(file_name)
            .await?
            .map(|p| p.last_page)
            .unwrap_or(0))
    }

    pub async fn save_reading_progress(
        &self,
        file_name: &str,
        last_page: u32,
    ) -> Result<(), ReaderError> {
        self.store
            .upsert_by_key(&ReadingProgress::new(file_name, last_page))
            .await
    }

    /// Turn the startup password on or off.
    ///
    /// Enabling needs a stored credential. Disabling also clears the exit
    /// lock. Returns whether anything was written.
    pub async fn set_startup_password(
        &self,
        enabled: bool,
        credentials: &CredentialService,
    ) -> Result<bool, ReaderError> {
        if enabled && !credentials.has_credential().await? {
            return Err(ReaderError::validation(
                "No password set. Cannot enable startup password!",
            ));
        }

        let current = self.get_app_settings().await?;
        if current.startup_password_enabled == enabled {
            return Ok(false);
        }
        let exit_lock_enabled = enabled && current.exit_lock_enabled;
        self.save_app_settings(current.keep_screen_on, enabled, exit_lock_enabled)
            .await?;
        info!(enabled, "startup password toggled");
        Ok(true)
    }

    /// Turn the exit lock on or off. Enabling needs the startup password.
    pub async fn set_exit_lock(&self, enabled: bool) -> Result<bool, ReaderError> {
        let current = self.get_app_settings().await?;
        if enabled && !current.startup_password_enabled {
            return Err(ReaderError::validation(
                "Startup password must be enabled first!",
            ));
        }
        if current.exit_lock_enabled == enabled {
            return Ok(false);
        }
        self.save_app_settings(
            current.keep_screen_on,
            current.startup_password_enabled,
            enabled,
        )
        .await?;
        info!(enabled, "exit lock toggled");
        Ok(true)
    }

    pub async fn set_keep_screen_on(&self, enabled: bool) -> Result<bool, ReaderError> {
        let current = self.get_app_settings().await?;
        if current.keep_screen_on == enabled {
            return Ok(false);
        }
        self.save_app_settings(
            enabled,
            current.startup_password_enabled,
            current.exit_lock_enabled,
        )
        .await?;
        info!(enabled, "keep screen on toggled");
        Ok(true)
    }
}
