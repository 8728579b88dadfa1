use crate::config::Config;
use crate::db::sqlite::RecordStore;
use crate::error::ReaderError;
use crate::service::{CredentialService, Library, PreferencesService, ReadingSession};
use tracing::info;

/// Everything the UI layer talks to, wired from one [`Config`].
#[derive(Clone)]
pub struct ReaderCore {
    store: RecordStore,
    preferences: PreferencesService,
    credentials: CredentialService,
    library: Library,
}

impl ReaderCore {
    /// Open the store, seed defaults and prepare the library folder.
    pub async fn bootstrap(cfg: &Config) -> Result<Self, ReaderError> {
        let store = RecordStore::open(cfg.database_path()).await?;
        store.initialize().await?;

        let library = Library::new(cfg.library_path()).with_usage_guide(cfg.usage_guide);
        library.ensure_ready().await?;

        info!(
            database = %cfg.database_path().display(),
            library = %library.root().display(),
            "reader core ready"
        );

        Ok(Self {
            preferences: PreferencesService::new(store.clone()),
            credentials: CredentialService::new(store.clone()),
            store,
            library,
        })
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn preferences(&self) -> &PreferencesService {
        &self.preferences
    }

    pub fn credentials(&self) -> &CredentialService {
        &self.credentials
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Whether the password prompt must be shown before the library.
    pub async fn startup_lock_required(&self) -> Result<bool, ReaderError> {
        let settings = self.preferences.get_app_settings().await?;
        self.credentials.startup_lock_required(&settings).await
    }

    pub fn new_session(&self) -> ReadingSession {
        ReadingSession::new(self.preferences.clone())
    }

    /// Open a library file by name.
    pub async fn open_session(&self, file_name: &str) -> Result<ReadingSession, ReaderError> {
        let path = self.library.path_of(file_name)?;
        if !self.library.file_exists(file_name).await? {
            return Err(ReaderError::NotFound(file_name.to_string()));
        }
        let mut session = self.new_session();
        session.open(path).await?;
        Ok(session)
    }

    pub async fn shutdown(&self) {
        self.store.close().await;
    }
}
