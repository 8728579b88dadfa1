use crate::error::ReaderError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Runtime configuration, resolved from defaults and `EZREAD_*` variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// App-private directory holding the database and the imported files.
    pub data_dir: PathBuf,
    pub database_file: String,
    pub library_dir: String,
    pub loglevel: String,
    /// Write the usage guide into an empty library on first run.
    pub usage_guide: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            database_file: "userData.db".to_string(),
            library_dir: "TxtFiles".to_string(),
            loglevel: "info".to_string(),
            usage_guide: true,
        }
    }
}

impl Config {
    /// Load `.env` (if any), then extract from defaults + environment.
    pub fn load() -> Result<Self, ReaderError> {
        dotenvy::dotenv().ok();
        Self::from_figment(Self::figment())
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed("EZREAD_"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ReaderError> {
        Ok(figment.extract()?)
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }

    pub fn library_path(&self) -> PathBuf {
        self.data_dir.join(&self.library_dir)
    }
}
