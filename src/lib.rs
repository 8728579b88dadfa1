pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod pagination;
pub mod service;
pub mod telemetry;

pub use app::ReaderCore;
pub use config::Config;
pub use db::RecordStore;
pub use error::ReaderError;
pub use pagination::FontTier;
