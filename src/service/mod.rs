pub mod credential;
pub mod library;
pub mod preferences;
pub mod session;

pub use credential::CredentialService;
pub use library::Library;
pub use preferences::PreferencesService;
pub use session::{PageView, ReadingSession, SessionState};
