use ezread::ReaderError;
use ezread::db::{AppSettings, Credential, RecordStore};
use ezread::service::{CredentialService, PreferencesService};
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    store: RecordStore,
    prefs: PreferencesService,
    creds: CredentialService,
}

async fn fixture() -> Fixture {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = RecordStore::open(dir.path().join("userData.db"))
        .await
        .expect("failed to open store");
    store.initialize().await.expect("failed to initialize store");
    Fixture {
        prefs: PreferencesService::new(store.clone()),
        creds: CredentialService::new(store.clone()),
        store,
        _dir: dir,
    }
}

#[tokio::test]
async fn reading_preferences_round_trip() {
    let fx = fixture().await;
    let defaults = fx.prefs.get_reading_preferences().await.unwrap();
    assert_eq!(defaults.font_size, 18);
    assert_eq!(defaults.background_color, "#FFF8E8");

    fx.prefs
        .save_reading_preferences(22, "#000000")
        .await
        .unwrap();
    let saved = fx.prefs.get_reading_preferences().await.unwrap();
    assert_eq!(saved.font_size, 22);
    assert_eq!(saved.background_color, "#000000");
}

#[tokio::test]
async fn settings_default_when_row_missing() {
    let fx = fixture().await;
    fx.store.delete_all::<AppSettings>().await.unwrap();
    assert_eq!(
        fx.prefs.get_app_settings().await.unwrap(),
        AppSettings::default()
    );

    fx.prefs.save_app_settings(true, false, false).await.unwrap();
    assert!(fx.prefs.get_app_settings().await.unwrap().keep_screen_on);
    assert_eq!(fx.store.count::<AppSettings>().await.unwrap(), 1);
}

#[tokio::test]
async fn raw_save_does_not_validate() {
    let fx = fixture().await;
    fx.prefs.save_app_settings(false, false, true).await.unwrap();
    let settings = fx.prefs.get_app_settings().await.unwrap();
    assert!(settings.exit_lock_enabled);
    assert!(!settings.startup_password_enabled);
}

#[tokio::test]
async fn reading_progress_defaults_to_zero() {
    let fx = fixture().await;
    assert_eq!(fx.prefs.get_reading_progress("book.txt").await.unwrap(), 0);
    fx.prefs.save_reading_progress("book.txt", 4).await.unwrap();

    let later = PreferencesService::new(fx.store.clone());
    assert_eq!(later.get_reading_progress("book.txt").await.unwrap(), 4);
}

#[tokio::test]
async fn credential_overwrite_keeps_latest() {
    let fx = fixture().await;
    assert_eq!(fx.creds.get_credential().await.unwrap(), None);
    assert!(!fx.creds.has_credential().await.unwrap());

    fx.creds.set_credential("a").await.unwrap();
    fx.creds.set_credential("b").await.unwrap();

    assert_eq!(fx.creds.get_credential().await.unwrap().as_deref(), Some("b"));
    assert!(fx.creds.has_credential().await.unwrap());
    assert_eq!(fx.store.count::<Credential>().await.unwrap(), 1);
}

#[tokio::test]
async fn empty_credential_is_rejected_without_side_effects() {
    let fx = fixture().await;
    fx.creds.set_credential("keep").await.unwrap();

    let err = fx.creds.set_credential("").await.unwrap_err();
    assert!(matches!(err, ReaderError::Validation(_)));
    assert_eq!(fx.creds.get_credential().await.unwrap().as_deref(), Some("keep"));
}

#[tokio::test]
async fn confirmed_credential_must_match() {
    let fx = fixture().await;
    let err = fx
        .creds
        .set_credential_confirmed("secret", "secreT")
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "The passwords entered twice do not match!");
    let err = fx
        .creds
        .set_credential_confirmed("", "")
        .await
        .unwrap_err();
    assert!(matches!(err, ReaderError::Validation(_)));
    assert_eq!(fx.store.count::<Credential>().await.unwrap(), 0);

    fx.creds
        .set_credential_confirmed("secret", "secret")
        .await
        .unwrap();
    assert_eq!(
        fx.creds.get_credential().await.unwrap().as_deref(),
        Some("secret")
    );
}

#[tokio::test]
async fn verify_trims_input() {
    let fx = fixture().await;
    assert!(!fx.creds.verify("anything").await.unwrap());

    fx.creds.set_credential("open sesame").await.unwrap();
    assert!(fx.creds.verify("  open sesame \n").await.unwrap());
    assert!(!fx.creds.verify("open").await.unwrap());
}

#[tokio::test]
async fn startup_toggle_requires_credential() {
    let fx = fixture().await;
    let err = fx
        .prefs
        .set_startup_password(true, &fx.creds)
        .await
        .unwrap_err();
    assert!(matches!(err, ReaderError::Validation(_)));
    assert!(!fx.prefs.get_app_settings().await.unwrap().startup_password_enabled);

    fx.creds.set_credential("pw").await.unwrap();
    assert!(fx.prefs.set_startup_password(true, &fx.creds).await.unwrap());
    assert!(!fx.prefs.set_startup_password(true, &fx.creds).await.unwrap());
    assert!(fx.prefs.get_app_settings().await.unwrap().startup_password_enabled);
}

#[tokio::test]
async fn exit_lock_requires_startup_password() {
    let fx = fixture().await;
    let err = fx.prefs.set_exit_lock(true).await.unwrap_err();
    assert_eq!(err.user_message(), "Startup password must be enabled first!");

    fx.creds.set_credential("pw").await.unwrap();
    fx.prefs.set_startup_password(true, &fx.creds).await.unwrap();
    assert!(fx.prefs.set_exit_lock(true).await.unwrap());

    // turning the startup password off drops the exit lock with it
    assert!(fx.prefs.set_startup_password(false, &fx.creds).await.unwrap());
    let settings = fx.prefs.get_app_settings().await.unwrap();
    assert!(!settings.startup_password_enabled);
    assert!(!settings.exit_lock_enabled);
}

#[tokio::test]
async fn keep_screen_on_toggle_preserves_other_fields() {
    let fx = fixture().await;
    fx.creds.set_credential("pw").await.unwrap();
    fx.prefs.set_startup_password(true, &fx.creds).await.unwrap();

    assert!(fx.prefs.set_keep_screen_on(true).await.unwrap());
    assert!(!fx.prefs.set_keep_screen_on(true).await.unwrap());
    let settings = fx.prefs.get_app_settings().await.unwrap();
    assert!(settings.keep_screen_on);
    assert!(settings.startup_password_enabled);
}

#[tokio::test]
async fn startup_lock_needs_flag_and_credential() {
    let fx = fixture().await;
    let mut settings = AppSettings::default();
    assert!(!fx.creds.startup_lock_required(&settings).await.unwrap());

    settings.startup_password_enabled = true;
    assert!(!fx.creds.startup_lock_required(&settings).await.unwrap());

    fx.creds.set_credential("pw").await.unwrap();
    assert!(fx.creds.startup_lock_required(&settings).await.unwrap());
}
