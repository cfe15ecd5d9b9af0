//! User preferences and transient notices.
//!
//! Preferences are the small key-value state that survives restarts
//! (theme, delete-button visibility, selected preset root, disclaimer
//! flag). Notices are the one-line success/failure messages an action
//! reports back to the user.

mod error;
mod notice;
mod prefs;

pub use error::SettingsError;
pub use notice::{Notice, NoticeKind, NoticeQueue};
pub use prefs::{PreferenceStore, Preferences, config_dir};

/// Directory name under the platform config dir.
pub const APP_DIR_NAME: &str = "wuwatool";
