//! Application state passed into every command.

use std::path::PathBuf;
use std::sync::Arc;

use wuwatool_file_ops::{ConfigOps, resolve_root};
use wuwatool_settings::{NoticeQueue, PreferenceStore};
use wuwatool_shell::{PrivilegeBridge, ShellExecutor};

use crate::config::Config;

/// Where the selected preset root stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootStatus {
    /// No folder was ever selected.
    NotSelected,
    /// A folder was selected but can no longer be read.
    PermissionLost { reference: String },
    /// The folder resolves and is readable.
    Ready { reference: String, path: PathBuf },
}

/// Everything a command needs, owned in one place.
pub struct AppState {
    pub config: Config,
    pub prefs: PreferenceStore,
    pub ops: ConfigOps,
    pub notices: NoticeQueue,
}

impl AppState {
    /// Builds the state with the bridge named in `config`.
    pub fn new(config: Config, prefs: PreferenceStore) -> Self {
        let bridge = config.privilege_bridge();
        Self::with_bridge(config, prefs, bridge)
    }

    /// Builds the state on top of an explicit bridge.
    pub fn with_bridge(config: Config, prefs: PreferenceStore, bridge: Arc<dyn PrivilegeBridge>) -> Self {
        let ops = ConfigOps::new(ShellExecutor::new(bridge), config.game_paths());
        Self {
            config,
            prefs,
            ops,
            notices: NoticeQueue::new(),
        }
    }

    /// Resolves the stored root reference and checks it is readable.
    pub fn root_status(&self) -> RootStatus {
        let Some(reference) = self.prefs.get().saved_uri.clone() else {
            return RootStatus::NotSelected;
        };

        let storage_root = PathBuf::from(&self.config.storage_root);
        match resolve_root(&reference, &storage_root) {
            Some(path) if std::fs::read_dir(&path).is_ok() => RootStatus::Ready { reference, path },
            _ => RootStatus::PermissionLost { reference },
        }
    }
}
