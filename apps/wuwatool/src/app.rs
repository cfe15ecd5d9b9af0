//! Command handlers.
//!
//! Each handler works on the [`AppState`] it is given, prints what the
//! user asked to see, and queues a notice for the outcome. Privileged
//! work runs on its own tokio task.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use wuwatool_file_ops::{
    ApplyOutcome, PresetFolder, backup_entry, delete_preset, list_presets, resolve_root,
};

use crate::cli::{Command, ThemeChoice};
use crate::state::{AppState, RootStatus};

const DISCLAIMER: &str = "\
This tool overwrites the game's configuration files. The original
Engine.ini, GameUserSettings.ini and DeviceProfiles.ini are backed up once,
the first time a preset is applied, and can be restored with `restore`.
Use it at your own risk.";

const BACKUP_INFO: &str = "the game's original files are saved the first time a preset is applied; \
use `restore` to put them back";

/// Runs one command and prints the resulting notices.
///
/// Returns `false` when any error notice was raised.
pub async fn run(state: &mut AppState, command: Command) -> anyhow::Result<bool> {
    show_disclaimer_once(state)?;

    match command {
        Command::Status => status(state).await,
        Command::List { watch: false } => list(state),
        Command::List { watch: true } => {
            let cancel = CancellationToken::new();
            tokio::spawn({
                let cancel = cancel.clone();
                async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        cancel.cancel();
                    }
                }
            });
            watch(state, cancel).await;
        }
        Command::Apply { name } => apply(state, &name).await,
        Command::Restore => restore(state).await,
        Command::Delete { name, yes } => delete(state, &name, yes),
        Command::Select { reference } => select(state, &reference)?,
        Command::Settings { theme, show_delete } => settings(state, theme, show_delete)?,
    }

    let ok = !state.notices.has_errors();
    for notice in state.notices.drain() {
        println!("{notice}");
    }
    Ok(ok)
}

fn show_disclaimer_once(state: &mut AppState) -> anyhow::Result<()> {
    if !state.prefs.get().disclaimer_shown {
        println!("{DISCLAIMER}\n");
        state.prefs.mark_disclaimer_shown()?;
    }
    Ok(())
}

/// Returns the readable preset root, or queues the reason there is none.
fn ready_root(state: &mut AppState) -> Option<PathBuf> {
    match state.root_status() {
        RootStatus::Ready { path, .. } => Some(path),
        RootStatus::NotSelected => {
            state.notices.error_with("No folder selected", "run `select <folder>` first");
            None
        }
        RootStatus::PermissionLost { reference } => {
            state
                .notices
                .error_with("Folder permission lost", format!("{reference} is no longer readable"));
            None
        }
    }
}

pub async fn status(state: &mut AppState) {
    let bridge_ok = state.ops.shell().bridge().check_permission().await;
    let backup = state.ops.backup_exists().await;
    let paths = state.ops.paths();

    println!(
        "bridge:      {} ({})",
        state.ops.shell().bridge().name(),
        if bridge_ok { "ready" } else { "not granted" }
    );
    match state.root_status() {
        RootStatus::NotSelected => println!("folder:      none selected"),
        RootStatus::PermissionLost { reference } => {
            println!("folder:      {reference} (permission lost)")
        }
        RootStatus::Ready { reference, path } => {
            println!("folder:      {reference} -> {}", path.display())
        }
    }
    println!("game config: {}", paths.config_dir.display());
    println!(
        "backup:      {} ({})",
        paths.backup_dir.display(),
        if backup { "present" } else { "not created yet" }
    );

    if !bridge_ok {
        state.notices.warning("Privileged commands will fail until the bridge is granted");
    }
}

pub fn list(state: &mut AppState) {
    let Some(root) = ready_root(state) else {
        return;
    };

    match list_presets(&root) {
        Ok(presets) => print_presets(&presets, &state.ops.paths().backup_dir),
        Err(e) => state.notices.error_with("Could not list presets", e.to_string()),
    }
}

/// Re-lists the root every refresh interval until `cancel` fires.
///
/// Prints only when the set of presets changed since the last pass.
pub async fn watch(state: &mut AppState, cancel: CancellationToken) {
    let Some(root) = ready_root(state) else {
        return;
    };

    let period = Duration::from_secs(state.config.refresh_interval_secs.max(1));
    let mut ticker = tokio::time::interval(period);
    let mut last: Option<Vec<PresetFolder>> = None;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                match list_presets(&root) {
                    Ok(presets) => {
                        if last.as_ref() != Some(&presets) {
                            print_presets(&presets, &state.ops.paths().backup_dir);
                            last = Some(presets);
                        }
                    }
                    Err(e) => tracing::warn!(root = %root.display(), error = %e, "refresh failed"),
                }
            }
        }
    }

    tracing::debug!("watch stopped");
}

fn print_presets(presets: &[PresetFolder], backup_dir: &Path) {
    let backup = backup_entry(backup_dir);
    println!("  {:<24} restore original files", format!("[{}]", backup.name));
    for preset in presets {
        println!("  {}", preset.name);
    }
    if presets.is_empty() {
        println!("  (no presets found)");
    }
}

/// Checks `name` against the current listing, queueing an error if absent.
fn require_listed(state: &mut AppState, root: &Path, name: &str) -> bool {
    let known = list_presets(root)
        .map(|presets| presets.iter().any(|p| p.name == name))
        .unwrap_or(false);
    if !known {
        state
            .notices
            .error_with("Unknown preset", format!("{name} is not a folder in {}", root.display()));
    }
    known
}

pub async fn apply(state: &mut AppState, name: &str) {
    let Some(root) = ready_root(state) else {
        return;
    };

    if !require_listed(state, &root, name) {
        return;
    }

    let ops = state.ops.clone();
    let preset = name.to_string();
    let outcome = match tokio::spawn(async move { ops.apply_preset(&root, &preset).await }).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "apply task failed");
            ApplyOutcome::CopyFailed
        }
    };

    match outcome {
        ApplyOutcome::Applied => state.notices.success(format!("Config applied: {name}")),
        ApplyOutcome::BackupFailed => state
            .notices
            .error("Could not back up the original files; nothing was applied"),
        ApplyOutcome::CopyFailed => state.notices.error("Error applying config"),
    }
}

pub async fn restore(state: &mut AppState) {
    let ops = state.ops.clone();
    let restored = match tokio::spawn(async move { ops.restore_backup().await }).await {
        Ok(restored) => restored,
        Err(e) => {
            tracing::error!(error = %e, "restore task failed");
            false
        }
    };

    if restored {
        state.notices.success("Backup restored");
    } else {
        state.notices.error("Backup not found or could not be restored");
    }
}

pub fn delete(state: &mut AppState, name: &str, confirmed: bool) {
    if !state.prefs.get().show_delete {
        state.notices.error_with(
            "Deleting presets is disabled",
            "enable it with `settings --show-delete true`",
        );
        return;
    }

    let Some(root) = ready_root(state) else {
        return;
    };

    if !require_listed(state, &root, name) {
        return;
    }

    if !confirmed {
        state.notices.warning(format!(
            "This deletes {} and everything in it; pass --yes to confirm",
            root.join(name).display()
        ));
        return;
    }

    match delete_preset(&root, name) {
        Ok(_) => state.notices.success(format!("Folder deleted: {name}")),
        Err(e) => state.notices.error_with("Could not delete folder", e.to_string()),
    }
}

pub fn select(state: &mut AppState, reference: &str) -> anyhow::Result<()> {
    let storage_root = PathBuf::from(&state.config.storage_root);
    let Some(path) = resolve_root(reference, &storage_root) else {
        state
            .notices
            .error_with("Unrecognized folder reference", reference.to_string());
        return Ok(());
    };

    let presets = match list_presets(&path) {
        Ok(presets) => presets,
        Err(e) => {
            state.notices.error_with("Could not open folder", e.to_string());
            return Ok(());
        }
    };

    state.prefs.set_saved_uri(reference.trim())?;
    tracing::info!(reference, path = %path.display(), presets = presets.len(), "preset folder selected");

    println!("{}", path.display());
    print_presets(&presets, &state.ops.paths().backup_dir);
    state.notices.info_with("Backup", BACKUP_INFO);
    Ok(())
}

pub fn settings(
    state: &mut AppState,
    theme: Option<ThemeChoice>,
    show_delete: Option<bool>,
) -> anyhow::Result<()> {
    if let Some(theme) = theme {
        state.prefs.set_dark_theme(theme.as_pref())?;
    }
    if let Some(show) = show_delete {
        state.prefs.set_show_delete(show)?;
    }

    let prefs = state.prefs.get();
    let theme = match prefs.dark_theme {
        Some(true) => "dark",
        Some(false) => "light",
        None => "system",
    };
    println!("theme:       {theme}");
    println!("show delete: {}", prefs.show_delete);
    println!("prefs file:  {}", state.prefs.path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wuwatool_file_ops::BACKUP_FILES;
    use wuwatool_settings::{NoticeKind, PreferenceStore};
    use wuwatool_shell::{BridgeKind, CommandBridge};

    use super::*;
    use crate::config::Config;

    /// State whose storage root, game dirs and prefs all live in `dir`.
    fn state_in(dir: &Path) -> AppState {
        let config = Config {
            bridge: BridgeKind::Local,
            storage_root: dir.to_string_lossy().into_owned(),
            game_package: "com.example.game".into(),
            refresh_interval_secs: 1,
            ..Config::default()
        };
        let prefs = PreferenceStore::load(dir.join("prefs.json")).unwrap();
        AppState::with_bridge(config, prefs, Arc::new(CommandBridge::new(BridgeKind::Local)))
    }

    fn seed_game(state: &AppState) {
        let dir = &state.ops.paths().config_dir;
        std::fs::create_dir_all(dir).unwrap();
        for name in BACKUP_FILES {
            std::fs::write(dir.join(name), format!("original {name}")).unwrap();
        }
    }

    fn seed_preset(storage: &Path, name: &str, engine: &str) {
        let dir = storage.join("Presets").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("Engine.ini"), engine).unwrap();
    }

    fn kinds(state: &mut AppState) -> Vec<NoticeKind> {
        state.notices.drain().into_iter().map(|n| n.kind).collect()
    }

    #[tokio::test]
    async fn select_apply_restore_flow() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_in(tmp.path());
        seed_game(&state);
        seed_preset(tmp.path(), "Low", "low engine");

        select(&mut state, "primary:Presets").unwrap();
        assert_eq!(kinds(&mut state), [NoticeKind::Info]);
        assert_eq!(state.prefs.get().saved_uri.as_deref(), Some("primary:Presets"));

        apply(&mut state, "Low").await;
        assert_eq!(kinds(&mut state), [NoticeKind::Success]);
        let engine = state.ops.paths().config_dir.join("Engine.ini");
        assert_eq!(std::fs::read_to_string(&engine).unwrap(), "low engine");

        restore(&mut state).await;
        assert_eq!(kinds(&mut state), [NoticeKind::Success]);
        assert_eq!(std::fs::read_to_string(&engine).unwrap(), "original Engine.ini");
    }

    #[tokio::test]
    async fn apply_without_folder_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_in(tmp.path());

        apply(&mut state, "Low").await;
        assert_eq!(kinds(&mut state), [NoticeKind::Error]);
    }

    #[tokio::test]
    async fn apply_unknown_preset_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_in(tmp.path());
        seed_game(&state);
        seed_preset(tmp.path(), "Low", "low");
        select(&mut state, "primary:Presets").unwrap();
        state.notices.drain();

        apply(&mut state, "Missing").await;
        assert_eq!(kinds(&mut state), [NoticeKind::Error]);
        assert!(!state.ops.paths().backup_dir.exists());
    }

    #[tokio::test]
    async fn apply_without_game_files_reports_backup_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_in(tmp.path());
        seed_preset(tmp.path(), "Low", "low");
        select(&mut state, "primary:Presets").unwrap();
        state.notices.drain();

        apply(&mut state, "Low").await;
        let notices = state.notices.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Error);
        assert!(notices[0].title.contains("back up"));
    }

    #[tokio::test]
    async fn restore_without_backup_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_in(tmp.path());

        restore(&mut state).await;
        assert_eq!(kinds(&mut state), [NoticeKind::Error]);
    }

    #[test]
    fn select_rejects_bad_reference() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_in(tmp.path());

        select(&mut state, "no-separator").unwrap();
        assert_eq!(kinds(&mut state), [NoticeKind::Error]);
        assert!(state.prefs.get().saved_uri.is_none());

        select(&mut state, "primary:DoesNotExist").unwrap();
        assert_eq!(kinds(&mut state), [NoticeKind::Error]);
        assert!(state.prefs.get().saved_uri.is_none());
    }

    #[test]
    fn delete_needs_confirmation_and_permission() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_in(tmp.path());
        seed_preset(tmp.path(), "Low", "low");
        seed_preset(tmp.path(), "High", "high");
        select(&mut state, "primary:Presets").unwrap();
        state.notices.drain();
        let low = tmp.path().join("Presets").join("Low");

        delete(&mut state, "Low", false);
        assert_eq!(kinds(&mut state), [NoticeKind::Warning]);
        assert!(low.exists());

        state.prefs.set_show_delete(false).unwrap();
        delete(&mut state, "Low", true);
        assert_eq!(kinds(&mut state), [NoticeKind::Error]);
        assert!(low.exists());

        state.prefs.set_show_delete(true).unwrap();
        delete(&mut state, "Low", true);
        assert_eq!(kinds(&mut state), [NoticeKind::Success]);
        assert!(!low.exists());
        assert!(tmp.path().join("Presets").join("High").exists());
    }

    #[cfg(unix)]
    #[test]
    fn delete_refuses_names_not_in_listing() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_in(tmp.path());
        seed_preset(tmp.path(), "High", "high");
        let presets = tmp.path().join("Presets");
        std::os::unix::fs::symlink(presets.join("High"), presets.join("Alias")).unwrap();
        select(&mut state, "primary:Presets").unwrap();
        state.notices.drain();

        delete(&mut state, "Alias", true);
        let notices = state.notices.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Unknown preset");
        assert!(presets.join("High").join("Engine.ini").is_file());

        delete(&mut state, "backup", true);
        assert_eq!(kinds(&mut state), [NoticeKind::Error]);
    }

    #[test]
    fn settings_persist() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_in(tmp.path());

        settings(&mut state, Some(ThemeChoice::Dark), Some(false)).unwrap();

        let reloaded = PreferenceStore::load(tmp.path().join("prefs.json")).unwrap();
        assert_eq!(reloaded.get().dark_theme, Some(true));
        assert!(!reloaded.get().show_delete);
    }

    #[tokio::test]
    async fn run_marks_disclaimer_and_reports_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_in(tmp.path());
        assert!(!state.prefs.get().disclaimer_shown);

        let ok = run(&mut state, Command::Restore).await.unwrap();
        assert!(!ok);
        assert!(state.prefs.get().disclaimer_shown);
        assert!(state.notices.is_empty());
    }

    #[tokio::test]
    async fn watch_stops_on_cancel() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_in(tmp.path());
        seed_preset(tmp.path(), "Low", "low");
        select(&mut state, "primary:Presets").unwrap();

        let cancel = CancellationToken::new();
        let stopper = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            stopper.cancel();
        });

        tokio::time::timeout(Duration::from_secs(5), watch(&mut state, cancel))
            .await
            .expect("watch did not stop");
    }
}
