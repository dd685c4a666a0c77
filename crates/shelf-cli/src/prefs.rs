//! Preference file location.

use std::path::PathBuf;

use directories::ProjectDirs;
use shelf::prefs::FilePrefs;

/// Get the preference file path.
fn prefs_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "shelf")?;
    Some(dirs.config_dir().join("prefs.json"))
}

/// Open the file-backed preference store.
///
/// Returns `None` when no config directory can be determined; callers
/// fall back to defaults, preferences just don't persist.
pub fn open() -> Option<FilePrefs> {
    match prefs_path() {
        Some(path) => Some(FilePrefs::new(path)),
        None => {
            tracing::warn!("could not determine config directory, preferences will not persist");
            None
        }
    }
}
