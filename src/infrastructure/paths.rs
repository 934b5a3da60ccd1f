//! Path helpers for the data directory and user-supplied paths.
//!
//! Handles tilde expansion, default storage locations, and shortening paths back to
//! `~` form for display.

use std::path::{Path, PathBuf};

/// Application directory name under the platform data directory.
pub const APP_DIR_NAME: &str = "event-explorer";

/// Name of the favorites storage file inside the data directory.
pub const FAVORITES_FILE_NAME: &str = "favorites.json";

/// Returns the default data directory, e.g. `~/.local/share/event-explorer` on Linux.
///
/// Falls back to `./.event-explorer` when the platform reports no data directory.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from(format!(".{APP_DIR_NAME}")),
        |dir| dir.join(APP_DIR_NAME),
    )
}

/// Location of the favorites file within `data_dir`.
#[must_use]
pub fn favorites_file(data_dir: &Path) -> PathBuf {
    data_dir.join(FAVORITES_FILE_NAME)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and all paths when no home directory is known,
/// are returned unchanged.
///
/// # Examples
///
/// ```
/// use event_explorer::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// assert_eq!(expand_tilde("~user/x"), PathBuf::from("~user/x"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };

    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Shortens paths under the home directory to `~/...` for display.
#[must_use]
pub fn display_path(path: &Path) -> String {
    dirs::home_dir()
        .and_then(|home| path.strip_prefix(home).ok().map(Path::to_path_buf))
        .map_or_else(
            || path.display().to_string(),
            |rest| Path::new("~").join(rest).display().to_string(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expands_to_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde("~/events.json"), home.join("events.json"));
    }

    #[cfg(unix)]
    #[test]
    fn display_path_round_trips_through_expand() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let path = home.join("data").join("favorites.json");
        let shown = display_path(&path);
        assert_eq!(shown, "~/data/favorites.json");
        assert_eq!(expand_tilde(&shown), path);
    }

    #[test]
    fn default_data_dir_is_app_specific() {
        let dir = default_data_dir();
        assert!(dir.ends_with(APP_DIR_NAME) || dir.ends_with(".event-explorer"));
    }
}
