//! Data and configuration locations.
//!
//! The data directory holds `config.toml` and the trace export file. It is
//! resolved from the environment in this order:
//!
//! 1. `$LAUNCHER_SEARCH_DATA_DIR`
//! 2. `$XDG_DATA_HOME/launcher-search`
//! 3. `$HOME/.local/share/launcher-search`
//! 4. `<temp dir>/launcher-search`

use std::path::PathBuf;

const APP_DIR_NAME: &str = "launcher-search";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "LAUNCHER_SEARCH_DATA_DIR";

/// Returns the data directory. It is not created here.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    resolve_data_dir(|key| std::env::var_os(key).map(PathBuf::from))
}

/// Returns the default configuration file path.
#[must_use]
pub fn get_config_path() -> PathBuf {
    get_data_dir().join(CONFIG_FILE_NAME)
}

fn resolve_data_dir(lookup: impl Fn(&str) -> Option<PathBuf>) -> PathBuf {
    let non_empty = |key: &str| lookup(key).filter(|path| !path.as_os_str().is_empty());

    if let Some(dir) = non_empty(DATA_DIR_ENV) {
        return dir;
    }
    if let Some(xdg) = non_empty("XDG_DATA_HOME") {
        return xdg.join(APP_DIR_NAME);
    }
    if let Some(home) = non_empty("HOME") {
        return home.join(".local").join("share").join(APP_DIR_NAME);
    }
    std::env::temp_dir().join(APP_DIR_NAME)
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading `~`, or with no `HOME` set, are returned as is.
///
/// # Examples
///
/// ```
/// use launcher_search::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, std::env::var_os("HOME").map(PathBuf::from))
}

fn expand_tilde_with(path: &str, home: Option<PathBuf>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => home,
        (path, Some(home)) if path.starts_with("~/") => home.join(&path[2..]),
        (path, _) => PathBuf::from(path),
    }
}
