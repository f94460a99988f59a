//! Where `inputmask` keeps its mask options and logs.
//!
//! `config.yaml` holds a [`MaskConfig`](crate::MaskConfig); `logs/` receives the
//! daily log file written by [`crate::tracing::init`].

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "inputmask";

/// `$XDG_CONFIG_HOME/inputmask`, falling back to `~/.config/inputmask`.
/// On Windows, `%APPDATA%\inputmask`.
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// Default mask configuration read when `--config` is not given
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// Directory of the rolling `inputmask.log` files
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path).map_err(|e| format!("cannot create {}: {e}", path.display()))
}

/// Create the log directory if needed and return it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "no config directory".to_string())?;
    ensure_dir(&logs)?;
    Ok(logs)
}
