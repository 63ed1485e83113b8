//! Persistence for registries: JSON files under the application data
//! directory, with atomic writes and timestamped backups.

pub mod json_backend;

pub use json_backend::{JsonStorage, LoadReport};

use std::{env, fs, path::Path, path::PathBuf};

use crate::errors::BillingError;

pub type Result<T> = std::result::Result<T, BillingError>;

const DEFAULT_DIR_NAME: &str = ".limpia_core";
const REGISTRY_DIR: &str = "registries";
const BACKUP_DIR: &str = "backups";

/// Returns the application-specific data directory, defaulting to
/// `~/.limpia_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("LIMPIA_CORE_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Absolute path to the managed registries directory.
pub fn registries_dir_in(base: &Path) -> PathBuf {
    base.join(REGISTRY_DIR)
}

/// Base directory for backup snapshots.
pub fn backups_dir_in(base: &Path) -> PathBuf {
    base.join(BACKUP_DIR)
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
