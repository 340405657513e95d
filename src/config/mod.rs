//! Run configuration.
//!
//! Everything the link engine needs is resolved once per invocation and
//! passed in explicitly: the dotfiles root, the home directory, the
//! package → target table, and the force-mode backup directory.
pub mod targets;
pub mod toml_loader;

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
pub use targets::TargetTable;

/// Directory name used for force-mode backups under the system temp dir.
pub const BACKUP_DIR_NAME: &str = "pondorasti-dotfiles-backup";

/// All configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory whose subdirectories are packages.
    pub root: PathBuf,
    /// Current user's home directory.
    pub home: PathBuf,
    /// Package → target root table.
    pub targets: TargetTable,
    /// Where `--force` moves conflicting targets.
    pub backup_dir: PathBuf,
}

impl Config {
    /// Load the target table from `root` and assemble the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `targets.toml` exists but is unreadable or invalid.
    pub fn load(root: &Path, home: &Path, backup_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let targets = TargetTable::load(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            home: home.to_path_buf(),
            targets,
            backup_dir: backup_dir.map_or_else(default_backup_dir, Path::to_path_buf),
        })
    }
}

/// `<system temp>/pondorasti-dotfiles-backup`.
#[must_use]
pub fn default_backup_dir() -> PathBuf {
    std::env::temp_dir().join(BACKUP_DIR_NAME)
}

/// The current user's home directory.
///
/// # Errors
///
/// Returns [`ConfigError::HomeNotFound`] when it cannot be determined.
pub fn home_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}
