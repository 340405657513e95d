//! Package → target root table.
//!
//! Packages not listed in the table are mirrored straight into the home
//! directory. Entries use `~` as home-relative shorthand.
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::toml_loader;
use crate::error::ConfigError;

/// File under the dotfiles root that extends or overrides the built-in table.
pub const TARGETS_FILE: &str = "targets.toml";

/// Built-in target roots.
pub const DEFAULT_TARGETS: &[(&str, &str)] = &[
    ("cursor", "~/Library/Application Support/Cursor/User"),
    ("claude", "~/.claude"),
    // OpenCode also reads skills from ~/.claude/skills/
    ("agents", "~/.claude"),
    ("nvim", "~/.config/nvim"),
    ("opencode", "~/.config/opencode"),
];

#[derive(Debug, Default, Deserialize)]
struct TargetsFile {
    #[serde(default)]
    targets: BTreeMap<String, String>,
}

/// Immutable mapping from package name to target root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetTable {
    entries: BTreeMap<String, String>,
}

impl Default for TargetTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TargetTable {
    /// The built-in table with no overrides.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entries: DEFAULT_TARGETS
                .iter()
                .map(|(name, path)| ((*name).to_string(), (*path).to_string()))
                .collect(),
        }
    }

    /// The built-in table merged with `targets.toml` under `root`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if `targets.toml` exists but cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let file: TargetsFile = toml_loader::load_config(&root.join(TARGETS_FILE))?;
        let mut table = Self::builtin();
        table.entries.extend(file.targets);
        Ok(table)
    }

    /// The raw (unexpanded) entry for `package`.
    #[must_use]
    pub fn get(&self, package: &str) -> Option<&str> {
        self.entries.get(package).map(String::as_str)
    }

    /// Resolve the target root for `package`, defaulting to `home`.
    #[must_use]
    pub fn resolve(&self, package: &str, home: &Path) -> PathBuf {
        self.get(package)
            .map_or_else(|| home.to_path_buf(), |entry| expand_home(entry, home))
    }
}

/// Expand `~` / `~/…` against `home`. Absolute paths pass through; other
/// relative paths are taken as relative to `home`.
#[must_use]
pub fn expand_home(entry: &str, home: &Path) -> PathBuf {
    if entry == "~" {
        return home.to_path_buf();
    }
    if let Some(rest) = entry.strip_prefix("~/") {
        return home.join(rest);
    }
    let path = Path::new(entry);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        home.join(path)
    }
}
