//! Dotfiles package manager.
//!
//! A *package* is a directory under the dotfiles root; every regular file
//! inside it is mirrored into the package's target root as a symlink. The
//! filesystem is the only source of truth: every query re-derives state
//! from disk and nothing is cached between calls.
//!
//! - [`scanner`]: package and file enumeration
//! - [`status`]: per-file classification and package rollup
//! - [`dangling`]: orphaned links left behind by removed source files
//! - [`engine`]: `link` / `unlink`
//! - [`paths`]: lexical normalization and containment
pub mod dangling;
pub mod engine;
pub mod paths;
pub mod scanner;
pub mod status;

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::Config;

pub use engine::{LinkOptions, LinkReport, UnlinkOptions, UnlinkReport};

/// Placeholder that keeps otherwise-empty directories in version control.
/// Never linked.
pub const PLACEHOLDER_FILE: &str = ".gitkeep";

/// Relationship between one package file and its target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    /// Target is a symlink storing exactly the source path.
    Linked,
    /// Nothing exists at the target.
    Unlinked,
    /// Something other than our symlink occupies the target.
    Conflict,
    /// A symlink under the target root points into the package but its
    /// source no longer exists.
    Dangling,
}

/// Status of a single source/target pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStatus {
    /// Absolute path inside the dotfiles tree.
    pub source: PathBuf,
    /// Absolute path under the target root.
    pub target: PathBuf,
    /// Classification.
    pub status: LinkStatus,
}

/// Aggregate status of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageStatus {
    /// Every entry is linked.
    Linked,
    /// Some, but not all, entries are linked.
    Partial,
    /// No entry is linked, or there are no entries.
    Unlinked,
}

impl PackageStatus {
    /// Roll per-file statuses up into a package status.
    #[must_use]
    pub fn rollup(files: &[FileStatus]) -> Self {
        let linked = files
            .iter()
            .filter(|f| f.status == LinkStatus::Linked)
            .count();
        if files.is_empty() || linked == 0 {
            Self::Unlinked
        } else if linked == files.len() {
            Self::Linked
        } else {
            Self::Partial
        }
    }
}

/// A package with its rolled-up and per-file status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    /// Package (directory) name.
    pub name: String,
    /// Rolled-up status.
    pub status: PackageStatus,
    /// Per-file statuses, dangling links included.
    pub files: Vec<FileStatus>,
}

/// Entry point for all package queries and mutations.
#[derive(Debug, Clone)]
pub struct Dotfiles {
    config: Config,
}

impl Dotfiles {
    /// Wrap an already-resolved configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration this instance was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The dotfiles root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// The home directory.
    #[must_use]
    pub fn home(&self) -> &Path {
        &self.config.home
    }

    /// `<root>/<package>`.
    #[must_use]
    pub fn package_dir(&self, package: &str) -> PathBuf {
        self.config.root.join(package)
    }

    /// Directory the package is mirrored into.
    #[must_use]
    pub fn target_root(&self, package: &str) -> PathBuf {
        self.config.targets.resolve(package, &self.config.home)
    }
}
