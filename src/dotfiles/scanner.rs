//! Package and file enumeration.
use std::fs::DirEntry;
use std::path::{Path, PathBuf};

use super::{Dotfiles, PLACEHOLDER_FILE};

/// Names of the non-hidden directories directly under `root`, sorted.
///
/// A missing root yields an empty list.
#[must_use]
pub fn list_packages(root: &Path) -> Vec<String> {
    read_sorted(root)
        .into_iter()
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| !name.starts_with('.'))
        .collect()
}

/// Relative paths of every regular file under `<root>/<package>`, depth
/// first in name order, skipping the placeholder file.
///
/// Symlinks inside the package are not followed and not listed. A missing
/// package directory yields an empty list.
#[must_use]
pub fn list_files(root: &Path, package: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk(&root.join(package), Path::new(""), &mut files);
    files
}

fn walk(dir: &Path, relative: &Path, files: &mut Vec<PathBuf>) {
    for entry in read_sorted(dir) {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let name = entry.file_name();
        let rel = relative.join(&name);
        if file_type.is_dir() {
            walk(&entry.path(), &rel, files);
        } else if file_type.is_file() && name != PLACEHOLDER_FILE {
            files.push(rel);
        }
    }
}

/// Entries of `dir` sorted by file name. Unreadable or missing directories
/// produce no entries.
pub(super) fn read_sorted(dir: &Path) -> Vec<DirEntry> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!("cannot read {}: {e}", dir.display());
            }
            return Vec::new();
        }
    };
    let mut entries: Vec<DirEntry> = entries.filter_map(Result::ok).collect();
    entries.sort_by_key(DirEntry::file_name);
    entries
}

impl Dotfiles {
    /// All packages under the dotfiles root.
    #[must_use]
    pub fn packages(&self) -> Vec<String> {
        list_packages(self.root())
    }

    /// Member files of `package`, relative to the package directory.
    #[must_use]
    pub fn files(&self, package: &str) -> Vec<PathBuf> {
        list_files(self.root(), package)
    }
}
