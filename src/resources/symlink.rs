//! Symlink resource.
use std::io;
use std::path::{Path, PathBuf};

/// What currently occupies a symlink's target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Occupant {
    /// Nothing is there, not even a broken symlink.
    Absent,
    /// A symlink whose stored value is exactly the expected source.
    Owned,
    /// A symlink storing some other value.
    ForeignLink {
        /// The stored link value.
        points_to: PathBuf,
    },
    /// A regular file, directory, or other non-symlink entry.
    Other,
}

/// A symlink from `target` to `source` that can be inspected and created.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// The file the symlink should point at.
    pub source: PathBuf,
    /// Where the symlink lives.
    pub target: PathBuf,
}

impl SymlinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }

    /// Human-readable description of this resource.
    #[must_use]
    pub fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    /// Inspect the target path without following a final symlink.
    ///
    /// Ownership is decided by exact equality of the stored link value and
    /// `source`; no canonicalization is applied to either side.
    #[must_use]
    pub fn occupant(&self) -> Occupant {
        let Ok(meta) = self.target.symlink_metadata() else {
            return Occupant::Absent;
        };
        if !meta.is_symlink() {
            return Occupant::Other;
        }
        match std::fs::read_link(&self.target) {
            Ok(existing) if existing == self.source => Occupant::Owned,
            Ok(existing) => Occupant::ForeignLink {
                points_to: existing,
            },
            Err(_) => Occupant::Other,
        }
    }

    /// Create the symlink. The target must be free and its parent must exist.
    ///
    /// # Errors
    ///
    /// Returns the underlying OS error if the link cannot be created.
    pub fn create(&self) -> io::Result<()> {
        create_symlink(&self.source, &self.target)
    }

    /// Delete the symlink at `target`. Callers must have established
    /// ownership through [`occupant`](Self::occupant) first.
    ///
    /// # Errors
    ///
    /// Returns the underlying OS error if the link cannot be removed.
    pub fn remove(&self) -> io::Result<()> {
        remove_symlink(&self.target)
    }
}

/// Create a symlink at `link` storing `value`.
///
/// # Errors
///
/// Returns the underlying OS error.
pub fn create_symlink(value: &Path, link: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(value, link)
    }

    #[cfg(windows)]
    {
        if value.is_dir() {
            std::os::windows::fs::symlink_dir(value, link)
        } else {
            std::os::windows::fs::symlink_file(value, link)
        }
    }
}

/// Remove a symlink without touching what it points at.
///
/// On Windows, directory symlinks must be removed with `remove_dir`; the raw
/// `FILE_ATTRIBUTE_DIRECTORY` bit tells the two kinds apart.
///
/// # Errors
///
/// Returns the underlying OS error.
pub fn remove_symlink(path: &Path) -> io::Result<()> {
    let meta = std::fs::symlink_metadata(path)?;
    if is_dir_like(&meta) {
        std::fs::remove_dir(path)
    } else {
        std::fs::remove_file(path)
    }
}

fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
    }
    #[cfg(not(windows))]
    {
        meta.is_dir()
    }
}
