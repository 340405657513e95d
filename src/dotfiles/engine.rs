//! Link / unlink engine.
//!
//! Both operations process files sequentially in scan order and never fail
//! as a whole: per-file problems are collected in the report's `errors` and
//! processing continues. `link` may replace a conflicting target when forced
//! (after moving it to the backup directory); `unlink` only ever deletes a
//! symlink whose stored value is exactly the file's source path.
use anyhow::Result;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::Dotfiles;
use super::paths::display_relative;
use crate::resources::Occupant;
use crate::resources::helpers::fs::{ensure_parent_dir, entry_exists, move_entry, remove_entry};
use crate::resources::symlink::remove_symlink;

/// Options for [`Dotfiles::link`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkOptions {
    /// Back up and replace conflicting targets instead of reporting them.
    pub force: bool,
    /// Remove dangling symlinks before linking.
    pub prune: bool,
    /// Report what would change without touching the filesystem.
    pub dry_run: bool,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            force: false,
            prune: true,
            dry_run: false,
        }
    }
}

/// Options for [`Dotfiles::unlink`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnlinkOptions {
    /// Report what would change without touching the filesystem.
    pub dry_run: bool,
}

/// Outcome of linking one package. Entries are paths relative to the
/// package's target root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkReport {
    /// Newly created symlinks.
    pub linked: Vec<String>,
    /// Files that were already linked.
    pub skipped: Vec<String>,
    /// Dangling symlinks removed.
    pub pruned: Vec<String>,
    /// Conflicting targets moved to the backup directory (also in `linked`
    /// when the new link succeeded).
    pub backed_up: Vec<String>,
    /// `"<path> (<reason>)"` for every file that could not be handled.
    pub errors: Vec<String>,
}

impl LinkReport {
    /// `true` if any file failed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// `true` if the package had nothing to do at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.linked.is_empty()
            && self.skipped.is_empty()
            && self.pruned.is_empty()
            && self.backed_up.is_empty()
            && self.errors.is_empty()
    }
}

/// Outcome of unlinking one package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnlinkReport {
    /// Symlinks removed.
    pub unlinked: Vec<String>,
    /// Files with nothing at the target.
    pub skipped: Vec<String>,
    /// `"<path> (<reason>)"` for every target left in place.
    pub errors: Vec<String>,
}

impl UnlinkReport {
    /// `true` if any file failed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// `true` if the package had no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unlinked.is_empty() && self.skipped.is_empty() && self.errors.is_empty()
    }
}

impl Dotfiles {
    /// Link every file of `package` into its target root.
    ///
    /// The caller is responsible for checking that the dotfiles root and the
    /// package exist.
    #[must_use]
    pub fn link(&self, package: &str, opts: LinkOptions) -> LinkReport {
        let target_root = self.target_root(package);
        let mut report = LinkReport::default();

        let pruned = if opts.prune {
            self.prune(package, &target_root, opts.dry_run, &mut report)
        } else {
            HashSet::new()
        };

        for rel in self.files(package) {
            let name = rel.display().to_string();
            let resource = self.resource_in(package, &target_root, &rel);

            // A dry run leaves pruned links in place; they would be gone by now.
            let occupant = if opts.dry_run && pruned.contains(&resource.target) {
                Occupant::Absent
            } else {
                resource.occupant()
            };

            match occupant {
                Occupant::Owned => {
                    report.skipped.push(name);
                    continue;
                }
                Occupant::Absent => {}
                Occupant::ForeignLink { .. } | Occupant::Other => {
                    if !opts.force {
                        report.errors.push(format!("{name} (file exists at target)"));
                        continue;
                    }
                    if !opts.dry_run
                        && let Err(e) = self.back_up(package, &resource.target, &rel)
                    {
                        report.errors.push(format!("{name} (failed to backup: {e:#})"));
                        continue;
                    }
                    tracing::debug!(package, "backed up {}", resource.target.display());
                    report.backed_up.push(name.clone());
                }
            }

            if opts.dry_run {
                tracing::debug!(package, "would link {}", resource.description());
                report.linked.push(name);
                continue;
            }

            if let Err(e) = ensure_parent_dir(&resource.target) {
                report.errors.push(format!("{name} ({e:#})"));
                continue;
            }
            match resource.create() {
                Ok(()) => {
                    tracing::debug!(package, "linked {}", resource.description());
                    report.linked.push(name);
                }
                Err(e) => report.errors.push(format!("{name} ({e})")),
            }
        }

        report
    }

    /// Remove every symlink of `package` that provably belongs to it.
    ///
    /// Regular files and symlinks pointing anywhere other than the exact
    /// source path are reported and left untouched.
    #[must_use]
    pub fn unlink(&self, package: &str, opts: UnlinkOptions) -> UnlinkReport {
        let target_root = self.target_root(package);
        let mut report = UnlinkReport::default();

        for rel in self.files(package) {
            let name = rel.display().to_string();
            let resource = self.resource_in(package, &target_root, &rel);

            match resource.occupant() {
                Occupant::Absent => report.skipped.push(name),
                Occupant::Other => report.errors.push(format!("{name} (not a symlink)")),
                Occupant::ForeignLink { .. } => {
                    report
                        .errors
                        .push(format!("{name} (symlink points elsewhere)"));
                }
                Occupant::Owned if opts.dry_run => {
                    tracing::debug!(package, "would unlink {}", resource.description());
                    report.unlinked.push(name);
                }
                Occupant::Owned => match resource.remove() {
                    Ok(()) => {
                        tracing::debug!(package, "unlinked {}", resource.description());
                        report.unlinked.push(name);
                    }
                    Err(e) => report.errors.push(format!("{name} ({e})")),
                },
            }
        }

        report
    }

    /// Remove the dangling links of `package`. Returns the targets that were
    /// (or, in a dry run, would be) removed.
    fn prune(
        &self,
        package: &str,
        target_root: &Path,
        dry_run: bool,
        report: &mut LinkReport,
    ) -> HashSet<PathBuf> {
        let mut removed = HashSet::new();
        for dangling in self.find_dangling(package) {
            let name = display_relative(&dangling.target, target_root);
            if dry_run {
                tracing::debug!(package, "would prune {}", dangling.target.display());
            } else if let Err(e) = remove_symlink(&dangling.target) {
                report
                    .errors
                    .push(format!("{name} (failed to remove: {e})"));
                continue;
            } else {
                tracing::debug!(package, "pruned {}", dangling.target.display());
            }
            report.pruned.push(name);
            removed.insert(dangling.target);
        }
        removed
    }

    /// Move `target` to `<backup_dir>/<relative>`. An older backup at the same
    /// path is replaced.
    fn back_up(&self, package: &str, target: &Path, relative: &Path) -> Result<()> {
        let backup = self.config().backup_dir.join(relative);
        ensure_parent_dir(&backup)?;
        if entry_exists(&backup) {
            tracing::warn!(package, "replacing earlier backup {}", backup.display());
            remove_entry(&backup)?;
        }
        move_entry(target, &backup)?;
        Ok(())
    }
}
