//! Link-state classification.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{Dotfiles, FileStatus, LinkStatus, PackageInfo, PackageStatus};
use crate::resources::{Occupant, SymlinkResource};

impl Dotfiles {
    /// The symlink that would mirror `relative` from `package`.
    #[must_use]
    pub fn resource(&self, package: &str, relative: &Path) -> SymlinkResource {
        self.resource_in(package, &self.target_root(package), relative)
    }

    /// Like [`resource`](Self::resource) with an already-resolved target root.
    pub(super) fn resource_in(
        &self,
        package: &str,
        target_root: &Path,
        relative: &Path,
    ) -> SymlinkResource {
        SymlinkResource::new(
            self.package_dir(package).join(relative),
            target_root.join(relative),
        )
    }

    /// Classify one package file against its target.
    #[must_use]
    pub fn file_status(&self, package: &str, relative: &Path) -> FileStatus {
        classify(self.resource(package, relative))
    }

    /// Per-file and rolled-up status of `package`, dangling links included.
    #[must_use]
    pub fn package_status(&self, package: &str) -> PackageInfo {
        let target_root = self.target_root(package);
        let per_file = self
            .files(package)
            .into_iter()
            .map(|rel| classify(self.resource_in(package, &target_root, &rel)));
        let files = merge_by_target(per_file, self.find_dangling(package));

        PackageInfo {
            name: package.to_string(),
            status: PackageStatus::rollup(&files),
            files,
        }
    }

    /// [`package_status`](Self::package_status) for every package.
    #[must_use]
    pub fn all_statuses(&self) -> Vec<PackageInfo> {
        self.packages()
            .iter()
            .map(|name| self.package_status(name))
            .collect()
    }
}

fn classify(resource: SymlinkResource) -> FileStatus {
    let status = match resource.occupant() {
        Occupant::Absent => LinkStatus::Unlinked,
        Occupant::Owned => LinkStatus::Linked,
        Occupant::ForeignLink { .. } | Occupant::Other => LinkStatus::Conflict,
    };
    FileStatus {
        source: resource.source,
        target: resource.target,
        status,
    }
}

/// Merge per-file and dangling statuses keyed by target path. A later entry
/// for the same target replaces the earlier one in place.
fn merge_by_target(
    per_file: impl IntoIterator<Item = FileStatus>,
    dangling: impl IntoIterator<Item = FileStatus>,
) -> Vec<FileStatus> {
    let mut merged = Vec::new();
    let mut index = HashMap::<PathBuf, usize>::new();
    for status in per_file.into_iter().chain(dangling) {
        if let Some(&i) = index.get(&status.target) {
            if let Some(slot) = merged.get_mut(i) {
                *slot = status;
            }
        } else {
            index.insert(status.target.clone(), merged.len());
            merged.push(status);
        }
    }
    merged
}
