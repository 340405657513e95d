//! Orphaned symlink detection.
//!
//! When a file is removed or renamed in a package after it was linked, its
//! old symlink stays behind pointing at nothing. The scan is anchored at the
//! target root and at the directories that hold the package's current
//! targets. The home directory is only scanned one level deep; every other
//! anchor is walked fully.
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use super::paths::{is_path_under, resolve_link_value};
use super::scanner::read_sorted;
use super::{Dotfiles, FileStatus, LinkStatus};

impl Dotfiles {
    /// Symlinks under the package's target root that resolve into the
    /// package's source tree but whose source no longer exists.
    #[must_use]
    pub fn find_dangling(&self, package: &str) -> Vec<FileStatus> {
        let target_root = self.target_root(package);
        if !target_root.is_dir() {
            return Vec::new();
        }

        let mut anchors = BTreeSet::new();
        anchors.insert(target_root.clone());
        for rel in self.files(package) {
            if let Some(parent) = target_root.join(rel).parent() {
                anchors.insert(parent.to_path_buf());
            }
        }

        let package_dir = self.package_dir(package);
        let mut visited = HashSet::new();
        let mut found = Vec::new();
        for anchor in &anchors {
            if !anchor.is_dir() {
                continue;
            }
            let max_depth = if anchor == self.home() { 0 } else { usize::MAX };
            scan(anchor, max_depth, &package_dir, &mut visited, &mut found);
        }
        found
    }
}

/// Walk `anchor` with an explicit stack, recording dangling links into
/// `package_dir`. Directory symlinks are inspected as links, never entered.
fn scan(
    anchor: &Path,
    max_depth: usize,
    package_dir: &Path,
    visited: &mut HashSet<PathBuf>,
    found: &mut Vec<FileStatus>,
) {
    let mut stack: Vec<(PathBuf, usize)> = vec![(anchor.to_path_buf(), 0)];
    while let Some((dir, depth)) = stack.pop() {
        if !visited.insert(dir.clone()) {
            continue;
        }

        let mut subdirs = Vec::new();
        for entry in read_sorted(&dir) {
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            let path = entry.path();
            if file_type.is_dir() {
                if depth < max_depth {
                    subdirs.push(path);
                }
                continue;
            }
            if !file_type.is_symlink() {
                continue;
            }
            let Ok(value) = std::fs::read_link(&path) else {
                continue;
            };
            let resolved = resolve_link_value(&path, &value);
            if is_path_under(&resolved, package_dir) && !resolved.exists() {
                tracing::debug!(
                    "dangling: {} -> {}",
                    path.display(),
                    resolved.display()
                );
                found.push(FileStatus {
                    source: resolved,
                    target: path,
                    status: LinkStatus::Dangling,
                });
            }
        }

        // Reverse so the stack pops subdirectories in name order.
        stack.extend(subdirs.into_iter().rev().map(|d| (d, depth + 1)));
    }
}

#[cfg(all(test, unix))]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::{Config, TargetTable};
    use std::os::unix::fs::symlink;

    struct Fixture {
        _tmp: tempfile::TempDir,
        dotfiles: Dotfiles,
    }

    fn fixture() -> Fixture {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("dotfiles");
        let home = tmp.path().join("home");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::create_dir_all(&home).unwrap();
        let dotfiles = Dotfiles::new(Config {
            root,
            home,
            targets: TargetTable::builtin(),
            backup_dir: tmp.path().join("backup"),
        });
        Fixture {
            _tmp: tmp,
            dotfiles,
        }
    }

    fn add_file(d: &Dotfiles, package: &str, rel: &str) {
        let path = d.package_dir(package).join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "content").unwrap();
    }

    #[test]
    fn finds_link_to_removed_source() {
        let f = fixture();
        let d = &f.dotfiles;
        add_file(d, "zsh", ".zshrc");
        let gone = d.package_dir("zsh").join(".zprofile");
        let link = d.home().join(".zprofile");
        symlink(&gone, &link).unwrap();

        let dangling = d.find_dangling("zsh");
        assert_eq!(
            dangling,
            vec![FileStatus {
                source: gone,
                target: link,
                status: LinkStatus::Dangling,
            }]
        );
    }

    #[test]
    fn finds_link_when_package_has_no_files_left() {
        let f = fixture();
        let d = &f.dotfiles;
        std::fs::create_dir_all(d.package_dir("zsh")).unwrap();
        let link = d.home().join(".zshrc");
        symlink(d.package_dir("zsh").join(".zshrc"), &link).unwrap();

        let dangling = d.find_dangling("zsh");
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].target, link);
    }

    #[test]
    fn ignores_live_links_and_foreign_links() {
        let f = fixture();
        let d = &f.dotfiles;
        add_file(d, "zsh", ".zshrc");
        d.resource("zsh", Path::new(".zshrc")).create().unwrap();
        symlink("/somewhere/else", d.home().join(".bashrc")).unwrap();
        // Shares a string prefix with the package directory but is not inside it.
        symlink(
            d.root().join("zsh-old/.zlogin"),
            d.home().join(".zlogin"),
        )
        .unwrap();

        assert!(d.find_dangling("zsh").is_empty());
    }

    #[test]
    fn resolves_relative_link_values() {
        let f = fixture();
        let d = &f.dotfiles;
        add_file(d, "zsh", ".zshrc");
        symlink("../dotfiles/zsh/.zshenv", d.home().join(".zshenv")).unwrap();

        let dangling = d.find_dangling("zsh");
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].source, d.package_dir("zsh").join(".zshenv"));
    }

    #[test]
    fn home_is_not_scanned_recursively() {
        let f = fixture();
        let d = &f.dotfiles;
        add_file(d, "zsh", ".zshrc");
        let deep = d.home().join("projects/app");
        std::fs::create_dir_all(&deep).unwrap();
        symlink(d.package_dir("zsh").join("old"), deep.join("old")).unwrap();

        assert!(d.find_dangling("zsh").is_empty());
    }

    #[test]
    fn nested_target_dirs_are_scanned_fully() {
        let f = fixture();
        let d = &f.dotfiles;
        add_file(d, "nvim", "init.lua");
        let nested = d.home().join(".config/nvim/lua/plugins");
        std::fs::create_dir_all(&nested).unwrap();
        symlink(d.package_dir("nvim").join("lua/plugins/old.lua"), nested.join("old.lua"))
            .unwrap();

        let dangling = d.find_dangling("nvim");
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].target, nested.join("old.lua"));
    }

    #[test]
    fn missing_target_root_yields_nothing() {
        let f = fixture();
        add_file(&f.dotfiles, "nvim", "init.lua");
        assert!(f.dotfiles.find_dangling("nvim").is_empty());
    }

    #[test]
    fn shared_directories_reported_once() {
        let f = fixture();
        let d = &f.dotfiles;
        add_file(d, "nvim", "lua/a.lua");
        add_file(d, "nvim", "lua/b.lua");
        let lua = d.home().join(".config/nvim/lua");
        std::fs::create_dir_all(&lua).unwrap();
        symlink(d.package_dir("nvim").join("lua/gone.lua"), lua.join("gone.lua")).unwrap();

        assert_eq!(d.find_dangling("nvim").len(), 1);
    }
}
