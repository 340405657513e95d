// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed dotfiles root, fake home directory,
// and backup directory, plus a fluent builder so each integration test can
// set up an isolated environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use pondorasti_cli::config::Config;
use pondorasti_cli::dotfiles::Dotfiles;

/// An isolated dotfiles root and home directory backed by a
/// [`tempfile::TempDir`].
///
/// Layout: `<tmp>/dotfiles/`, `<tmp>/home/`, `<tmp>/backup/`. Everything is
/// deleted when the context is dropped.
pub struct IntegrationTestContext {
    tmp: tempfile::TempDir,
    base: PathBuf,
}

impl IntegrationTestContext {
    /// Create a new context with an empty dotfiles root and home directory.
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let base = dunce::canonicalize(tmp.path()).expect("canonicalize temp dir");
        std::fs::create_dir_all(base.join("dotfiles")).expect("create dotfiles dir");
        std::fs::create_dir_all(base.join("home")).expect("create home dir");
        Self { tmp, base }
    }

    /// The dotfiles root.
    pub fn root(&self) -> PathBuf {
        self.base.join("dotfiles")
    }

    /// The fake home directory.
    pub fn home(&self) -> PathBuf {
        self.base.join("home")
    }

    /// Where forced links move conflicting targets.
    pub fn backup_dir(&self) -> PathBuf {
        self.base.join("backup")
    }

    /// `<root>/<package>/<relative>`.
    pub fn source(&self, package: &str, relative: &str) -> PathBuf {
        self.root().join(package).join(relative)
    }

    /// `<home>/<relative>`.
    pub fn target(&self, relative: &str) -> PathBuf {
        self.home().join(relative)
    }

    /// Load configuration the same way the commands do.
    pub fn config(&self) -> Config {
        Config::load(&self.root(), &self.home(), Some(&self.backup_dir())).expect("load config")
    }

    /// A fresh [`Dotfiles`] handle over this context.
    pub fn dotfiles(&self) -> Dotfiles {
        Dotfiles::new(self.config())
    }

    /// Write a package file.
    pub fn write_source(&self, package: &str, relative: &str, content: &str) {
        write(&self.source(package, relative), content);
    }

    /// Write a file under the home directory.
    pub fn write_target(&self, relative: &str, content: &str) {
        write(&self.target(relative), content);
    }

    /// Snapshot of every entry under the home directory: relative path plus
    /// the link value for symlinks or the contents for files.
    pub fn home_tree(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect(&self.home(), &self.home(), &mut out);
        out
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context with an empty dotfiles root.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Add a file to `package`.
    pub fn with_file(self, package: &str, relative: &str, content: &str) -> Self {
        self.ctx.write_source(package, relative, content);
        self
    }

    /// Add an empty package directory.
    pub fn with_package(self, package: &str) -> Self {
        std::fs::create_dir_all(self.ctx.root().join(package)).expect("create package dir");
        self
    }

    /// Add a file to the home directory.
    pub fn with_home_file(self, relative: &str, content: &str) -> Self {
        self.ctx.write_target(relative, content);
        self
    }

    /// Write `targets.toml` at the dotfiles root.
    pub fn with_targets_toml(self, content: &str) -> Self {
        write(&self.ctx.root().join("targets.toml"), content);
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write file");
}

fn collect(dir: &Path, base: &Path, out: &mut Vec<String>) {
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .expect("read dir")
        .map(|e| e.expect("dir entry"))
        .collect();
    entries.sort_by_key(std::fs::DirEntry::file_name);
    for entry in entries {
        let path = entry.path();
        let rel = path.strip_prefix(base).expect("under base").display().to_string();
        let file_type = entry.file_type().expect("file type");
        if file_type.is_symlink() {
            let value = std::fs::read_link(&path).expect("read link");
            out.push(format!("{rel} -> {}", value.display()));
        } else if file_type.is_dir() {
            out.push(format!("{rel}/"));
            collect(&path, base, out);
        } else {
            let content = std::fs::read_to_string(&path).expect("read file");
            out.push(format!("{rel} = {content}"));
        }
    }
}
