//! Subcommand implementations and the setup they share.
pub mod link;
pub mod list;
pub mod status;
pub mod unlink;
pub mod version;

use anyhow::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::cli::GlobalOpts;
use crate::config::{self, Config};
use crate::dotfiles::Dotfiles;
use crate::error::{ConfigError, PackageError, PondorastiError};
use crate::logging::Logger;

/// Environment variable naming the dotfiles root.
pub const ROOT_ENV: &str = "PONDORASTI_DOTFILES";

/// Directory name of the dotfiles root inside the repository.
pub const ROOT_DIR_NAME: &str = "dotfiles";

/// Shared state produced by the common command setup sequence.
///
/// Root resolution, home lookup, and configuration loading happen here so
/// each command starts from a ready [`Dotfiles`] handle.
#[derive(Debug)]
pub struct CommandSetup {
    /// Handle over the resolved configuration.
    pub dotfiles: Dotfiles,
}

impl CommandSetup {
    /// Resolve the dotfiles root and home directory, then load configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the dotfiles root does not exist, the home
    /// directory cannot be determined, or `targets.toml` is invalid.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let root = resolve_root(global);
        let home = config::home_dir().map_err(PondorastiError::from)?;
        Ok(Self::load(&root, &home, global.backup_dir.as_deref(), log)?)
    }

    /// Build the setup from explicit paths.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRoot`] if `root` is not a directory, or
    /// any error from [`Config::load`].
    pub fn load(
        root: &Path,
        home: &Path,
        backup_dir: Option<&Path>,
        log: &Logger,
    ) -> Result<Self, PondorastiError> {
        if !root.is_dir() {
            return Err(ConfigError::MissingRoot {
                path: root.to_path_buf(),
            }
            .into());
        }
        let root = dunce::canonicalize(root).map_err(|source| ConfigError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        log.debug(&format!("dotfiles root: {}", root.display()));
        log.debug(&format!("home: {}", home.display()));

        let config = Config::load(&root, home, backup_dir)?;
        log.debug(&format!("backup dir: {}", config.backup_dir.display()));

        Ok(Self {
            dotfiles: Dotfiles::new(config),
        })
    }

    /// The packages a command should process: just `requested` when given,
    /// otherwise every package.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::NotFound`] if `requested` is not a package.
    pub fn select_packages(&self, requested: Option<&str>) -> Result<Vec<String>, PondorastiError> {
        let available = self.dotfiles.packages();
        match requested {
            None => Ok(available),
            Some(name) if available.iter().any(|p| p == name) => Ok(vec![name.to_string()]),
            Some(name) => Err(PackageError::NotFound {
                name: name.to_string(),
                available,
            }
            .into()),
        }
    }
}

/// Determine the dotfiles root from the command line and environment.
///
/// Order: `--root`, `$PONDORASTI_DOTFILES`, a `dotfiles/` directory beside
/// the repository holding the binary, then `./dotfiles`.
#[must_use]
pub fn resolve_root(global: &GlobalOpts) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_root_from(
        global.root.as_deref(),
        std::env::var_os(ROOT_ENV),
        std::env::current_exe().ok().as_deref(),
        &cwd,
    )
}

fn resolve_root_from(
    explicit: Option<&Path>,
    env: Option<OsString>,
    exe: Option<&Path>,
    cwd: &Path,
) -> PathBuf {
    if let Some(root) = explicit {
        return root.to_path_buf();
    }
    if let Some(root) = env.filter(|v| !v.is_empty()) {
        return PathBuf::from(root);
    }

    if let Some(parent) = exe.and_then(Path::parent) {
        // target/<profile>/ → repo root, or bin/ → repo root
        let candidates = [parent.join("../.."), parent.join("..")];
        for candidate in &candidates {
            let root = candidate.join(ROOT_DIR_NAME);
            if root.is_dir()
                && let Ok(root) = dunce::canonicalize(&root)
            {
                return root;
            }
        }
    }

    cwd.join(ROOT_DIR_NAME)
}

/// Print the summary and bail if any package reported errors.
///
/// # Errors
///
/// Returns an error if one or more packages recorded a failure.
pub fn finish(log: &Logger) -> Result<()> {
    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} package(s) reported errors");
    }
    Ok(())
}

/// Replace a leading home directory with `~` for display.
#[must_use]
pub fn tilde(path: &Path, home: &Path) -> String {
    path.strip_prefix(home).map_or_else(
        |_| path.display().to_string(),
        |rest| {
            if rest.as_os_str().is_empty() {
                "~".to_string()
            } else {
                format!("~/{}", rest.display())
            }
        },
    )
}
