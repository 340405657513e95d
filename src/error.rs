//! Domain-specific error types for the setup CLI.
//!
//! Typed errors cover the hard-stop failures detected before the link engine
//! runs (missing dotfiles root, unknown package, unreadable configuration).
//! Per-file problems are never errors: the engine accumulates them as strings
//! in its reports. Command handlers convert these types to [`anyhow::Error`]
//! with `?`.
//!
//! # Error hierarchy
//!
//! ```text
//! PondorastiError
//! ├── Config(ConfigError)   : root/home resolution, targets.toml
//! └── Package(PackageError) : package lookup
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum PondorastiError {
    /// Configuration-related error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Package lookup error.
    #[error("Package error: {0}")]
    Package(#[from] PackageError),
}

/// Errors that arise while assembling the run configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The dotfiles root directory does not exist.
    #[error("No dotfiles/ directory found at {}", .path.display())]
    MissingRoot {
        /// Path that was checked.
        path: PathBuf,
    },

    /// The current user's home directory could not be determined.
    #[error("Cannot determine the home directory")]
    HomeNotFound,

    /// `targets.toml` exists but could not be parsed.
    #[error("Invalid target table in {}: {message}", .file.display())]
    InvalidTargets {
        /// File that failed to parse.
        file: PathBuf,
        /// Parser message.
        message: String,
    },

    /// An I/O error occurred while reading a config file.
    #[error("IO error reading config file {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise when a command names a package.
#[derive(Error, Debug)]
pub enum PackageError {
    /// The requested package is not a directory under the dotfiles root.
    #[error("Package \"{name}\" not found (available: {})", .available.join(", "))]
    NotFound {
        /// Requested package name.
        name: String,
        /// Packages that do exist.
        available: Vec<String>,
    },
}
