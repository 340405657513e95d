//! Dotfiles package linker.
//!
//! Every directory under the dotfiles root is a *package*; its files are
//! mirrored into a target root (the home directory unless configured
//! otherwise) as symlinks. Links can be created, removed, inspected, and
//! orphaned links left behind by deleted files are found and pruned.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: dotfiles root, home directory, package target table
//! - **[`resources`]**: symlink and filesystem primitives
//! - **[`dotfiles`]**: package scanning, status, dangling detection, link/unlink
//! - **[`commands`]**: top-level subcommand orchestration (`link`, `unlink`, `status`, `list`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod dotfiles;
pub mod error;
pub mod logging;
pub mod resources;
