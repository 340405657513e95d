//! Command-line interface definition.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point for the dotfiles linker.
#[derive(Parser, Debug)]
#[command(
    name = "pondorasti",
    about = "Mirror dotfiles packages into the home directory as symlinks",
    version
)]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Override dotfiles root directory
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Directory that receives targets replaced by `link --force`
    #[arg(long, global = true)]
    pub backup_dir: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create symlinks for one package, or all packages
    Link(LinkOpts),
    /// Remove symlinks owned by one package, or all packages
    Unlink(UnlinkOpts),
    /// Show link status per package and file
    Status(StatusOpts),
    /// List packages and their target directories
    List,
    /// Print version information
    Version,
}

/// Options for the `link` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct LinkOpts {
    /// Package to link (all packages when omitted)
    pub package: Option<String>,

    /// Back up and replace files that already exist at the target
    #[arg(short, long)]
    pub force: bool,

    /// Keep dangling symlinks instead of removing them
    #[arg(long)]
    pub no_prune: bool,
}

/// Options for the `unlink` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct UnlinkOpts {
    /// Package to unlink (all packages when omitted)
    pub package: Option<String>,
}

/// Options for the `status` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct StatusOpts {
    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}
