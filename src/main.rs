//! `pondorasti` command-line entry point.

use anyhow::Result;
use clap::Parser;

use pondorasti_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    let command = match &args.command {
        cli::Command::Link(_) => "link",
        cli::Command::Unlink(_) => "unlink",
        cli::Command::Status(_) => "status",
        cli::Command::List => "list",
        cli::Command::Version => {
            commands::version::run();
            return Ok(());
        }
    };
    logging::init_subscriber(args.verbose, command);
    let log = logging::Logger::new(command);

    match args.command {
        cli::Command::Link(opts) => commands::link::run(&args.global, &opts, &log),
        cli::Command::Unlink(opts) => commands::unlink::run(&args.global, &opts, &log),
        cli::Command::Status(opts) => commands::status::run(&args.global, &opts, &log),
        cli::Command::List => commands::list::run(&args.global, &log),
        cli::Command::Version => Ok(()),
    }
}
