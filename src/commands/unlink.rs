//! Unlink command implementation.
use anyhow::Result;

use crate::cli::{GlobalOpts, UnlinkOpts};
use crate::dotfiles::{Dotfiles, UnlinkOptions, UnlinkReport};
use crate::logging::{Logger, Outcome};

/// Run the unlink command.
///
/// # Errors
///
/// Returns an error if setup fails, the named package does not exist, or any
/// package left a target in place because it did not own it.
pub fn run(global: &GlobalOpts, opts: &UnlinkOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let packages = setup.select_packages(opts.package.as_deref())?;
    if packages.is_empty() {
        log.info("no packages found");
        return Ok(());
    }

    let options = UnlinkOptions {
        dry_run: global.dry_run,
    };
    unlink_packages(&setup.dotfiles, &packages, options, log);
    super::finish(log)
}

/// Unlink each package in turn, recording one summary entry per package.
pub fn unlink_packages(
    dotfiles: &Dotfiles,
    packages: &[String],
    options: UnlinkOptions,
    log: &Logger,
) {
    for package in packages {
        log.stage(&format!("Unlinking {package}"));
        let report = dotfiles.unlink(package, options);
        render(&report, options.dry_run, log);
        let (outcome, message) = outcome(&report, options.dry_run);
        log.record_package(package, outcome, message.as_deref());
    }
}

fn render(report: &UnlinkReport, dry_run: bool, log: &Logger) {
    for path in &report.unlinked {
        if dry_run {
            log.dry_run(&format!("would unlink {path}"));
        } else {
            log.info(&format!("unlink {path}"));
        }
    }
    for path in &report.skipped {
        log.debug(&format!("{path} (not linked)"));
    }
    for error in &report.errors {
        log.error(error);
    }
    if report.is_empty() {
        log.info("(no files)");
    }
}

fn outcome(report: &UnlinkReport, dry_run: bool) -> (Outcome, Option<String>) {
    if report.has_errors() {
        (
            Outcome::Failed,
            Some(format!("{} error(s)", report.errors.len())),
        )
    } else if report.unlinked.is_empty() {
        (Outcome::Skipped, Some("nothing linked".to_string()))
    } else if dry_run {
        (
            Outcome::DryRun,
            Some(format!("{} unlinked", report.unlinked.len())),
        )
    } else {
        (
            Outcome::Ok,
            Some(format!("{} unlinked", report.unlinked.len())),
        )
    }
}
