//! Link command implementation.
use anyhow::Result;

use crate::cli::{GlobalOpts, LinkOpts};
use crate::dotfiles::{Dotfiles, LinkOptions, LinkReport};
use crate::logging::{Logger, Outcome};

/// Run the link command.
///
/// # Errors
///
/// Returns an error if setup fails, the named package does not exist, or any
/// package reported per-file errors.
pub fn run(global: &GlobalOpts, opts: &LinkOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let packages = setup.select_packages(opts.package.as_deref())?;
    if packages.is_empty() {
        log.info("no packages found");
        return Ok(());
    }

    let options = LinkOptions {
        force: opts.force,
        prune: !opts.no_prune,
        dry_run: global.dry_run,
    };
    link_packages(&setup.dotfiles, &packages, options, log);
    super::finish(log)
}

/// Link each package in turn, logging every file and recording one summary
/// entry per package.
pub fn link_packages(dotfiles: &Dotfiles, packages: &[String], options: LinkOptions, log: &Logger) {
    for package in packages {
        log.stage(&format!("Linking {package}"));
        let report = dotfiles.link(package, options);
        render(&report, options.dry_run, log);
        let (outcome, message) = outcome(&report, options.dry_run);
        log.record_package(package, outcome, message.as_deref());
    }
}

fn render(report: &LinkReport, dry_run: bool, log: &Logger) {
    let emit = |verb: &str, path: &str| {
        if dry_run {
            log.dry_run(&format!("would {verb} {path}"));
        } else {
            log.info(&format!("{verb} {path}"));
        }
    };

    for path in &report.pruned {
        emit("prune", path);
    }
    for path in &report.backed_up {
        emit("back up", path);
    }
    for path in &report.linked {
        emit("link", path);
    }
    for path in &report.skipped {
        log.debug(&format!("{path} (already linked)"));
    }
    for error in &report.errors {
        log.error(error);
    }
    if report.is_empty() {
        log.info("(no files)");
    }
}

fn outcome(report: &LinkReport, dry_run: bool) -> (Outcome, Option<String>) {
    if report.has_errors() {
        return (
            Outcome::Failed,
            Some(format!("{} error(s)", report.errors.len())),
        );
    }
    let changed = report.linked.len() + report.pruned.len();
    if changed == 0 {
        return (Outcome::Skipped, Some("up to date".to_string()));
    }
    let mut parts = vec![format!("{} linked", report.linked.len())];
    if !report.pruned.is_empty() {
        parts.push(format!("{} pruned", report.pruned.len()));
    }
    if !report.backed_up.is_empty() {
        parts.push(format!("{} backed up", report.backed_up.len()));
    }
    let status = if dry_run { Outcome::DryRun } else { Outcome::Ok };
    (status, Some(parts.join(", ")))
}
