//! List command implementation.
use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::dotfiles::Dotfiles;
use crate::logging::Logger;

/// Run the list command.
///
/// # Errors
///
/// Returns an error if setup fails.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let lines = render(&setup.dotfiles);
    if lines.is_empty() {
        log.info("no packages found");
        return Ok(());
    }

    log.stage("Packages");
    for line in &lines {
        log.info(line);
    }
    Ok(())
}

/// `<package> -> <target root>` for every package, with the home directory
/// shown as `~`.
#[must_use]
pub fn render(dotfiles: &Dotfiles) -> Vec<String> {
    let packages = dotfiles.packages();
    let width = packages.iter().map(String::len).max().unwrap_or(0);
    packages
        .iter()
        .map(|name| {
            let target = super::tilde(&dotfiles.target_root(name), dotfiles.home());
            format!("{name:<width$} -> {target}")
        })
        .collect()
}
