//! Status command implementation.
use anyhow::{Context as _, Result};
use std::path::Path;

use crate::cli::{GlobalOpts, StatusOpts};
use crate::dotfiles::{LinkStatus, PackageInfo, PackageStatus};
use crate::logging::Logger;

const RESET: &str = "\x1b[0m";

/// Run the status command.
///
/// # Errors
///
/// Returns an error if setup fails or the JSON output cannot be serialized.
#[allow(clippy::print_stdout)]
pub fn run(global: &GlobalOpts, opts: &StatusOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let statuses = setup.dotfiles.all_statuses();

    if opts.json {
        let json = serde_json::to_string_pretty(&statuses).context("serializing status")?;
        println!("{json}");
        return Ok(());
    }

    if statuses.is_empty() {
        log.info("no packages found");
        return Ok(());
    }

    log.stage("Dotfiles status");
    for line in render(&statuses, setup.dotfiles.home(), true) {
        log.info(&line);
    }
    Ok(())
}

/// One line per package followed by an indented line per file, targets shown
/// relative to `home`.
#[must_use]
pub fn render(statuses: &[PackageInfo], home: &Path, color: bool) -> Vec<String> {
    let paint = |color_code: &str, icon: &str| {
        if color {
            format!("{color_code}{icon}{RESET}")
        } else {
            icon.to_string()
        }
    };

    let mut lines = Vec::new();
    for package in statuses {
        let (code, icon) = package_style(package.status);
        lines.push(format!("{} {}", paint(code, icon), package.name));
        for file in &package.files {
            let (code, icon) = file_style(file.status);
            let mut line = format!(
                "    {} {}",
                paint(code, icon),
                super::tilde(&file.target, home)
            );
            if file.status == LinkStatus::Dangling {
                line.push_str(" (dangling)");
            }
            lines.push(line);
        }
    }
    lines
}

const fn package_style(status: PackageStatus) -> (&'static str, &'static str) {
    match status {
        PackageStatus::Linked => ("\x1b[32m", "✓"),
        PackageStatus::Partial => ("\x1b[33m", "◐"),
        PackageStatus::Unlinked => ("\x1b[90m", "○"),
    }
}

const fn file_style(status: LinkStatus) -> (&'static str, &'static str) {
    match status {
        LinkStatus::Linked => ("\x1b[32m", "✓"),
        LinkStatus::Unlinked => ("\x1b[90m", "○"),
        LinkStatus::Conflict | LinkStatus::Dangling => ("\x1b[31m", "✗"),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::dotfiles::FileStatus;
    use std::path::PathBuf;

    fn file(target: &str, status: LinkStatus) -> FileStatus {
        FileStatus {
            source: PathBuf::from("/repo/dotfiles/zsh/x"),
            target: PathBuf::from(target),
            status,
        }
    }

    #[test]
    fn render_plain() {
        let statuses = vec![
            PackageInfo {
                name: "git".to_string(),
                status: PackageStatus::Linked,
                files: vec![file("/home/u/.gitconfig", LinkStatus::Linked)],
            },
            PackageInfo {
                name: "zsh".to_string(),
                status: PackageStatus::Partial,
                files: vec![
                    file("/home/u/.zshrc", LinkStatus::Linked),
                    file("/home/u/.zshenv", LinkStatus::Conflict),
                    file("/home/u/.zprofile", LinkStatus::Dangling),
                ],
            },
        ];
        let lines = render(&statuses, Path::new("/home/u"), false);
        insta::assert_snapshot!(lines.join("\n"), @r"
        ✓ git
            ✓ ~/.gitconfig
        ◐ zsh
            ✓ ~/.zshrc
            ✗ ~/.zshenv
            ✗ ~/.zprofile (dangling)
        ");
    }

    #[test]
    fn render_colored_wraps_icons() {
        let statuses = vec![PackageInfo {
            name: "nvim".to_string(),
            status: PackageStatus::Unlinked,
            files: vec![],
        }];
        let lines = render(&statuses, Path::new("/home/u"), true);
        assert_eq!(lines, vec!["\x1b[90m○\x1b[0m nvim"]);
    }
}
