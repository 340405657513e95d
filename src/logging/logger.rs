//! Structured logger with summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET, SUMMARY_TARGET};
use super::types::{Outcome, PackageEntry};

/// `<user cache dir>/pondorasti/<command>.log`, creating the directory.
/// `None` if there is no cache directory or it cannot be created.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let dir = dirs::cache_dir()?.join("pondorasti");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Structured logger with summary collection.
///
/// Messages go through `tracing`; the subscriber installed by
/// [`init_subscriber`](super::subscriber::init_subscriber) renders them on the
/// console and appends them to the command's log file.
#[derive(Debug)]
pub struct Logger {
    packages: Mutex<Vec<PackageEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger for `command`.
    ///
    /// Only remembers the log file path for the summary; the file itself is
    /// written by the subscriber's file layer.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self::with_log_file(log_file_path(command))
    }

    /// Create a logger that reports `log_file` in its summary.
    #[must_use]
    pub const fn with_log_file(log_file: Option<PathBuf>) -> Self {
        Self {
            packages: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// Return the log file path, if available.
    #[cfg(test)]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded package entries (test-only).
    #[cfg(test)]
    pub(crate) fn package_entries(&self) -> Vec<PackageEntry> {
        self.packages.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Record a package result for the summary.
    pub fn record_package(&self, name: &str, outcome: Outcome, message: Option<&str>) {
        if let Ok(mut guard) = self.packages.lock() {
            guard.push(PackageEntry {
                name: name.to_string(),
                outcome,
                message: message.map(String::from),
            });
        }
    }

    /// Count the packages that failed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.packages.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|p| p.outcome == Outcome::Failed)
                .count()
        })
    }

    /// Print the summary of all recorded packages: one line per package,
    /// then the totals and the log file location.
    #[allow(clippy::print_stdout)]
    pub fn print_summary(&self) {
        let packages = match self.packages.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => return,
        };
        if packages.is_empty() {
            return;
        }

        println!();
        self.stage("Summary");
        for package in &packages {
            tracing::info!(
                target: SUMMARY_TARGET,
                package = %package.name,
                outcome = package.outcome.label(),
                "{}",
                package.message.as_deref().unwrap_or_default()
            );
        }

        let count = |outcome: Outcome| packages.iter().filter(|p| p.outcome == outcome).count();
        println!();
        self.info(&format!(
            "{} packages: {} ok, {} unchanged, {} dry-run, {} failed",
            packages.len(),
            count(Outcome::Ok),
            count(Outcome::Skipped),
            count(Outcome::DryRun),
            count(Outcome::Failed),
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("log: {}", path.display()));
        }
    }
}

// Output goes through the global subscriber; the logger itself holds no
// per-message state.
#[allow(clippy::unused_self)]
impl Logger {
    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::isolated_logger;
    use std::fs;

    fn log_contents(log: &Logger) -> String {
        fs::read_to_string(log.log_path().expect("log path")).unwrap()
    }

    #[test]
    fn logger_starts_empty() {
        let (log, _tmp, _guard) = isolated_logger();
        assert!(log.package_entries().is_empty());
        assert_eq!(log.failure_count(), 0);
    }

    #[test]
    fn record_package_with_message() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_package("zsh", Outcome::Failed, Some("1 error"));
        let entries = log.package_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "zsh");
        assert_eq!(entries[0].outcome, Outcome::Failed);
        assert_eq!(entries[0].message.as_deref(), Some("1 error"));
    }

    #[test]
    fn failure_count_counts_only_failed() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_package("a", Outcome::Ok, None);
        log.record_package("b", Outcome::Failed, Some("x"));
        log.record_package("c", Outcome::Failed, Some("y"));
        log.record_package("d", Outcome::Skipped, None);
        log.record_package("e", Outcome::DryRun, None);
        assert_eq!(log.failure_count(), 2);
    }

    #[test]
    fn log_file_has_header() {
        let (log, _tmp, _guard) = isolated_logger();
        assert!(log_contents(&log).starts_with("# pondorasti "));
    }

    #[test]
    fn debug_always_written_to_file() {
        let (log, _tmp, _guard) = isolated_logger();
        log.debug("debug-marker");
        let contents = log_contents(&log);
        assert!(contents.contains("[debug] debug-marker"));
    }

    #[test]
    fn levels_are_tagged_in_file() {
        let (log, _tmp, _guard) = isolated_logger();
        log.stage("stage-marker");
        log.warn("warn-marker");
        log.error("error-marker");
        log.dry_run("dry-marker");
        let contents = log_contents(&log);
        assert!(contents.contains("==> stage-marker"));
        assert!(contents.contains("[warn] warn-marker"));
        assert!(contents.contains("[error] error-marker"));
        assert!(contents.contains("[dry run] dry-marker"));
    }

    #[test]
    fn summary_is_written_without_ansi() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_package("zsh", Outcome::Ok, Some("2 linked"));
        log.record_package("git", Outcome::Failed, Some("1 error"));
        log.print_summary();
        let contents = log_contents(&log);
        assert!(contents.contains("    ✓ zsh (2 linked)"));
        assert!(contents.contains("    ✗ git (1 error)"));
        assert!(contents.contains("2 packages: 1 ok, 0 unchanged, 0 dry-run, 1 failed"));
        assert!(!contents.contains('\x1b'));
    }
}
