//! Per-package outcome types for the run summary.

/// Per-package result for summary reporting.
#[derive(Debug, Clone)]
pub struct PackageEntry {
    /// Package name.
    pub name: String,
    /// Final outcome of the package.
    pub outcome: Outcome,
    /// Optional detail message (e.g. counts or the first error).
    pub message: Option<String>,
}

/// Outcome of processing one package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every file was handled.
    Ok,
    /// Nothing to do: the package was already in the requested state.
    Skipped,
    /// Ran in dry-run mode; no changes were applied.
    DryRun,
    /// At least one file could not be handled.
    Failed,
}

impl Outcome {
    /// Stable name carried in the `outcome` field of summary events.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Skipped => "skipped",
            Self::DryRun => "dry-run",
            Self::Failed => "failed",
        }
    }

    /// Inverse of [`label`](Self::label).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        [Self::Ok, Self::Skipped, Self::DryRun, Self::Failed]
            .into_iter()
            .find(|outcome| outcome.label() == label)
    }

    /// Summary icon.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Ok => "✓",
            Self::Skipped => "○",
            Self::DryRun => "~",
            Self::Failed => "✗",
        }
    }
}
