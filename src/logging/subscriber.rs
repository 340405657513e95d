//! Tracing subscriber setup: console formatter, file layer, and initialisation.
//!
//! Engine events carry a `package` field and are shown as `<package>: <msg>`.
//! Summary events (target [`SUMMARY_TARGET`]) carry `package` and `outcome`
//! and are rendered as one icon line per package.
use std::borrow::Cow;
use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

use tracing::field::{Field, Visit};
use tracing::{Event, Level};

use super::logger::log_file_path;
use super::types::Outcome;

/// Target of stage-header events.
pub const STAGE_TARGET: &str = "pondorasti::stage";
/// Target of dry-run events.
pub const DRY_RUN_TARGET: &str = "pondorasti::dry_run";
/// Target of per-package summary events.
pub const SUMMARY_TARGET: &str = "pondorasti::summary";

/// The event fields both renderers understand.
#[derive(Debug, Default)]
struct EventFields {
    message: String,
    package: Option<String>,
    outcome: Option<Outcome>,
}

impl EventFields {
    fn of(event: &Event<'_>) -> Self {
        let mut fields = Self::default();
        event.record(&mut fields);
        fields
    }

    fn set(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = value,
            "package" => self.package = Some(value),
            "outcome" => self.outcome = Outcome::from_label(&value),
            _ => {}
        }
    }

    fn body(&self) -> Cow<'_, str> {
        self.package.as_ref().map_or(Cow::Borrowed(self.message.as_str()), |package| {
            Cow::Owned(format!("{package}: {}", self.message))
        })
    }

    /// `✓ zsh (2 linked)`, or `✓ zsh` with no message.
    fn summary_line(&self) -> String {
        let icon = self.outcome.map_or("·", Outcome::icon);
        let package = self.package.as_deref().unwrap_or_default();
        if self.message.is_empty() {
            format!("{icon} {package}")
        } else {
            format!("{icon} {package} ({})", self.message)
        }
    }
}

impl Visit for EventFields {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.set(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set(field, value.to_string());
    }
}

/// Drop CSI escape sequences (`ESC [` up to a final byte in `@..=~`).
fn strip_ansi(text: &str) -> Cow<'_, str> {
    if !text.contains('\x1b') {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some((plain, escape)) = rest.split_once("\x1b[") {
        out.push_str(plain);
        let end = escape
            .find(|c: char| ('@'..='~').contains(&c))
            .map_or(escape.len(), |i| i + 1);
        rest = escape.get(end..).unwrap_or_default();
    }
    out.push_str(rest);
    Cow::Owned(out)
}

const fn outcome_color(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Ok => "\x1b[32m",
        Outcome::Skipped => "\x1b[33m",
        Outcome::DryRun => "\x1b[37m",
        Outcome::Failed => "\x1b[31m",
    }
}

/// Appends every event at `DEBUG` and above to the command's log file,
/// timestamped and without color codes.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Open the log file for `command` under the cache directory. `None` if
    /// it cannot be created.
    pub(super) fn new(command: &str) -> Option<Self> {
        Self::create(&log_file_path(command)?, command)
    }

    /// Truncate `path`, write a run header, and return a layer appending to it.
    pub(super) fn create(path: &Path, command: &str) -> Option<Self> {
        let version = option_env!("PONDORASTI_VERSION")
            .unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let started = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S");
        fs::write(path, format!("# pondorasti {version} {command} ({started} UTC)\n")).ok()?;
        let file = fs::OpenOptions::new().append(true).open(path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let metadata = event.metadata();
        let fields = EventFields::of(event);

        let line = match (*metadata.level(), metadata.target()) {
            (Level::INFO, STAGE_TARGET) => format!("==> {}", fields.message),
            (Level::INFO, SUMMARY_TARGET) => format!("    {}", fields.summary_line()),
            (Level::INFO, DRY_RUN_TARGET) => format!("    [dry run] {}", fields.body()),
            (Level::ERROR, _) => format!("    [error] {}", fields.body()),
            (Level::WARN, _) => format!("    [warn] {}", fields.body()),
            (Level::DEBUG, _) => format!("    [debug] {}", fields.body()),
            _ => format!("    {}", fields.body()),
        };

        let stamp = chrono::Utc::now().format("%H:%M:%S");
        if let Ok(mut file) = self.file.lock() {
            writeln!(file, "[{stamp}] {}", strip_ansi(&line)).ok();
        }
    }
}

/// Console formatter: `==>` stage headers, indented info lines, colored
/// `WARN`/`ERROR` prefixes, dimmed debug lines, colored summary icons.
#[derive(Debug)]
struct PondorastiFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for PondorastiFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let fields = EventFields::of(event);

        match (*metadata.level(), metadata.target()) {
            (Level::ERROR, _) => writeln!(writer, "\x1b[31mERROR\x1b[0m {}", fields.body()),
            (Level::WARN, _) => writeln!(writer, "\x1b[33mWARN\x1b[0m  {}", fields.body()),
            (Level::INFO, STAGE_TARGET) => {
                writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{}\x1b[0m", fields.message)
            }
            (Level::INFO, SUMMARY_TARGET) => {
                let color = fields.outcome.map_or("", outcome_color);
                writeln!(writer, "  {color}{}\x1b[0m", fields.summary_line())
            }
            (Level::INFO, DRY_RUN_TARGET) => {
                writeln!(writer, "  \x1b[33m[DRY RUN]\x1b[0m {}", fields.body())
            }
            (Level::INFO, _) => writeln!(writer, "  {}", fields.body()),
            _ => writeln!(writer, "  \x1b[2m{}\x1b[0m", fields.body()),
        }
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Console output goes through [`PondorastiFormatter`] (warnings and errors
/// to stderr, everything else to stdout). Every event at `DEBUG` and above is
/// also appended to the command's log file under the user cache directory.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = std::io::stderr
        .with_max_level(Level::WARN)
        .and(std::io::stdout.with_min_level(Level::INFO));

    let console_layer = fmt::layer()
        .event_format(PondorastiFormatter)
        .with_writer(make_writer)
        .with_filter(console_level);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
