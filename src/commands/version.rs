//! Command: print version information.

/// Version embedded at build time, or the crate version for local builds.
#[must_use]
pub fn version() -> &'static str {
    option_env!("PONDORASTI_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("pondorasti {}", version());
}
