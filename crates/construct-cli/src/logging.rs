//! Diagnostics for the `construct` binary.
//!
//! The library crates emit `tracing` events; this module installs the one
//! subscriber that renders them. Everything goes to stderr so stdout carries
//! generation messages only.
//!
//! Verbosity: none → WARN, `-v` → INFO, `-vv` → DEBUG, `-vvv` → TRACE,
//! `--quiet` → ERROR. A valid, non-empty `RUST_LOG` replaces the computed
//! filter.

use std::io::IsTerminal as _;

use anyhow::Context as _;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::{GlobalArgs, OutputFormat};

/// Crates whose events are shown when `RUST_LOG` is unset.
const LOG_TARGETS: [&str; 3] = ["construct", "construct_core", "construct_adapters"];

/// What the subscriber needs to know, decided from the global flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LogSettings {
    level: LevelFilter,
    ansi: bool,
}

impl LogSettings {
    fn from_args(args: &GlobalArgs, stderr_is_terminal: bool) -> Self {
        let level = if args.quiet {
            LevelFilter::ERROR
        } else {
            match args.verbose {
                0 => LevelFilter::WARN,
                1 => LevelFilter::INFO,
                2 => LevelFilter::DEBUG,
                _ => LevelFilter::TRACE,
            }
        };
        // Machine-readable runs never get escape codes, even on a terminal.
        let ansi = stderr_is_terminal
            && !args.no_color
            && args.output_format != OutputFormat::Json;
        Self { level, ansi }
    }

    /// `rust_log` wins when it is set, non-blank and parses.
    fn filter(&self, rust_log: Option<&str>) -> EnvFilter {
        rust_log
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| EnvFilter::try_new(raw).ok())
            .unwrap_or_else(|| EnvFilter::new(self.directives()))
    }

    fn directives(&self) -> String {
        let level = self.level.to_string().to_lowercase();
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install the global subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let settings = LogSettings::from_args(args, std::io::stderr().is_terminal());
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(settings.filter(rust_log.as_deref()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_ansi(settings.ansi)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("a tracing subscriber is already installed")
}
