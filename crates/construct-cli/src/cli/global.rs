//! Flags shared by every subcommand.
//!
//! Flattened into [`super::Cli`] so `-v`, `-q` and friends work in any
//! position on the command line.

use clap::Args;
use std::path::PathBuf;

/// Global arguments for all commands.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// Logs go to stderr; stdout carries only the generation messages.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity (written to stderr):
    (none)  - Warnings and errors
    -v      - Info level (pipeline steps)
    -vv     - Debug level (every file and command)
    -vvv    - Trace level (stub lookups)"
    )]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Honours `NO_COLOR` (see <https://no-color.org>); any non-empty value
    /// other than `0`/`false` disables colour.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Configuration file path.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        env = "CONSTRUCT_CONFIG",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// How generation results are rendered on stdout.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

/// How the CLI should render its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human when stdout is a terminal, plain otherwise.
    #[default]
    Auto,
    /// Coloured labels.
    Human,
    /// Exactly one line per message, no colour.
    Plain,
    /// A single JSON document.
    Json,
}
