//! Output management and formatting.
//!
//! Generation messages are the program's stdout contract: one line each,
//! warnings prefixed with `Warning: `. Colour is only added in human mode;
//! plain mode prints the bare text.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use construct_core::application::Message;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Label placed in front of every warning line.
pub const WARNING_PREFIX: &str = "Warning:";

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

/// The document printed in JSON mode.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    status: &'a str,
    messages: &'a [Message],
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        let no_color = args.no_color
            || config.output.no_color
            || resolved_format != OutputFormat::Human;

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color,
            term: Term::stdout(),
        }
    }

    // ── Generation messages ────────────────────────────────────────────────

    /// Print a run's messages in order.
    ///
    /// In JSON mode the whole run becomes one document tagged with `status`.
    pub fn messages(&self, status: &str, messages: &[Message]) -> io::Result<()> {
        if self.resolved_format == OutputFormat::Json {
            return self.json(&JsonReport { status, messages });
        }
        for message in messages {
            match message {
                Message::Warning(text) => self.warning(text)?,
                Message::Status(text) => self.status(text)?,
                Message::Success(text) => self.success(text)?,
            }
        }
        Ok(())
    }

    /// `Warning: <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&self.warning_line(msg))
    }

    /// A progress line, printed as-is.
    pub fn status(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            msg.to_owned()
        } else {
            msg.blue().to_string()
        };
        self.term.write_line(&line)
    }

    /// The final success line.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            msg.to_owned()
        } else {
            msg.green().bold().to_string()
        };
        self.term.write_line(&line)
    }

    fn warning_line(&self, msg: &str) -> String {
        if self.no_color {
            format!("{WARNING_PREFIX} {msg}")
        } else {
            format!("{} {msg}", WARNING_PREFIX.yellow().bold())
        }
    }

    // ── General output ─────────────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Pretty JSON on stdout.  Not suppressed in quiet mode: the caller asked
    /// for a machine-readable document.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
