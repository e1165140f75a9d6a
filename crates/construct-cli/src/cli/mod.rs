//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use construct_core::domain::Integrations;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "construct",
    bin_name = "construct",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate a PHP package skeleton",
    long_about = "Construct creates a ready-to-develop PHP package: composer.json, \
                  license, test framework setup and optional tooling integrations.",
    after_help = "EXAMPLES:\n\
        \x20 construct generate acme/billing\n\
        \x20 construct generate acme/billing --license Apache-2.0 --test behat --php 8.2\n\
        \x20 construct generate acme/billing --git --phpcs --editor-config --env\n\
        \x20 construct completions bash > /usr/share/bash-completion/completions/construct",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new PHP package.
    #[command(
        visible_alias = "new",
        about = "Generate a new PHP package",
        after_help = "EXAMPLES:\n\
            \x20 construct generate vendor/project\n\
            \x20 construct generate vendor/project --test-framework phpspec --keywords \"api, client\"\n\
            \x20 construct generate vendor/project --path ~/code --git --install\n\
            \x20 construct generate vendor/project --dry-run"
    )]
    Generate(GenerateArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 construct completions bash > ~/.local/share/bash-completion/completions/construct\n\
            \x20 construct completions zsh  > ~/.zfunc/_construct\n\
            \x20 construct completions fish > ~/.config/fish/completions/construct.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Construct configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 construct config init\n\
            \x20 construct config get defaults.license\n\
            \x20 construct config list"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `construct generate`.
///
/// Option values are passed through unvalidated; unsupported ones fall back
/// to the defaults with a warning rather than failing the parse.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Package name in `vendor/project` form.
    #[arg(value_name = "VENDOR/PROJECT", help = "Package name, e.g. acme/billing")]
    pub name: String,

    #[arg(
        short = 'l',
        long = "license",
        value_name = "LICENSE",
        help = "License: MIT, Apache-2.0, GPL-2.0, GPL-3.0, none (no LICENSE.md) [default: MIT]"
    )]
    pub license: Option<String>,

    #[arg(
        short = 't',
        long = "test",
        visible_alias = "test-framework",
        value_name = "FRAMEWORK",
        help = "Test framework: phpunit, behat, codeception, phpspec [default: phpunit]"
    )]
    pub test_framework: Option<String>,

    #[arg(
        long = "php",
        value_name = "VERSION",
        help = "Minimum PHP version [default: the installed PHP version]"
    )]
    pub php: Option<String>,

    #[arg(
        long = "namespace",
        value_name = "NAMESPACE",
        help = "Root namespace [default: derived from the package name]"
    )]
    pub namespace: Option<String>,

    #[arg(
        short = 'k',
        long = "keywords",
        value_name = "LIST",
        help = "Comma-separated composer keywords"
    )]
    pub keywords: Option<String>,

    #[arg(long = "git", help = "Initialize a git repository")]
    pub git: bool,

    #[arg(long = "phpcs", help = "Add a coding style fixer configuration")]
    pub phpcs: bool,

    #[arg(long = "vagrant", help = "Add a Vagrantfile")]
    pub vagrant: bool,

    #[arg(long = "editor-config", help = "Add an .editorconfig file")]
    pub editor_config: bool,

    #[arg(long = "env", help = "Add .env and .env.example files")]
    pub env: bool,

    #[arg(
        long = "github-templates",
        help = "Add GitHub issue and pull request templates"
    )]
    pub github_templates: bool,

    #[arg(long = "install", help = "Run composer install after generating")]
    pub install: bool,

    /// Generate into a non-empty existing directory.
    #[arg(long = "force", help = "Generate into a non-empty existing directory")]
    pub force: bool,

    /// Print the plan without touching the filesystem.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        default_value = ".",
        help = "Directory the project folder is created in"
    )]
    pub path: PathBuf,
}

impl GenerateArgs {
    pub fn integrations(&self) -> Integrations {
        Integrations {
            phpcs: self.phpcs,
            vagrant: self.vagrant,
            editor_config: self.editor_config,
            env: self.env,
            github_templates: self.github_templates,
            git: self.git,
            install: self.install,
        }
    }
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `construct completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `construct config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Write a configuration file with the built-in defaults.
    Init {
        /// Overwrite an existing file.
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.license`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
