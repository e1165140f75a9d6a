//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `CONSTRUCT__<SECTION>__<KEY>`, e.g.
//!    `CONSTRUCT__PHP__VERSION=8.2`
//! 3. Config file: `--config <FILE>`, else the platform config directory
//! 4. Built-in defaults

use std::path::PathBuf;

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Values used when the matching flag is not given.
    pub defaults: Defaults,
    /// Package author; falls back to `git config`.
    pub author: AuthorConfig,
    /// PHP runtime probing.
    pub php: PhpConfig,
    /// Stub lookup.
    pub stubs: StubsConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_framework: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub php: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhpConfig {
    /// Executable probed for the running version.
    pub binary: String,
    /// Skip probing and treat this as the running version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Default for PhpConfig {
    fn default() -> Self {
        Self {
            binary: "php".into(),
            version: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StubsConfig {
    /// Files here replace the built-in stubs of the same relative name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration: defaults, then the file, then the environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = config_file.cloned().unwrap_or_else(Self::config_path);
        let file = File::from(path.as_path())
            .format(FileFormat::Toml)
            .required(config_file.is_some());

        let settings = Config::builder()
            .set_default("php.binary", "php")?
            .set_default("output.no_color", false)?
            .add_source(file)
            .add_source(Environment::with_prefix("CONSTRUCT").separator("__"))
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Configuration has an invalid value")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.construct.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "construct", "construct")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".construct.toml"))
    }
}
