//! `construct config`: inspect and initialise configuration.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

const CONFIG_HEADER: &str = "\
# Construct configuration.
# Every key can also be set through the environment, e.g.
# CONSTRUCT__DEFAULTS__LICENSE=Apache-2.0 or CONSTRUCT__PHP__VERSION=8.2.
#
# [defaults]   license, test_framework, php
# [author]     name, email (falls back to git config)
# [php]        binary, version (skips probing when set)
# [stubs]      directory (files here replace built-in stubs)

";

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let path = active_path(&global);

    match cmd {
        ConfigCommands::Init { force } => {
            write_default_config(&path, force)?;
            info!(path = %path.display(), "Configuration written");
            output.print(&path.display().to_string())?;
        }

        ConfigCommands::Get { key } => {
            output.print(&get_config_value(&config, &key)?)?;
        }

        ConfigCommands::List => {
            output.print(serialise(&config)?.trim_end())?;
        }

        ConfigCommands::Path => {
            output.print(&path.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn active_path(global: &GlobalArgs) -> PathBuf {
    global.config.clone().unwrap_or_else(AppConfig::config_path)
}

fn serialise(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

fn write_default_config(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::InvalidInput {
            message: format!(
                "{} already exists; pass --force to overwrite it",
                path.display()
            ),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_cli_context(|| format!("creating {}", parent.display()))?;
    }

    let body = serialise(&AppConfig::default())?;
    fs::write(path, format!("{CONFIG_HEADER}{body}"))
        .with_cli_context(|| format!("writing {}", path.display()))
}

/// Unset optional keys print as an empty line.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let optional = |value: &Option<String>| value.clone().unwrap_or_default();

    match key {
        "defaults.license" => Ok(optional(&config.defaults.license)),
        "defaults.test_framework" => Ok(optional(&config.defaults.test_framework)),
        "defaults.php" => Ok(optional(&config.defaults.php)),
        "author.name" => Ok(optional(&config.author.name)),
        "author.email" => Ok(optional(&config.author.email)),
        "php.binary" => Ok(config.php.binary.clone()),
        "php.version" => Ok(optional(&config.php.version)),
        "stubs.directory" => Ok(config
            .stubs
            .directory
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_default()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn get_known_keys() {
        let mut cfg = AppConfig::default();
        cfg.defaults.license = Some("GPL-3.0".into());
        assert_eq!(get_config_value(&cfg, "defaults.license").unwrap(), "GPL-3.0");
        assert_eq!(get_config_value(&cfg, "php.binary").unwrap(), "php");
        assert_eq!(get_config_value(&cfg, "output.no_color").unwrap(), "false");
    }

    #[test]
    fn unset_keys_are_empty() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "author.email").unwrap(), "");
        assert_eq!(get_config_value(&cfg, "stubs.directory").unwrap(), "");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn init_writes_a_loadable_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/config.toml");

        write_default_config(&path, false).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Construct configuration."));

        let loaded = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.php.binary, "php");
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[defaults]\nlicense = \"MIT\"\n").unwrap();

        let err = write_default_config(&path, false).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(fs::read_to_string(&path).unwrap().contains("license = \"MIT\""));

        write_default_config(&path, true).unwrap();
        assert!(!fs::read_to_string(&path).unwrap().contains("license = "));
    }
}
