//! Implementation of the `construct generate` command.
//!
//! Responsibility: turn CLI arguments and config into a `ProjectRequest`,
//! probe the machine for the runtime facts the core needs, run the
//! `ConstructService`, and print its messages. No business logic lives here.

use std::path::Path;

use chrono::Datelike;
use tracing::{debug, info, instrument, warn};

use construct_adapters::{EmbeddedStubs, LocalFilesystem, SystemProcessRunner};
use construct_core::{
    application::{
        ConstructService, Message, PrepareOutcome, PreparedGeneration,
        ports::ProcessRunner,
    },
    domain::{
        Author, CommandSpec, OptionTables, PhpVersion, ProjectRequest, RuntimeEnvironment,
        Warning,
    },
};

use crate::{
    cli::{GenerateArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `construct generate` command.
///
/// Dispatch sequence:
/// 1. Merge flags over config defaults into a `ProjectRequest`
/// 2. Probe the PHP version, the author and the current year
/// 3. Dry run: print the plan and stop
/// 4. Otherwise run the pipeline and print every message in order
#[instrument(skip_all, fields(package = %args.name))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let request = build_request(&args, &config);
    let runner = SystemProcessRunner::new();
    let env = probe_environment(&runner, &config, chrono::Local::now().year());

    debug!(
        php = %env.php_version,
        year = env.year,
        author = env.author.name.as_deref().unwrap_or("unknown"),
        "Environment probed"
    );

    let mut service = ConstructService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(runner),
        Box::new(EmbeddedStubs::new()),
        OptionTables::builtin(),
    );
    if let Some(dir) = &config.stubs.directory {
        debug!(dir = %dir.display(), "Using stub override directory");
        service = service.with_stub_override(dir);
    }

    let prepared = match service.prepare(&request, &env, &args.path)? {
        PrepareOutcome::NameInvalid(warning) => return reject_name(warning, &output),
        PrepareOutcome::Ready(prepared) => prepared,
    };

    if args.dry_run {
        return print_plan(&prepared, &output);
    }

    info!(path = %args.path.display(), "Generation started");

    // Resolution warnings still reach the user when the run is refused.
    let warnings = prepared.warnings.clone();
    match service.execute(*prepared, &env, args.force) {
        Ok(report) => {
            info!(
                files = report.files_written.len(),
                failed_hooks = report.failed_hooks.len(),
                "Generation completed"
            );
            output.messages(&report.state.to_string(), &report.messages)?;
            Ok(())
        }
        Err(e) => {
            if output.format() != OutputFormat::Json {
                for warning in &warnings {
                    output.warning(warning.message())?;
                }
            }
            Err(e.into())
        }
    }
}

// ── Request ───────────────────────────────────────────────────────────────────

/// Flags win; config defaults count as supplied values, so an unsupported
/// value in the config file is warned about like a bad flag.
fn build_request(args: &GenerateArgs, config: &AppConfig) -> ProjectRequest {
    ProjectRequest::new(&args.name)
        .with_license(args.license.clone().or_else(|| config.defaults.license.clone()))
        .with_test_framework(
            args.test_framework
                .clone()
                .or_else(|| config.defaults.test_framework.clone()),
        )
        .with_php_version(args.php.clone().or_else(|| config.defaults.php.clone()))
        .with_namespace(args.namespace.clone())
        .with_keywords(args.keywords.clone())
        .with_integrations(args.integrations())
}

// ── Environment probing ───────────────────────────────────────────────────────

fn probe_environment(
    runner: &dyn ProcessRunner,
    config: &AppConfig,
    year: i32,
) -> RuntimeEnvironment {
    RuntimeEnvironment::new(detect_php_version(runner, config), year)
        .with_author(detect_author(runner, config))
}

/// `php.version` from config, else what `php -r "echo PHP_VERSION;"`
/// prints, else the fallback.
fn detect_php_version(runner: &dyn ProcessRunner, config: &AppConfig) -> PhpVersion {
    if let Some(configured) = config.php.version.as_deref() {
        match PhpVersion::from_runtime(configured) {
            Some(version) => return version,
            None => warn!(version = configured, "Ignoring unparseable php.version setting"),
        }
    }

    let probe = CommandSpec::new(&config.php.binary, ["-r", "echo PHP_VERSION;"]);
    match runner.run(&probe, Path::new("")) {
        Ok(out) if out.success() => PhpVersion::from_runtime(&out.stdout).unwrap_or_else(|| {
            debug!(reported = %out.stdout.trim(), "Unrecognised PHP version, using fallback");
            PhpVersion::fallback()
        }),
        Ok(out) => {
            debug!(reason = %out.failure_reason(), "PHP probe failed, using fallback");
            PhpVersion::fallback()
        }
        Err(e) => {
            debug!(error = %e, "PHP not available, using fallback");
            PhpVersion::fallback()
        }
    }
}

fn detect_author(runner: &dyn ProcessRunner, config: &AppConfig) -> Author {
    Author {
        name: config
            .author
            .name
            .clone()
            .or_else(|| git_config(runner, "user.name")),
        email: config
            .author
            .email
            .clone()
            .or_else(|| git_config(runner, "user.email")),
    }
}

fn git_config(runner: &dyn ProcessRunner, key: &str) -> Option<String> {
    let out = runner
        .run(&CommandSpec::new("git", ["config", "--get", key]), Path::new(""))
        .ok()?;
    if !out.success() {
        return None;
    }
    let value = out.stdout.trim();
    (!value.is_empty()).then(|| value.to_string())
}

// ── Output ────────────────────────────────────────────────────────────────────

/// Print the single warning line and abort with the user-error exit code.
fn reject_name(warning: Warning, output: &OutputManager) -> CliResult<()> {
    let message = warning.message().to_string();
    output.messages("name_invalid", &[Message::Warning(message.clone())])?;
    Err(CliError::NameRejected { message })
}

fn print_plan(prepared: &PreparedGeneration, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(&prepared.plan)?;
        return Ok(());
    }

    for warning in &prepared.warnings {
        output.warning(warning.message())?;
    }
    output.header(&format!(
        "Dry run: would construct \"{}\" in {}",
        prepared.options.name,
        prepared.root.display()
    ))?;
    for op in prepared.plan.ops() {
        output.print(&format!("  {op}"))?;
    }
    for command in prepared.plan.commands() {
        output.print(&format!("  run {command}"))?;
    }
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────
