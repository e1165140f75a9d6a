//! Construct Service - main application orchestrator.
//!
//! This service coordinates the entire generation workflow:
//! 1. Validate the package name (the only abort path)
//! 2. Resolve options, collecting warnings
//! 3. Create the directory skeleton
//! 4. Write the core files
//! 5. Run each enabled integration, isolating failures
//! 6. Report warnings, status lines and the success line in order
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, ProcessRunner, StubStore},
    },
    domain::{
        FileOp, GenerationPlan, IntegrationStep, OptionResolver, OptionTables, ProjectName,
        ProjectRequest, RenderContext, ResolvedOptions, RuntimeEnvironment, Warning,
    },
    error::{ConstructError, ConstructResult},
};

// ── Run results ───────────────────────────────────────────────────────────────

/// Progress of one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationState {
    Idle,
    NameInvalid,
    Validated,
    DirectoriesCreated,
    CoreFilesWritten,
    IntegrationsApplied,
    Completed,
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::NameInvalid => "name invalid",
            Self::Validated => "validated",
            Self::DirectoriesCreated => "directories created",
            Self::CoreFilesWritten => "core files written",
            Self::IntegrationsApplied => "integrations applied",
            Self::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// One line of user-facing output, in the order it was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Message {
    Warning(String),
    Status(String),
    Success(String),
}

impl Message {
    pub fn text(&self) -> &str {
        match self {
            Self::Warning(text) | Self::Status(text) | Self::Success(text) => text,
        }
    }
}

/// Everything a completed run produced.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub package: String,
    pub root: PathBuf,
    pub state: GenerationState,
    pub messages: Vec<Message>,
    /// Files now present, relative to `root`, in write order.
    pub files_written: Vec<PathBuf>,
    pub failed_hooks: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum GenerationOutcome {
    /// The name was rejected; nothing was touched.
    NameInvalid(Warning),
    Completed(GenerationReport),
}

/// A run resolved and planned but not executed.
#[derive(Debug, Clone)]
pub struct PreparedGeneration {
    pub options: ResolvedOptions,
    pub warnings: Vec<Warning>,
    pub plan: GenerationPlan,
    pub root: PathBuf,
}

#[derive(Debug, Clone)]
pub enum PrepareOutcome {
    NameInvalid(Warning),
    Ready(Box<PreparedGeneration>),
}

// ── Service ───────────────────────────────────────────────────────────────────

/// Main generation service.
pub struct ConstructService {
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn ProcessRunner>,
    stubs: Box<dyn StubStore>,
    tables: OptionTables,
    stub_override: Option<PathBuf>,
}

impl ConstructService {
    /// Create a new service with the given adapters and option tables.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let service = ConstructService::new(
    ///     Box::new(LocalFilesystem::new()),
    ///     Box::new(SystemProcessRunner::new()),
    ///     Box::new(EmbeddedStubs::new()),
    ///     OptionTables::builtin(),
    /// );
    /// ```
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        runner: Box<dyn ProcessRunner>,
        stubs: Box<dyn StubStore>,
        tables: OptionTables,
    ) -> Self {
        Self {
            filesystem,
            runner,
            stubs,
            tables,
            stub_override: None,
        }
    }

    /// Look for stubs in `dir` first, falling back to the stub store.
    pub fn with_stub_override(mut self, dir: impl Into<PathBuf>) -> Self {
        self.stub_override = Some(dir.into());
        self
    }

    pub fn tables(&self) -> &OptionTables {
        &self.tables
    }

    /// Validate, resolve and plan without touching the filesystem.
    pub fn prepare(
        &self,
        request: &ProjectRequest,
        env: &RuntimeEnvironment,
        output_dir: &Path,
    ) -> ConstructResult<PrepareOutcome> {
        let name = match ProjectName::parse(request.name()) {
            Ok(name) => name,
            Err(e) => {
                debug!(state = %GenerationState::NameInvalid, "Name rejected");
                return Ok(PrepareOutcome::NameInvalid(Warning::new(e.to_string())));
            }
        };

        let resolution =
            OptionResolver::new(&self.tables, &env.php_version).resolve(name, request);
        let plan = GenerationPlan::build(&resolution.options, env)?;
        let root = output_dir.join(resolution.options.name.project());

        debug!(
            state = %GenerationState::Validated,
            warnings = resolution.warnings.len(),
            "Options resolved"
        );

        Ok(PrepareOutcome::Ready(Box::new(PreparedGeneration {
            options: resolution.options,
            warnings: resolution.warnings,
            plan,
            root,
        })))
    }

    /// Run the full pipeline.
    ///
    /// Fails only on a precondition violation or a write error in the
    /// skeleton or core files; integration failures become warnings.
    pub fn generate(
        &self,
        request: &ProjectRequest,
        env: &RuntimeEnvironment,
        output_dir: &Path,
        force: bool,
    ) -> ConstructResult<GenerationOutcome> {
        match self.prepare(request, env, output_dir)? {
            PrepareOutcome::NameInvalid(warning) => Ok(GenerationOutcome::NameInvalid(warning)),
            PrepareOutcome::Ready(prepared) => self
                .execute(*prepared, env, force)
                .map(GenerationOutcome::Completed),
        }
    }

    /// Carry out a prepared run.
    ///
    /// On error the resolution warnings are not part of any report; callers
    /// that keep `prepared.warnings` can still show them.
    #[instrument(
        skip_all,
        fields(
            package = %prepared.options.name,
            root = %prepared.root.display(),
            force
        )
    )]
    pub fn execute(
        &self,
        prepared: PreparedGeneration,
        env: &RuntimeEnvironment,
        force: bool,
    ) -> ConstructResult<GenerationReport> {
        let PreparedGeneration {
            options,
            warnings,
            plan,
            root,
        } = prepared;

        let created_root = self.check_target(&root, force)?;
        let context = RenderContext::new(&options, env);

        let mut run = Run {
            state: GenerationState::Idle,
            messages: warnings
                .iter()
                .map(|w| Message::Warning(w.to_string()))
                .collect(),
            files_written: Vec::new(),
            failed_hooks: Vec::new(),
        };
        run.advance(GenerationState::Validated);

        if let Err(e) = self.write_core(&root, &plan, &context, &mut run) {
            warn!(error = %e, state = %run.state, "Core write failed");
            if let Some(created) = &created_root {
                self.rollback(created);
            }
            return Err(e);
        }

        if let Some(status) = &plan.bootstrap_status {
            run.messages.push(Message::Status(status.clone()));
        }

        for step in &plan.integrations {
            match self.apply_integration(&root, step, &context, &mut run) {
                Ok(()) => {
                    info!(hook = %step.hook, "Integration applied");
                    if let Some(status) = &step.status {
                        run.messages.push(Message::Status(status.clone()));
                    }
                }
                Err(e) => {
                    warn!(hook = %step.hook, error = %e, "Integration failed");
                    run.messages.push(Message::Warning(format!(
                        "{} failed: {}",
                        step.hook,
                        failure_reason(&e)
                    )));
                    run.failed_hooks.push(step.hook.to_string());
                }
            }
        }
        run.advance(GenerationState::IntegrationsApplied);

        let package = options.name.package();
        run.messages
            .push(Message::Success(format!("Project \"{package}\" constructed.")));
        run.advance(GenerationState::Completed);

        info!(files = run.files_written.len(), "Generation completed");

        Ok(GenerationReport {
            package,
            root,
            state: run.state,
            messages: run.messages,
            files_written: run.files_written,
            failed_hooks: run.failed_hooks,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Returns the outermost directory this run will create, if any.
    fn check_target(&self, root: &Path, force: bool) -> ConstructResult<Option<PathBuf>> {
        if !self.filesystem.exists(root) {
            return Ok(Some(self.first_missing(root)));
        }

        let exists = || -> ConstructError {
            ApplicationError::ProjectExists {
                path: root.to_path_buf(),
            }
            .into()
        };

        if !self.filesystem.is_dir(root) {
            return Err(exists());
        }
        if !force && !self.filesystem.is_empty_dir(root)? {
            return Err(exists());
        }

        debug!(path = %root.display(), "Generating into existing directory");
        Ok(None)
    }

    /// Walk up from a missing `path` to the last ancestor that is missing too.
    /// Never climbs to a filesystem root.
    fn first_missing(&self, path: &Path) -> PathBuf {
        let mut missing = path;
        while let Some(parent) = missing.parent() {
            if parent.as_os_str().is_empty()
                || parent.parent().is_none()
                || self.filesystem.exists(parent)
            {
                break;
            }
            missing = parent;
        }
        missing.to_path_buf()
    }

    fn write_core(
        &self,
        root: &Path,
        plan: &GenerationPlan,
        context: &RenderContext,
        run: &mut Run,
    ) -> ConstructResult<()> {
        self.filesystem.create_dir(root)?;
        for op in &plan.skeleton {
            self.apply_op(root, op, context, run)?;
        }
        run.advance(GenerationState::DirectoriesCreated);

        for op in &plan.core_files {
            self.apply_op(root, op, context, run)?;
        }
        run.advance(GenerationState::CoreFilesWritten);
        Ok(())
    }

    fn apply_integration(
        &self,
        root: &Path,
        step: &IntegrationStep,
        context: &RenderContext,
        run: &mut Run,
    ) -> ConstructResult<()> {
        for op in &step.ops {
            self.apply_op(root, op, context, run)?;
        }

        for command in &step.commands {
            let output = self.runner.run(command, root)?;
            if !output.success() {
                return Err(ApplicationError::ProcessFailed {
                    command: command.to_string(),
                    reason: output.failure_reason(),
                }
                .into());
            }
        }

        Ok(())
    }

    fn apply_op(
        &self,
        root: &Path,
        op: &FileOp,
        context: &RenderContext,
        run: &mut Run,
    ) -> ConstructResult<()> {
        debug!(%op, "Applying");

        match op {
            FileOp::CreateDir { path } => self.filesystem.create_dir(&root.join(path))?,
            FileOp::Render { stub, dest } => {
                let content = context.render(&self.load_stub(stub)?);
                self.write(root, dest, &content)?;
                run.record(dest);
            }
            FileOp::Write { dest, content } => {
                self.write(root, dest, content)?;
                run.record(dest);
            }
            FileOp::Copy { from, to } => {
                self.filesystem.copy_file(&root.join(from), &root.join(to))?;
                run.record(to);
            }
            FileOp::Append { dest, content } => {
                let path = root.join(dest);
                let mut existing = if self.filesystem.exists(&path) {
                    self.filesystem.read_file(&path)?
                } else {
                    String::new()
                };
                if !existing.is_empty() && !existing.ends_with('\n') {
                    existing.push('\n');
                }
                existing.push_str(content);
                self.write(root, dest, &existing)?;
                run.record(dest);
            }
            FileOp::Move { from, to } => {
                self.filesystem.move_file(&root.join(from), &root.join(to))?;
                run.files_written.retain(|f| f != from);
                run.record(to);
            }
        }

        Ok(())
    }

    fn write(&self, root: &Path, dest: &Path, content: &str) -> ConstructResult<()> {
        let path = root.join(dest);
        if let Some(parent) = path.parent() {
            if !self.filesystem.is_dir(parent) {
                self.filesystem.create_dir(parent)?;
            }
        }
        self.filesystem.write_file(&path, content)
    }

    fn load_stub(&self, name: &str) -> ConstructResult<String> {
        if let Some(dir) = &self.stub_override {
            let path = dir.join(name);
            if self.filesystem.exists(&path) && !self.filesystem.is_dir(&path) {
                debug!(stub = name, path = %path.display(), "Using stub override");
                return self.filesystem.read_file(&path);
            }
        }
        self.stubs.get(name)
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}

/// Mutable bookkeeping for one `generate` call.
struct Run {
    state: GenerationState,
    messages: Vec<Message>,
    files_written: Vec<PathBuf>,
    failed_hooks: Vec<String>,
}

impl Run {
    fn advance(&mut self, next: GenerationState) {
        debug!(from = %self.state, to = %next, "State transition");
        self.state = next;
    }

    fn record(&mut self, path: &Path) {
        if !self.files_written.iter().any(|f| f == path) {
            self.files_written.push(path.to_path_buf());
        }
    }
}

fn failure_reason(error: &ConstructError) -> String {
    match error {
        ConstructError::Application(ApplicationError::ProcessFailed { reason, .. }) => {
            reason.clone()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        MockFilesystem, MockProcessRunner, MockStubStore, ProcessOutput,
    };
    use crate::domain::{Integrations, PhpVersion};

    fn env() -> RuntimeEnvironment {
        RuntimeEnvironment::new(PhpVersion::from_runtime("8.3.6").unwrap(), 2026)
    }

    fn permissive_filesystem() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_is_dir().returning(|_| true);
        fs.expect_create_dir().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs.expect_copy_file().returning(|_, _| Ok(()));
        fs.expect_move_file().returning(|_, _| Ok(()));
        fs
    }

    fn echo_stubs() -> MockStubStore {
        let mut stubs = MockStubStore::new();
        stubs
            .expect_get()
            .returning(|name| Ok(format!("stub {name} for {{{{PACKAGE}}}}")));
        stubs.expect_contains().returning(|_| true);
        stubs
    }

    fn service(fs: MockFilesystem, runner: MockProcessRunner, stubs: MockStubStore) -> ConstructService {
        ConstructService::new(
            Box::new(fs),
            Box::new(runner),
            Box::new(stubs),
            OptionTables::builtin(),
        )
    }

    fn completed(outcome: GenerationOutcome) -> GenerationReport {
        match outcome {
            GenerationOutcome::Completed(report) => report,
            GenerationOutcome::NameInvalid(w) => panic!("unexpected abort: {w}"),
        }
    }

    #[test]
    fn invalid_name_touches_nothing() {
        // Mocks without expectations panic on any call.
        let svc = service(
            MockFilesystem::new(),
            MockProcessRunner::new(),
            MockStubStore::new(),
        );
        let outcome = svc
            .generate(&ProjectRequest::new("invalid"), &env(), Path::new("out"), false)
            .unwrap();

        match outcome {
            GenerationOutcome::NameInvalid(w) => assert_eq!(
                w.message(),
                "\"invalid\" is not a valid project name, please use \"vendor/project\""
            ),
            GenerationOutcome::Completed(_) => panic!("invalid name must abort"),
        }
    }

    #[test]
    fn prepare_computes_root_without_io() {
        let svc = service(
            MockFilesystem::new(),
            MockProcessRunner::new(),
            MockStubStore::new(),
        );
        let PrepareOutcome::Ready(prepared) = svc
            .prepare(&ProjectRequest::new("vendor/project"), &env(), Path::new("out"))
            .unwrap()
        else {
            panic!("valid name");
        };
        assert_eq!(prepared.root, PathBuf::from("out/project"));
        assert!(prepared.warnings.is_empty());
    }

    #[test]
    fn default_run_reports_only_success() {
        let svc = service(permissive_filesystem(), MockProcessRunner::new(), echo_stubs());
        let report = completed(
            svc.generate(&ProjectRequest::new("vendor/project"), &env(), Path::new("out"), false)
                .unwrap(),
        );

        assert_eq!(
            report.messages,
            vec![Message::Success("Project \"vendor/project\" constructed.".into())]
        );
        assert_eq!(report.state, GenerationState::Completed);
        assert!(report.files_written.contains(&PathBuf::from("composer.json")));
        assert!(report.files_written.contains(&PathBuf::from("tests/ProjectTest.php")));
    }

    #[test]
    fn existing_non_empty_root_is_rejected() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|path| path.to_str() == Some("out/project"))
            .return_const(true);
        fs.expect_is_dir().return_const(true);
        fs.expect_is_empty_dir().returning(|_| Ok(false));

        let svc = service(fs, MockProcessRunner::new(), MockStubStore::new());
        let err = svc
            .generate(&ProjectRequest::new("vendor/project"), &env(), Path::new("out"), false)
            .unwrap_err();
        assert!(matches!(
            err,
            ConstructError::Application(ApplicationError::ProjectExists { .. })
        ));
    }

    #[test]
    fn root_that_is_a_file_is_rejected_even_with_force() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_is_dir().return_const(false);

        let svc = service(fs, MockProcessRunner::new(), MockStubStore::new());
        assert!(
            svc.generate(&ProjectRequest::new("vendor/project"), &env(), Path::new("out"), true)
                .is_err()
        );
    }

    #[test]
    fn core_write_failure_rolls_back_created_root() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|path| path.to_str() == Some("out"));
        fs.expect_is_dir().returning(|_| true);
        fs.expect_create_dir().returning(|_| Ok(()));
        fs.expect_write_file().returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });
        fs.expect_remove_dir_all()
            .withf(|path| path.to_str() == Some("out/project"))
            .times(1)
            .returning(|_| Ok(()));

        let svc = service(fs, MockProcessRunner::new(), echo_stubs());
        let err = svc
            .generate(&ProjectRequest::new("vendor/project"), &env(), Path::new("out"), false)
            .unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn rollback_removes_output_directories_created_for_the_run() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|path| path.to_str() == Some("/srv"));
        fs.expect_is_dir().returning(|_| true);
        fs.expect_create_dir().returning(|_| Ok(()));
        fs.expect_write_file().returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });
        fs.expect_remove_dir_all()
            .withf(|path| path.to_str() == Some("/srv/new"))
            .times(1)
            .returning(|_| Ok(()));

        let svc = service(fs, MockProcessRunner::new(), echo_stubs());
        let out = Path::new("/srv/new/deeper");
        assert!(
            svc.generate(&ProjectRequest::new("vendor/project"), &env(), out, false)
                .is_err()
        );
    }

    #[test]
    fn first_missing_stops_below_the_filesystem_root() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        let svc = service(fs, MockProcessRunner::new(), MockStubStore::new());

        assert_eq!(svc.first_missing(Path::new("/a/b/c")), PathBuf::from("/a"));
        assert_eq!(svc.first_missing(Path::new("a/b")), PathBuf::from("a"));
    }

    #[test]
    fn failed_hook_is_reported_and_later_hooks_still_run() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|cmd, _| cmd.program == "git")
            .times(1)
            .returning(|_, _| {
                Ok(ProcessOutput {
                    code: Some(1),
                    stderr: "git: permission denied".into(),
                    ..ProcessOutput::default()
                })
            });
        runner
            .expect_run()
            .withf(|cmd, _| cmd.program == "composer")
            .times(1)
            .returning(|_, _| Ok(ProcessOutput::exited(0)));

        let svc = service(permissive_filesystem(), runner, echo_stubs());
        let request = ProjectRequest::new("vendor/project").with_integrations(Integrations {
            git: true,
            install: true,
            ..Integrations::default()
        });
        let report = completed(svc.generate(&request, &env(), Path::new("out"), false).unwrap());

        assert_eq!(
            report.messages,
            vec![
                Message::Warning("git init failed: git: permission denied".into()),
                Message::Status("Installed composer dependencies in \"project\".".into()),
                Message::Success("Project \"vendor/project\" constructed.".into()),
            ]
        );
        assert_eq!(report.failed_hooks, vec!["git init"]);
    }

    #[test]
    fn stub_override_is_read_through_filesystem() {
        let is_override = |path: &Path| path.to_str() == Some("custom/README.stub");

        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(move |path| is_override(path));
        fs.expect_is_dir().returning(move |path| !is_override(path));
        fs.expect_read_file()
            .withf(move |path| is_override(path))
            .times(1)
            .returning(|_| Ok("# {{PACKAGE}} (custom)".into()));
        fs.expect_create_dir().returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|path, _| path.to_str() == Some("out/project/README.md"))
            .times(1)
            .returning(|_, content| {
                assert_eq!(content, "# vendor/project (custom)");
                Ok(())
            });
        fs.expect_write_file().returning(|_, _| Ok(()));

        let svc = service(fs, MockProcessRunner::new(), echo_stubs()).with_stub_override("custom");
        completed(
            svc.generate(&ProjectRequest::new("vendor/project"), &env(), Path::new("out"), false)
                .unwrap(),
        );
    }
}
