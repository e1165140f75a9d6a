//! The ordered list of filesystem and process operations for one run.
//!
//! A plan is pure data derived from [`ResolvedOptions`]; the orchestrator
//! executes it. All paths are relative to the project root.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{
    error::DomainError,
    manifest::ComposerManifest,
    request::{Hook, RuntimeEnvironment},
    resolver::ResolvedOptions,
};

// ── Stub names ────────────────────────────────────────────────────────────────

pub mod stubs {
    pub const README: &str = "README.stub";
    pub const CHANGELOG: &str = "CHANGELOG.stub";
    pub const CONTRIBUTING: &str = "CONTRIBUTING.stub";
    pub const GITIGNORE: &str = "gitignore.stub";
    pub const GITATTRIBUTES: &str = "gitattributes.stub";
    pub const SOURCE_CLASS: &str = "src/Class.stub";
    pub const CODING_STYLE: &str = "php-cs-fixer.stub";
    pub const VAGRANTFILE: &str = "Vagrantfile.stub";
    pub const EDITORCONFIG: &str = "editorconfig.stub";
    pub const ENV: &str = "env.stub";
    pub const ISSUE_TEMPLATE: &str = "github/ISSUE_TEMPLATE.stub";
    pub const PULL_REQUEST_TEMPLATE: &str = "github/PULL_REQUEST_TEMPLATE.stub";
}

// ── Operations ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FileOp {
    /// Create a directory and any missing parents.
    CreateDir { path: PathBuf },
    /// Load a stub, substitute placeholders, write the result.
    Render { stub: String, dest: PathBuf },
    /// Write literal content.
    Write { dest: PathBuf, content: String },
    Copy { from: PathBuf, to: PathBuf },
    /// Append to an existing file.
    Append { dest: PathBuf, content: String },
    Move { from: PathBuf, to: PathBuf },
}

impl FileOp {
    fn create_dir(path: impl Into<PathBuf>) -> Self {
        Self::CreateDir { path: path.into() }
    }

    fn render(stub: &str, dest: impl Into<PathBuf>) -> Self {
        Self::Render {
            stub: stub.to_string(),
            dest: dest.into(),
        }
    }

    /// Path this op brings into existence, if any.
    pub fn created_path(&self) -> Option<&Path> {
        match self {
            Self::CreateDir { path } => Some(path),
            Self::Render { dest, .. } | Self::Write { dest, .. } => Some(dest),
            Self::Copy { to, .. } | Self::Move { to, .. } => Some(to),
            Self::Append { .. } => None,
        }
    }

    fn paths(&self) -> Vec<&Path> {
        match self {
            Self::CreateDir { path } => vec![path],
            Self::Render { dest, .. } | Self::Write { dest, .. } | Self::Append { dest, .. } => {
                vec![dest]
            }
            Self::Copy { from, to } | Self::Move { from, to } => vec![from, to],
        }
    }
}

impl fmt::Display for FileOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDir { path } => write!(f, "create {}/", path.display()),
            Self::Render { stub, dest } => write!(f, "render {} from {stub}", dest.display()),
            Self::Write { dest, .. } => write!(f, "write {}", dest.display()),
            Self::Copy { from, to } => write!(f, "copy {} to {}", from.display(), to.display()),
            Self::Append { dest, .. } => write!(f, "append to {}", dest.display()),
            Self::Move { from, to } => write!(f, "move {} to {}", from.display(), to.display()),
        }
    }
}

/// An external program invocation, run in the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Everything one enabled hook does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrationStep {
    pub hook: Hook,
    pub ops: Vec<FileOp>,
    pub commands: Vec<CommandSpec>,
    /// Line reported when the step succeeds.
    pub status: Option<String>,
}

impl IntegrationStep {
    fn files(hook: Hook, ops: Vec<FileOp>) -> Self {
        Self {
            hook,
            ops,
            commands: Vec::new(),
            status: None,
        }
    }

    fn command(hook: Hook, command: CommandSpec, status: String) -> Self {
        Self {
            hook,
            ops: Vec::new(),
            commands: vec![command],
            status: Some(status),
        }
    }
}

// ── Plan ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationPlan {
    /// Directories under the root, created before any file.
    pub skeleton: Vec<FileOp>,
    pub core_files: Vec<FileOp>,
    /// `Initialized <framework>.` for frameworks with their own bootstrap.
    pub bootstrap_status: Option<String>,
    pub integrations: Vec<IntegrationStep>,
}

impl GenerationPlan {
    pub fn build(
        options: &ResolvedOptions,
        env: &RuntimeEnvironment,
    ) -> Result<Self, DomainError> {
        let framework = &options.test_framework;
        let class = &options.class_name;

        let skeleton = vec![FileOp::create_dir("src"), FileOp::create_dir(framework.test_dir)];

        let mut core_files = vec![FileOp::Write {
            dest: "composer.json".into(),
            content: ComposerManifest::build(options, env).to_json()?,
        }];
        if let Some(stub) = options.license.stub {
            core_files.push(FileOp::render(stub, "LICENSE.md"));
        }
        core_files.extend([
            FileOp::render(stubs::README, "README.md"),
            FileOp::render(stubs::CHANGELOG, "CHANGELOG.md"),
            FileOp::render(stubs::CONTRIBUTING, "CONTRIBUTING.md"),
            FileOp::render(stubs::GITIGNORE, ".gitignore"),
            FileOp::render(stubs::GITATTRIBUTES, ".gitattributes"),
            FileOp::render(stubs::SOURCE_CLASS, format!("src/{class}.php")),
            FileOp::render(framework.config_stub, framework.config_file),
            FileOp::render(
                framework.test_stub,
                framework.test_file.replace("{{CLASS}}", class),
            ),
        ]);

        let bootstrap_status = framework
            .bootstraps
            .then(|| format!("Initialized {}.", framework.id));

        let integrations = options
            .integrations
            .enabled()
            .into_iter()
            .map(|hook| integration_step(hook, options))
            .collect();

        let plan = Self {
            skeleton,
            core_files,
            bootstrap_status,
            integrations,
        };
        plan.validate()?;
        Ok(plan)
    }

    /// Every file op in execution order.
    pub fn ops(&self) -> impl Iterator<Item = &FileOp> {
        self.skeleton
            .iter()
            .chain(&self.core_files)
            .chain(self.integrations.iter().flat_map(|step| &step.ops))
    }

    /// Every command in execution order.
    pub fn commands(&self) -> impl Iterator<Item = &CommandSpec> {
        self.integrations.iter().flat_map(|step| &step.commands)
    }

    /// No path is created twice and no path escapes the root.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();

        for op in self.ops() {
            for path in op.paths() {
                if path.is_absolute() {
                    return Err(DomainError::AbsolutePathNotAllowed {
                        path: path.display().to_string(),
                    });
                }
            }

            if let Some(path) = op.created_path() {
                if !seen.insert(path.to_path_buf()) {
                    return Err(DomainError::DuplicatePath {
                        path: path.display().to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

fn integration_step(hook: Hook, options: &ResolvedOptions) -> IntegrationStep {
    let project = options.name.project();

    match hook {
        Hook::CodingStyle => IntegrationStep::files(
            hook,
            vec![FileOp::render(stubs::CODING_STYLE, ".php-cs-fixer.dist.php")],
        ),
        Hook::Vagrant => IntegrationStep::files(
            hook,
            vec![
                FileOp::render(stubs::VAGRANTFILE, "Vagrantfile"),
                FileOp::Append {
                    dest: ".gitignore".into(),
                    content: ".vagrant/\n".into(),
                },
            ],
        ),
        Hook::EditorConfig => IntegrationStep::files(
            hook,
            vec![FileOp::render(stubs::EDITORCONFIG, ".editorconfig")],
        ),
        Hook::Environment => IntegrationStep::files(
            hook,
            vec![
                FileOp::render(stubs::ENV, ".env"),
                FileOp::Copy {
                    from: ".env".into(),
                    to: ".env.example".into(),
                },
                FileOp::Append {
                    dest: ".gitignore".into(),
                    content: ".env\n".into(),
                },
            ],
        ),
        Hook::GithubTemplates => IntegrationStep::files(
            hook,
            vec![
                FileOp::create_dir(".github"),
                FileOp::render(stubs::ISSUE_TEMPLATE, ".github/ISSUE_TEMPLATE.md"),
                FileOp::render(
                    stubs::PULL_REQUEST_TEMPLATE,
                    ".github/PULL_REQUEST_TEMPLATE.md",
                ),
                FileOp::Move {
                    from: "CONTRIBUTING.md".into(),
                    to: ".github/CONTRIBUTING.md".into(),
                },
            ],
        ),
        Hook::Git => IntegrationStep::command(
            hook,
            CommandSpec::new("git", ["init"]),
            format!("Initialized git repo in \"{project}\"."),
        ),
        Hook::ComposerInstall => IntegrationStep::command(
            hook,
            CommandSpec::new("composer", ["install"]),
            format!("Installed composer dependencies in \"{project}\"."),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        catalog::OptionTables,
        project_name::ProjectName,
        request::{Integrations, ProjectRequest},
        resolver::OptionResolver,
        version::PhpVersion,
    };

    fn plan(request: ProjectRequest) -> GenerationPlan {
        let tables = OptionTables::builtin();
        let version = PhpVersion::fallback();
        let name = ProjectName::parse(request.name()).unwrap();
        let options = OptionResolver::new(&tables, &version)
            .resolve(name, &request)
            .options;
        GenerationPlan::build(&options, &RuntimeEnvironment::new(version, 2026)).unwrap()
    }

    fn created(plan: &GenerationPlan) -> Vec<String> {
        plan.ops()
            .filter_map(FileOp::created_path)
            .map(|p| p.display().to_string())
            .collect()
    }

    #[test]
    fn default_plan_has_phpunit_layout() {
        let plan = plan(ProjectRequest::new("vendor/project"));

        assert_eq!(
            created(&plan),
            vec![
                "src",
                "tests",
                "composer.json",
                "LICENSE.md",
                "README.md",
                "CHANGELOG.md",
                "CONTRIBUTING.md",
                ".gitignore",
                ".gitattributes",
                "src/Project.php",
                "phpunit.xml.dist",
                "tests/ProjectTest.php",
            ]
        );
        assert!(plan.bootstrap_status.is_none());
        assert!(plan.integrations.is_empty());
        assert_eq!(plan.commands().count(), 0);
    }

    #[test]
    fn none_license_skips_license_file() {
        let plan = plan(ProjectRequest::new("vendor/project").with_license(Some("none".into())));
        assert!(!created(&plan).contains(&"LICENSE.md".to_string()));
    }

    #[test]
    fn bootstrapped_framework_reports_status() {
        let plan =
            plan(ProjectRequest::new("vendor/project").with_test_framework(Some("phpspec".into())));
        assert_eq!(plan.bootstrap_status.as_deref(), Some("Initialized phpspec."));
        let files = created(&plan);
        assert!(files.contains(&"spec/ProjectSpec.php".to_string()));
        assert!(files.contains(&"phpspec.yml".to_string()));
    }

    #[test]
    fn integrations_follow_fixed_order() {
        let plan = plan(ProjectRequest::new("vendor/project").with_integrations(Integrations {
            phpcs: true,
            vagrant: true,
            editor_config: true,
            env: true,
            github_templates: true,
            git: true,
            install: true,
        }));

        let hooks: Vec<_> = plan.integrations.iter().map(|s| s.hook).collect();
        assert_eq!(hooks, Hook::ORDER.to_vec());

        let commands: Vec<_> = plan.commands().map(ToString::to_string).collect();
        assert_eq!(commands, vec!["git init", "composer install"]);

        assert_eq!(
            plan.integrations[5].status.as_deref(),
            Some("Initialized git repo in \"project\".")
        );
    }

    #[test]
    fn github_templates_move_contributing() {
        let plan = plan(ProjectRequest::new("vendor/project").with_integrations(Integrations {
            github_templates: true,
            ..Integrations::default()
        }));
        assert!(plan.integrations[0].ops.contains(&FileOp::Move {
            from: "CONTRIBUTING.md".into(),
            to: ".github/CONTRIBUTING.md".into(),
        }));
    }

    #[test]
    fn validate_rejects_duplicates() {
        let mut plan = plan(ProjectRequest::new("vendor/project"));
        plan.core_files.push(FileOp::render(stubs::README, "README.md"));
        assert!(matches!(
            plan.validate(),
            Err(DomainError::DuplicatePath { path }) if path == "README.md"
        ));
    }

    #[test]
    fn validate_rejects_absolute_paths() {
        let mut plan = plan(ProjectRequest::new("vendor/project"));
        plan.skeleton.push(FileOp::create_dir("/etc"));
        assert!(matches!(
            plan.validate(),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn appends_do_not_count_as_duplicates() {
        let plan = plan(ProjectRequest::new("vendor/project").with_integrations(Integrations {
            vagrant: true,
            env: true,
            ..Integrations::default()
        }));
        assert!(plan.validate().is_ok());
    }
}
