//! Raw generation input and the facts about the machine it runs on.

use std::fmt;

use serde::Serialize;

use crate::domain::version::PhpVersion;

// ── ProjectRequest ────────────────────────────────────────────────────────────

/// Everything the user asked for, before any validation.
///
/// Built once per invocation and never mutated afterwards; the `with_*`
/// methods consume and return the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectRequest {
    name: String,
    license: Option<String>,
    test_framework: Option<String>,
    php_version: Option<String>,
    namespace: Option<String>,
    keywords: Option<String>,
    integrations: Integrations,
}

impl ProjectRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_license(mut self, license: Option<String>) -> Self {
        self.license = license;
        self
    }

    pub fn with_test_framework(mut self, framework: Option<String>) -> Self {
        self.test_framework = framework;
        self
    }

    pub fn with_php_version(mut self, version: Option<String>) -> Self {
        self.php_version = version;
        self
    }

    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn with_keywords(mut self, keywords: Option<String>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_integrations(mut self, integrations: Integrations) -> Self {
        self.integrations = integrations;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }
    pub fn test_framework(&self) -> Option<&str> {
        self.test_framework.as_deref()
    }
    pub fn php_version(&self) -> Option<&str> {
        self.php_version.as_deref()
    }
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
    pub fn keywords(&self) -> Option<&str> {
        self.keywords.as_deref()
    }
    pub fn integrations(&self) -> Integrations {
        self.integrations
    }
}

// ── Integrations ──────────────────────────────────────────────────────────────

/// Optional steps, each switched on by its own flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Integrations {
    pub phpcs: bool,
    pub vagrant: bool,
    pub editor_config: bool,
    pub env: bool,
    pub github_templates: bool,
    pub git: bool,
    pub install: bool,
}

impl Integrations {
    /// Enabled hooks in execution order.
    pub fn enabled(&self) -> Vec<Hook> {
        Hook::ORDER
            .iter()
            .copied()
            .filter(|hook| self.is_enabled(*hook))
            .collect()
    }

    pub fn is_enabled(&self, hook: Hook) -> bool {
        match hook {
            Hook::CodingStyle => self.phpcs,
            Hook::Vagrant => self.vagrant,
            Hook::EditorConfig => self.editor_config,
            Hook::Environment => self.env,
            Hook::GithubTemplates => self.github_templates,
            Hook::Git => self.git,
            Hook::ComposerInstall => self.install,
        }
    }
}

/// One integration hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Hook {
    CodingStyle,
    Vagrant,
    EditorConfig,
    Environment,
    GithubTemplates,
    Git,
    ComposerInstall,
}

impl Hook {
    /// The fixed order hooks run in.
    pub const ORDER: [Hook; 7] = [
        Hook::CodingStyle,
        Hook::Vagrant,
        Hook::EditorConfig,
        Hook::Environment,
        Hook::GithubTemplates,
        Hook::Git,
        Hook::ComposerInstall,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CodingStyle => "coding style config",
            Self::Vagrant => "vagrant config",
            Self::EditorConfig => "editor config",
            Self::Environment => "environment files",
            Self::GithubTemplates => "github templates",
            Self::Git => "git init",
            Self::ComposerInstall => "composer install",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── RuntimeEnvironment ────────────────────────────────────────────────────────

/// Package author as written into the manifest and license.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Facts about the machine the generator runs on.
///
/// Probed by the caller (CLI) and passed in so the core stays free of I/O
/// and clocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEnvironment {
    pub php_version: PhpVersion,
    pub year: i32,
    pub author: Author,
}

impl RuntimeEnvironment {
    pub fn new(php_version: PhpVersion, year: i32) -> Self {
        Self {
            php_version,
            year,
            author: Author::default(),
        }
    }

    pub fn with_author(mut self, author: Author) -> Self {
        self.author = author;
        self
    }
}
