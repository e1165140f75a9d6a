//! The generated `composer.json`.
//!
//! Built as a typed value and serialized with serde so escaping of namespace
//! backslashes and optional sections never depend on stub text.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{
    error::DomainError,
    request::{Author, RuntimeEnvironment},
    resolver::ResolvedOptions,
};

pub const CODING_STYLE_PACKAGE: (&str, &str) = ("friendsofphp/php-cs-fixer", "^3.64");
pub const DOTENV_PACKAGE: (&str, &str) = ("vlucas/phpdotenv", "^5.6");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposerManifest {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    pub license: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<ManifestAuthor>,
    pub require: BTreeMap<String, String>,
    #[serde(rename = "require-dev")]
    pub require_dev: BTreeMap<String, String>,
    pub autoload: Autoload,
    #[serde(rename = "autoload-dev", skip_serializing_if = "Option::is_none")]
    pub autoload_dev: Option<Autoload>,
    pub scripts: BTreeMap<String, String>,
    #[serde(rename = "minimum-stability")]
    pub minimum_stability: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Autoload {
    #[serde(rename = "psr-4")]
    pub psr4: BTreeMap<String, String>,
}

impl Autoload {
    fn single(namespace: String, dir: &str) -> Self {
        Self {
            psr4: BTreeMap::from([(namespace, format!("{}/", dir.trim_end_matches('/')))]),
        }
    }
}

impl ComposerManifest {
    pub fn build(options: &ResolvedOptions, env: &RuntimeEnvironment) -> Self {
        let framework = &options.test_framework;
        let integrations = &options.integrations;

        let mut require = BTreeMap::from([(
            "php".to_string(),
            format!(">={}", options.php_version),
        )]);
        let mut require_dev = BTreeMap::from([(
            framework.package.to_string(),
            framework.constraint.to_string(),
        )]);
        let mut scripts = BTreeMap::from([(
            "test".to_string(),
            framework.test_command.to_string(),
        )]);

        if integrations.phpcs {
            let (package, constraint) = CODING_STYLE_PACKAGE;
            require_dev.insert(package.into(), constraint.into());
            scripts.insert("cs-fix".into(), "php-cs-fixer fix".into());
        }
        if integrations.env {
            let (package, constraint) = DOTENV_PACKAGE;
            require.insert(package.into(), constraint.into());
        }

        let autoload_dev = framework.autoload_dev.then(|| {
            Autoload::single(format!("{}\\Test\\", options.namespace), framework.test_dir)
        });

        Self {
            name: options.name.package(),
            description: "Package description".into(),
            kind: "library".into(),
            keywords: options.keywords.clone(),
            license: options.license.manifest_id.into(),
            authors: manifest_authors(&env.author),
            require,
            require_dev,
            autoload: Autoload::single(format!("{}\\", options.namespace), "src"),
            autoload_dev,
            scripts,
            minimum_stability: "stable".into(),
        }
    }

    /// Pretty JSON with a trailing newline, as composer writes it.
    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string_pretty(self)
            .map(|json| json + "\n")
            .map_err(|e| DomainError::RenderFailed {
                what: "composer.json".into(),
                reason: e.to_string(),
            })
    }
}

fn manifest_authors(author: &Author) -> Vec<ManifestAuthor> {
    author
        .name
        .as_ref()
        .map(|name| ManifestAuthor {
            name: name.clone(),
            email: author.email.clone(),
        })
        .into_iter()
        .collect()
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
    use serde_json::Value;

    fn manifest(request: ProjectRequest, author: Author) -> Value {
        let tables = OptionTables::builtin();
        let version = PhpVersion::from_runtime("8.3.6").unwrap();
        let name = ProjectName::parse(request.name()).unwrap();
        let options = OptionResolver::new(&tables, &version)
            .resolve(name, &request)
            .options;
        let env = RuntimeEnvironment::new(version, 2026).with_author(author);
        let json = ComposerManifest::build(&options, &env).to_json().unwrap();
        assert!(json.ends_with("}\n"));
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn default_manifest() {
        let json = manifest(ProjectRequest::new("vendor/project"), Author::default());

        assert_eq!(json["name"], "vendor/project");
        assert_eq!(json["type"], "library");
        assert_eq!(json["license"], "MIT");
        assert_eq!(json["require"]["php"], ">=8.3");
        assert_eq!(json["require-dev"]["phpunit/phpunit"], "^10.5");
        assert_eq!(json["autoload"]["psr-4"]["Vendor\\Project\\"], "src/");
        assert_eq!(json["autoload-dev"]["psr-4"]["Vendor\\Project\\Test\\"], "tests/");
        assert_eq!(json["scripts"]["test"], "phpunit");
        assert!(json.get("keywords").is_none());
        assert!(json.get("authors").is_none());
    }

    #[test]
    fn namespace_backslashes_are_escaped_in_text() {
        let tables = OptionTables::builtin();
        let version = PhpVersion::fallback();
        let request = ProjectRequest::new("vendor/project");
        let name = ProjectName::parse(request.name()).unwrap();
        let options = OptionResolver::new(&tables, &version)
            .resolve(name, &request)
            .options;
        let text = ComposerManifest::build(&options, &RuntimeEnvironment::new(version, 2026))
            .to_json()
            .unwrap();
        assert!(text.contains(r#""Vendor\\Project\\": "src/""#));
    }

    #[test]
    fn options_flow_into_manifest() {
        let json = manifest(
            ProjectRequest::new("vendor/project")
                .with_license(Some("GPL-3.0".into()))
                .with_php_version(Some("7.4".into()))
                .with_keywords(Some("cli, tools".into()))
                .with_integrations(Integrations {
                    phpcs: true,
                    env: true,
                    ..Integrations::default()
                }),
            Author {
                name: Some("Jane Doe".into()),
                email: None,
            },
        );

        assert_eq!(json["license"], "GPL-3.0-only");
        assert_eq!(json["require"]["php"], ">=7.4");
        assert_eq!(json["require"]["vlucas/phpdotenv"], "^5.6");
        assert_eq!(json["require-dev"]["friendsofphp/php-cs-fixer"], "^3.64");
        assert_eq!(json["scripts"]["cs-fix"], "php-cs-fixer fix");
        assert_eq!(json["keywords"], serde_json::json!(["cli", "tools"]));
        assert_eq!(json["authors"], serde_json::json!([{ "name": "Jane Doe" }]));
    }

    #[test]
    fn behat_has_no_autoload_dev() {
        let json = manifest(
            ProjectRequest::new("vendor/project").with_test_framework(Some("behat".into())),
            Author::default(),
        );
        assert!(json.get("autoload-dev").is_none());
        assert_eq!(json["require-dev"]["behat/behat"], "^3.14");
        assert_eq!(json["scripts"]["test"], "behat");
    }
}
