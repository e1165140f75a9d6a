//! Option resolution.
//!
//! Every optional input follows one policy:
//!
//! | Input                   | Result                         | Warning |
//! |-------------------------|--------------------------------|---------|
//! | absent                  | table default                  | no      |
//! | present, not accepted   | table default                  | yes     |
//! | present, accepted       | the value, verbatim            | no      |
//!
//! Resolution never fails. Warnings are returned in the order they were
//! produced; printing them is the orchestrator's job.

use std::fmt;

use heck::ToUpperCamelCase;
use serde::{Serialize, Serializer};

use crate::domain::{
    catalog::{LicenseDef, OptionTables, TestFrameworkDef},
    project_name::ProjectName,
    request::{Integrations, ProjectRequest},
    version::PhpVersion,
};

/// Substring in the project segment that triggers the micro-package advisory.
pub const RESERVED_NOTATION: &str = "php";

/// Label used for the version in warnings.
const VERSION_KIND: &str = "php";

/// Identifier used when a vendor segment has no usable characters.
const VENDOR_PLACEHOLDER: &str = "Vendor";

/// Identifier used when a project segment has no usable characters.
const PROJECT_PLACEHOLDER: &str = "Package";

// ── Warning ───────────────────────────────────────────────────────────────────

/// A human-readable problem found while resolving options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning(String);

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Warning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

// ── ResolvedOptions ───────────────────────────────────────────────────────────

/// Fully validated options. Every field is populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub name: ProjectName,
    pub license: LicenseDef,
    pub test_framework: TestFrameworkDef,
    pub php_version: PhpVersion,
    pub namespace: String,
    /// Class name of the base source stub, derived from the project segment.
    pub class_name: String,
    pub keywords: Vec<String>,
    pub integrations: Integrations,
}

/// Resolved options plus the warnings produced on the way.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub options: ResolvedOptions,
    pub warnings: Vec<Warning>,
}

// ── Resolver ──────────────────────────────────────────────────────────────────

/// Resolves a request against injected tables and the running PHP version.
pub struct OptionResolver<'a> {
    tables: &'a OptionTables,
    running_version: &'a PhpVersion,
}

impl<'a> OptionResolver<'a> {
    pub fn new(tables: &'a OptionTables, running_version: &'a PhpVersion) -> Self {
        Self {
            tables,
            running_version,
        }
    }

    /// Resolve every option of an already-validated name.
    pub fn resolve(&self, name: ProjectName, request: &ProjectRequest) -> Resolution {
        let mut warnings = Vec::new();

        let license = self.resolve_license(request.license(), &mut warnings);
        let test_framework = self.resolve_test_framework(request.test_framework(), &mut warnings);
        let php_version = self.resolve_php_version(request.php_version(), &mut warnings);

        if name.project().contains(RESERVED_NOTATION) {
            warnings.push(Warning::new(format!(
                "If you are about to create a micro-package \"{name}\" should optimally not \
                 contain a \"{RESERVED_NOTATION}\" notation in the project name."
            )));
        }

        let namespace = match request.namespace().map(str::trim) {
            Some(explicit) if !explicit.is_empty() => explicit.to_string(),
            _ => derive_namespace(&name),
        };
        let class_name = identifier(name.project(), PROJECT_PLACEHOLDER);
        let keywords = parse_keywords(request.keywords());

        Resolution {
            options: ResolvedOptions {
                name,
                license,
                test_framework,
                php_version,
                namespace,
                class_name,
                keywords,
                integrations: request.integrations(),
            },
            warnings,
        }
    }

    fn resolve_license(&self, supplied: Option<&str>, warnings: &mut Vec<Warning>) -> LicenseDef {
        let default = *self.tables.default_license();
        let Some(value) = supplied else {
            return default;
        };

        match self.tables.find_license(value) {
            Some(def) => *def,
            None => {
                warnings.push(Warning::new(format!(
                    "\"{value}\" is not a supported license. Using {}.",
                    default.id
                )));
                default
            }
        }
    }

    fn resolve_test_framework(
        &self,
        supplied: Option<&str>,
        warnings: &mut Vec<Warning>,
    ) -> TestFrameworkDef {
        let default = *self.tables.default_test_framework();
        let Some(value) = supplied else {
            return default;
        };

        match self.tables.find_test_framework(value) {
            Some(def) => *def,
            None => {
                warnings.push(Warning::new(format!(
                    "\"{value}\" is not a supported testing framework. Using {}.",
                    default.id
                )));
                default
            }
        }
    }

    fn resolve_php_version(
        &self,
        supplied: Option<&str>,
        warnings: &mut Vec<Warning>,
    ) -> PhpVersion {
        let running = self.running_version;
        let Some(value) = supplied else {
            return running.clone();
        };

        match PhpVersion::parse(value) {
            None => {
                warnings.push(Warning::new(format!(
                    "\"{value}\" is not a valid {VERSION_KIND} version. Using version {running}."
                )));
                running.clone()
            }
            Some(target) if target > *running => {
                warnings.push(Warning::new(format!(
                    "\"{value}\" is greater than your installed {VERSION_KIND} version. \
                     Using version {running}."
                )));
                running.clone()
            }
            Some(target) => target,
        }
    }
}

/// `vendor/php-project` → `Vendor\PhpProject`.
pub fn derive_namespace(name: &ProjectName) -> String {
    format!(
        "{}\\{}",
        identifier(name.vendor(), VENDOR_PLACEHOLDER),
        identifier(name.project(), PROJECT_PLACEHOLDER)
    )
}

/// A valid PHP identifier from a name segment.
///
/// Empty after stripping yields `placeholder`; a leading digit gets
/// `placeholder` as prefix.
fn identifier(segment: &str, placeholder: &str) -> String {
    let studly = studly(segment);
    match studly.chars().next() {
        None => placeholder.to_string(),
        Some(first) if first.is_ascii_digit() => format!("{placeholder}{studly}"),
        Some(_) => studly,
    }
}

/// Upper camel case with non-alphanumeric characters stripped.
fn studly(segment: &str) -> String {
    segment
        .to_upper_camel_case()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

fn parse_keywords(raw: Option<&str>) -> Vec<String> {
    raw.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{LICENSE_CATALOG, TEST_FRAMEWORK_CATALOG};

    fn running() -> PhpVersion {
        PhpVersion::from_runtime("8.3.6").unwrap()
    }

    fn resolve(request: ProjectRequest) -> Resolution {
        let tables = OptionTables::builtin();
        let version = running();
        let name = ProjectName::parse(request.name()).unwrap();
        OptionResolver::new(&tables, &version).resolve(name, &request)
    }

    fn messages(resolution: &Resolution) -> Vec<&str> {
        resolution.warnings.iter().map(Warning::message).collect()
    }

    #[test]
    fn defaults_apply_silently() {
        let resolution = resolve(ProjectRequest::new("vendor/project"));
        let options = &resolution.options;

        assert!(resolution.warnings.is_empty());
        assert_eq!(options.license.id, "MIT");
        assert_eq!(options.test_framework.id, "phpunit");
        assert_eq!(options.php_version.as_str(), "8.3");
        assert_eq!(options.namespace, "Vendor\\Project");
        assert_eq!(options.class_name, "Project");
        assert!(options.keywords.is_empty());
    }

    #[test]
    fn unknown_license_falls_back_to_mit() {
        let resolution = resolve(
            ProjectRequest::new("vendor/project").with_license(Some("noidealicense".into())),
        );
        assert_eq!(
            messages(&resolution),
            vec!["\"noidealicense\" is not a supported license. Using MIT."]
        );
        assert_eq!(resolution.options.license.id, "MIT");
    }

    #[test]
    fn known_license_is_used_verbatim() {
        let resolution =
            resolve(ProjectRequest::new("vendor/project").with_license(Some("Apache-2.0".into())));
        assert!(resolution.warnings.is_empty());
        assert_eq!(resolution.options.license.id, "Apache-2.0");
    }

    #[test]
    fn unknown_framework_falls_back_to_phpunit() {
        let resolution = resolve(
            ProjectRequest::new("vendor/project").with_test_framework(Some("idontexist".into())),
        );
        assert_eq!(
            messages(&resolution),
            vec!["\"idontexist\" is not a supported testing framework. Using phpunit."]
        );
        assert_eq!(resolution.options.test_framework.id, "phpunit");
    }

    #[test]
    fn known_framework_is_used() {
        let resolution =
            resolve(ProjectRequest::new("vendor/project").with_test_framework(Some("behat".into())));
        assert!(resolution.warnings.is_empty());
        assert_eq!(resolution.options.test_framework.id, "behat");
    }

    #[test]
    fn unparseable_version_warns_not_valid() {
        let resolution =
            resolve(ProjectRequest::new("vendor/project").with_php_version(Some("invalid".into())));
        assert_eq!(
            messages(&resolution),
            vec!["\"invalid\" is not a valid php version. Using version 8.3."]
        );
        assert_eq!(resolution.options.php_version, running());
    }

    #[test]
    fn too_new_version_warns_greater_than_installed() {
        let resolution =
            resolve(ProjectRequest::new("vendor/project").with_php_version(Some("9.0".into())));
        assert_eq!(
            messages(&resolution),
            vec!["\"9.0\" is greater than your installed php version. Using version 8.3."]
        );
        assert_eq!(resolution.options.php_version, running());
    }

    #[test]
    fn older_version_is_kept_verbatim() {
        let resolution =
            resolve(ProjectRequest::new("vendor/project").with_php_version(Some("5.6.0".into())));
        assert!(resolution.warnings.is_empty());
        assert_eq!(resolution.options.php_version.as_str(), "5.6.0");
    }

    #[test]
    fn version_comparison_uses_patch_level() {
        let resolution =
            resolve(ProjectRequest::new("vendor/project").with_php_version(Some("8.3.7".into())));
        assert_eq!(resolution.warnings.len(), 1);

        let resolution =
            resolve(ProjectRequest::new("vendor/project").with_php_version(Some("8.3.6".into())));
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn reserved_notation_is_advisory_only() {
        let resolution = resolve(ProjectRequest::new("vendor/php-project"));
        assert_eq!(
            messages(&resolution),
            vec![
                "If you are about to create a micro-package \"vendor/php-project\" should \
                 optimally not contain a \"php\" notation in the project name."
            ]
        );
        assert_eq!(resolution.options.license.id, "MIT");
        assert_eq!(resolution.options.namespace, "Vendor\\PhpProject");
    }

    #[test]
    fn reserved_notation_is_case_sensitive_and_ignores_vendor() {
        assert!(resolve(ProjectRequest::new("vendor/PHP-tools")).warnings.is_empty());
        assert!(resolve(ProjectRequest::new("phpvendor/tools")).warnings.is_empty());
    }

    #[test]
    fn warnings_keep_resolution_order() {
        let resolution = resolve(
            ProjectRequest::new("vendor/php-lib")
                .with_php_version(Some("x".into()))
                .with_test_framework(Some("nope".into()))
                .with_license(Some("bogus".into())),
        );
        let found = messages(&resolution);
        assert_eq!(found.len(), 4);
        assert!(found[0].contains("license"));
        assert!(found[1].contains("testing framework"));
        assert!(found[2].contains("valid php version"));
        assert!(found[3].contains("micro-package"));
    }

    #[test]
    fn explicit_namespace_is_verbatim() {
        let resolution = resolve(
            ProjectRequest::new("vendor/project")
                .with_namespace(Some("JonathanTorres\\MyAwesomeProject".into())),
        );
        assert_eq!(resolution.options.namespace, "JonathanTorres\\MyAwesomeProject");
    }

    #[test]
    fn blank_namespace_counts_as_absent() {
        let resolution =
            resolve(ProjectRequest::new("vendor/project").with_namespace(Some("  ".into())));
        assert_eq!(resolution.options.namespace, "Vendor\\Project");
    }

    #[test]
    fn namespace_strips_non_alphanumerics() {
        let name = ProjectName::parse("my_vendor/http.client-v2").unwrap();
        assert_eq!(derive_namespace(&name), "MyVendor\\HttpClientV2");
    }

    #[test]
    fn segments_without_ascii_letters_get_placeholders() {
        let options = resolve(ProjectRequest::new("vendor/проект")).options;
        assert_eq!(options.namespace, "Vendor\\Package");
        assert_eq!(options.class_name, "Package");

        let options = resolve(ProjectRequest::new("-/-")).options;
        assert_eq!(options.namespace, "Vendor\\Package");
        assert_eq!(options.class_name, "Package");
    }

    #[test]
    fn leading_digits_are_prefixed() {
        let options = resolve(ProjectRequest::new("vendor/123")).options;
        assert_eq!(options.namespace, "Vendor\\Package123");
        assert_eq!(options.class_name, "Package123");

        let options = resolve(ProjectRequest::new("42/project")).options;
        assert_eq!(options.namespace, "Vendor42\\Project");
    }

    #[test]
    fn keywords_are_split_and_trimmed() {
        let resolution = resolve(
            ProjectRequest::new("vendor/project")
                .with_keywords(Some("some, project,,keywords ".into())),
        );
        assert_eq!(
            resolution.options.keywords,
            vec!["some", "project", "keywords"]
        );
    }

    #[test]
    fn custom_tables_change_the_fallback() {
        let tables = OptionTables::new(
            LICENSE_CATALOG.to_vec(),
            TEST_FRAMEWORK_CATALOG.to_vec(),
            "Apache-2.0",
            "phpspec",
        )
        .unwrap();
        let version = running();
        let request = ProjectRequest::new("vendor/project")
            .with_license(Some("WTFPL".into()))
            .with_test_framework(Some("pest".into()));
        let name = ProjectName::parse(request.name()).unwrap();
        let resolution = OptionResolver::new(&tables, &version).resolve(name, &request);

        assert_eq!(
            messages(&resolution),
            vec![
                "\"WTFPL\" is not a supported license. Using Apache-2.0.",
                "\"pest\" is not a supported testing framework. Using phpspec.",
            ]
        );
        assert_eq!(resolution.options.test_framework.id, "phpspec");
    }
}
