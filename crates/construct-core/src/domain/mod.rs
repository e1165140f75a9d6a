// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Construct.
//!
//! Pure decision logic: name validation, option resolution against injected
//! tables, and the generation plan derived from the result.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: no filesystem, process or clock access
//! - **No async**: everything is synchronous
//! - **Injected tables**: allow-lists are values, never globals the resolver reaches for
pub mod catalog;
pub mod error;
pub mod manifest;
pub mod plan;
pub mod project_name;
pub mod render;
pub mod request;
pub mod resolver;
pub mod version;

pub use catalog::{LICENSE_CATALOG, LicenseDef, OptionTables, TEST_FRAMEWORK_CATALOG, TestFrameworkDef};
pub use error::{DomainError, ErrorCategory};
pub use manifest::ComposerManifest;
pub use plan::{CommandSpec, FileOp, GenerationPlan, IntegrationStep};
pub use project_name::ProjectName;
pub use render::RenderContext;
pub use request::{Author, Hook, Integrations, ProjectRequest, RuntimeEnvironment};
pub use resolver::{OptionResolver, Resolution, ResolvedOptions, Warning};
pub use version::{FALLBACK_PHP_VERSION, PhpVersion};

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // End-to-end domain pipeline: name → resolution → plan
    // ========================================================================

    fn pipeline(request: &ProjectRequest) -> Result<(Resolution, GenerationPlan), DomainError> {
        let name = ProjectName::parse(request.name())?;
        let tables = OptionTables::builtin();
        let version = PhpVersion::from_runtime("8.2.12").unwrap();
        let resolution = OptionResolver::new(&tables, &version).resolve(name, request);
        let plan = GenerationPlan::build(
            &resolution.options,
            &RuntimeEnvironment::new(version, 2026),
        )?;
        Ok((resolution, plan))
    }

    #[test]
    fn invalid_name_stops_before_resolution() {
        let request = ProjectRequest::new("noslash").with_license(Some("bogus".into()));
        let err = pipeline(&request).unwrap_err();
        assert!(matches!(err, DomainError::InvalidProjectName { .. }));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn fallbacks_still_produce_a_full_plan() {
        let request = ProjectRequest::new("vendor/project")
            .with_license(Some("bogus".into()))
            .with_test_framework(Some("bogus".into()))
            .with_php_version(Some("99".into()));
        let (resolution, plan) = pipeline(&request).unwrap();

        assert_eq!(resolution.warnings.len(), 3);
        assert_eq!(resolution.options.php_version.as_str(), "8.2");
        assert!(plan.core_files.iter().any(|op| matches!(
            op,
            FileOp::Render { dest, .. } if dest.as_os_str() == "LICENSE.md"
        )));
    }

    #[test]
    fn custom_namespace_reaches_the_manifest() {
        let request = ProjectRequest::new("vendor/project").with_namespace(Some("Acme\\Lib".into()));
        let (_, plan) = pipeline(&request).unwrap();

        let FileOp::Write { content, .. } = &plan.core_files[0] else {
            panic!("manifest should be written first");
        };
        assert!(content.contains(r#""Acme\\Lib\\": "src/""#));
    }
}
