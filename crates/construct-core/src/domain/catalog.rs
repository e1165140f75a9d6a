//! License and test-framework tables.
//!
//! Every supported option value is described exactly once by a def entry.
//! The resolver never matches on ids itself; it looks them up in an
//! [`OptionTables`] value handed to it, so tests can swap in their own tables.
//!
//! # Adding a License
//!
//! 1. Add one [`LicenseDef`] to [`LICENSE_CATALOG`]
//! 2. Add its text stub under `construct-adapters/stubs/license/`
//!
//! # Adding a Test Framework
//!
//! 1. Add one [`TestFrameworkDef`] to [`TEST_FRAMEWORK_CATALOG`]
//! 2. Add its config and test stubs under `construct-adapters/stubs/testing/`

use crate::domain::error::DomainError;

// ── License definitions ──────────────────────────────────────────────────────

/// One accepted `--license` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LicenseDef {
    /// The id the user passes on the command line.
    pub id: &'static str,

    /// SPDX identifier written into `composer.json`.
    pub manifest_id: &'static str,

    /// Stub holding the license text. `None` means no LICENSE.md is written.
    pub stub: Option<&'static str>,
}

/// Licenses shipped with Construct.
pub static LICENSE_CATALOG: &[LicenseDef] = &[
    LicenseDef {
        id: "MIT",
        manifest_id: "MIT",
        stub: Some("license/MIT.stub"),
    },
    LicenseDef {
        id: "Apache-2.0",
        manifest_id: "Apache-2.0",
        stub: Some("license/Apache-2.0.stub"),
    },
    LicenseDef {
        id: "GPL-2.0",
        manifest_id: "GPL-2.0-only",
        stub: Some("license/GPL-2.0.stub"),
    },
    LicenseDef {
        id: "GPL-3.0",
        manifest_id: "GPL-3.0-only",
        stub: Some("license/GPL-3.0.stub"),
    },
    LicenseDef {
        id: "none",
        manifest_id: "proprietary",
        stub: None,
    },
];

// ── Test framework definitions ───────────────────────────────────────────────

/// Everything the plan needs to know about one test framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestFrameworkDef {
    /// The id the user passes via `--test` / `--test-framework`.
    pub id: &'static str,

    /// Composer dev-dependency and its version constraint.
    pub package: &'static str,
    pub constraint: &'static str,

    /// Directory created for the tests, relative to the project root.
    pub test_dir: &'static str,

    /// Framework config file: stub name and destination.
    pub config_stub: &'static str,
    pub config_file: &'static str,

    /// Test stub and its destination. `{{CLASS}}` in the destination is
    /// replaced with the project class name.
    pub test_stub: &'static str,
    pub test_file: &'static str,

    /// Command registered as the composer `test` script.
    pub test_command: &'static str,

    /// Whether the test namespace is PSR-4 autoloaded from `test_dir`.
    pub autoload_dev: bool,

    /// Whether the framework needs its own bootstrap beyond a test stub.
    /// Bootstrapped frameworks report `Initialized <id>.` once written.
    pub bootstraps: bool,
}

/// Test frameworks shipped with Construct.
pub static TEST_FRAMEWORK_CATALOG: &[TestFrameworkDef] = &[
    TestFrameworkDef {
        id: "phpunit",
        package: "phpunit/phpunit",
        constraint: "^10.5",
        test_dir: "tests",
        config_stub: "testing/phpunit.xml.stub",
        config_file: "phpunit.xml.dist",
        test_stub: "testing/PhpunitTest.stub",
        test_file: "tests/{{CLASS}}Test.php",
        test_command: "phpunit",
        autoload_dev: true,
        bootstraps: false,
    },
    TestFrameworkDef {
        id: "behat",
        package: "behat/behat",
        constraint: "^3.14",
        test_dir: "features/bootstrap",
        config_stub: "testing/behat.yml.stub",
        config_file: "behat.yml",
        test_stub: "testing/FeatureContext.stub",
        test_file: "features/bootstrap/FeatureContext.php",
        test_command: "behat",
        autoload_dev: false,
        bootstraps: true,
    },
    TestFrameworkDef {
        id: "codeception",
        package: "codeception/codeception",
        constraint: "^5.1",
        test_dir: "tests/Unit",
        config_stub: "testing/codeception.yml.stub",
        config_file: "codeception.yml",
        test_stub: "testing/CodeceptionTest.stub",
        test_file: "tests/Unit/{{CLASS}}Test.php",
        test_command: "codecept run",
        autoload_dev: true,
        bootstraps: true,
    },
    TestFrameworkDef {
        id: "phpspec",
        package: "phpspec/phpspec",
        constraint: "^7.5",
        test_dir: "spec",
        config_stub: "testing/phpspec.yml.stub",
        config_file: "phpspec.yml",
        test_stub: "testing/PhpspecSpec.stub",
        test_file: "spec/{{CLASS}}Spec.php",
        test_command: "phpspec run",
        autoload_dev: true,
        bootstraps: true,
    },
];

// ── Injected tables ──────────────────────────────────────────────────────────

/// The allow-lists and defaults the resolver works against.
///
/// Built once at startup and passed by value into the service.
#[derive(Debug, Clone)]
pub struct OptionTables {
    licenses: Vec<LicenseDef>,
    test_frameworks: Vec<TestFrameworkDef>,
    default_license: &'static str,
    default_test_framework: &'static str,
}

impl OptionTables {
    /// Build tables, checking that both defaults are present.
    pub fn new(
        licenses: Vec<LicenseDef>,
        test_frameworks: Vec<TestFrameworkDef>,
        default_license: &'static str,
        default_test_framework: &'static str,
    ) -> Result<Self, DomainError> {
        if !licenses.iter().any(|l| l.id == default_license) {
            return Err(DomainError::MissingDefault {
                kind: "license",
                id: default_license.to_string(),
            });
        }
        if !test_frameworks
            .iter()
            .any(|f| f.id == default_test_framework)
        {
            return Err(DomainError::MissingDefault {
                kind: "test framework",
                id: default_test_framework.to_string(),
            });
        }

        Ok(Self {
            licenses,
            test_frameworks,
            default_license,
            default_test_framework,
        })
    }

    /// The shipped catalogs with MIT and phpunit as defaults.
    pub fn builtin() -> Self {
        Self {
            licenses: LICENSE_CATALOG.to_vec(),
            test_frameworks: TEST_FRAMEWORK_CATALOG.to_vec(),
            default_license: "MIT",
            default_test_framework: "phpunit",
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn find_license(&self, id: &str) -> Option<&LicenseDef> {
        self.licenses.iter().find(|l| l.id == id)
    }

    pub fn find_test_framework(&self, id: &str) -> Option<&TestFrameworkDef> {
        self.test_frameworks.iter().find(|f| f.id == id)
    }

    pub fn default_license(&self) -> &LicenseDef {
        self.find_license(self.default_license)
            .expect("constructor guarantees the default license exists")
    }

    pub fn default_test_framework(&self) -> &TestFrameworkDef {
        self.find_test_framework(self.default_test_framework)
            .expect("constructor guarantees the default framework exists")
    }

    pub fn license_ids(&self) -> Vec<&'static str> {
        self.licenses.iter().map(|l| l.id).collect()
    }

    pub fn test_framework_ids(&self) -> Vec<&'static str> {
        self.test_frameworks.iter().map(|f| f.id).collect()
    }
}

impl Default for OptionTables {
    fn default() -> Self {
        Self::builtin()
    }
}
