//! Stub texts compiled into the binary.
//!
//! Every stub name the generation plan can ask for is listed in [`BUILTIN_STUBS`].
//! Users can shadow any of them with a same-named file in the configured
//! stub directory; that lookup happens in the core service, not here.

use tracing::trace;

use construct_core::{
    application::{ApplicationError, ports::StubStore},
    error::ConstructResult,
};

macro_rules! stub {
    ($name:literal) => {
        ($name, include_str!(concat!("../stubs/", $name)))
    };
}

/// `(name, text)` for every shipped stub.
pub static BUILTIN_STUBS: &[(&str, &str)] = &[
    stub!("license/MIT.stub"),
    stub!("license/Apache-2.0.stub"),
    stub!("license/GPL-2.0.stub"),
    stub!("license/GPL-3.0.stub"),
    stub!("README.stub"),
    stub!("CHANGELOG.stub"),
    stub!("CONTRIBUTING.stub"),
    stub!("gitignore.stub"),
    stub!("gitattributes.stub"),
    stub!("src/Class.stub"),
    stub!("testing/phpunit.xml.stub"),
    stub!("testing/PhpunitTest.stub"),
    stub!("testing/behat.yml.stub"),
    stub!("testing/FeatureContext.stub"),
    stub!("testing/codeception.yml.stub"),
    stub!("testing/CodeceptionTest.stub"),
    stub!("testing/phpspec.yml.stub"),
    stub!("testing/PhpspecSpec.stub"),
    stub!("php-cs-fixer.stub"),
    stub!("Vagrantfile.stub"),
    stub!("editorconfig.stub"),
    stub!("env.stub"),
    stub!("github/ISSUE_TEMPLATE.stub"),
    stub!("github/PULL_REQUEST_TEMPLATE.stub"),
];

/// Stub store over [`BUILTIN_STUBS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedStubs;

impl EmbeddedStubs {
    pub fn new() -> Self {
        Self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        BUILTIN_STUBS.iter().map(|(name, _)| *name)
    }
}

impl StubStore for EmbeddedStubs {
    fn get(&self, name: &str) -> ConstructResult<String> {
        trace!(stub = name, "Loading embedded stub");
        BUILTIN_STUBS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, text)| (*text).to_string())
            .ok_or_else(|| {
                ApplicationError::StubNotFound {
                    name: name.to_string(),
                }
                .into()
            })
    }

    fn contains(&self, name: &str) -> bool {
        BUILTIN_STUBS.iter().any(|(candidate, _)| *candidate == name)
    }
}
