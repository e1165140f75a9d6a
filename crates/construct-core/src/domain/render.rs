//! Placeholder substitution for stubs.
//!
//! Stubs use `{{VARIABLE}}` placeholders. There are no conditionals, loops or
//! filters; anything that needs logic (the composer manifest, for one) is
//! built in Rust instead.
//!
//! ## Standard Variables
//!
//! | Variable          | Example                    |
//! |-------------------|----------------------------|
//! | `VENDOR`          | `vendor`                   |
//! | `PROJECT`         | `php-project`              |
//! | `PACKAGE`         | `vendor/php-project`       |
//! | `NAMESPACE`       | `Vendor\PhpProject`        |
//! | `NAMESPACE_JSON`  | `Vendor\\PhpProject`       |
//! | `CLASS`           | `PhpProject`               |
//! | `YEAR`            | `2026`                     |
//! | `AUTHOR_NAME`     | `Jane Doe`                 |
//! | `AUTHOR_EMAIL`    | `jane@example.com`         |
//! | `PHP_VERSION`     | `8.3`                      |
//! | `LICENSE`         | `MIT`                      |
//! | `TEST_FRAMEWORK`  | `phpunit`                  |
//! | `TEST_COMMAND`    | `phpunit`                  |
//! | `TEST_DIR`        | `tests`                    |

use std::collections::HashMap;

use crate::domain::{request::RuntimeEnvironment, resolver::ResolvedOptions};

/// Author name used when none is configured or discoverable.
const ANONYMOUS_AUTHOR: &str = "Your Name";

#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    /// Derive the standard variables from resolved options.
    pub fn new(options: &ResolvedOptions, env: &RuntimeEnvironment) -> Self {
        let framework = &options.test_framework;

        Self::default()
            .with_variable("VENDOR", options.name.vendor())
            .with_variable("PROJECT", options.name.project())
            .with_variable("PACKAGE", options.name.package())
            .with_variable("NAMESPACE", &options.namespace)
            .with_variable("NAMESPACE_JSON", options.namespace.replace('\\', "\\\\"))
            .with_variable("CLASS", &options.class_name)
            .with_variable("YEAR", env.year.to_string())
            .with_variable(
                "AUTHOR_NAME",
                env.author.name.as_deref().unwrap_or(ANONYMOUS_AUTHOR),
            )
            .with_variable("AUTHOR_EMAIL", env.author.email.as_deref().unwrap_or_default())
            .with_variable("PHP_VERSION", options.php_version.as_str())
            .with_variable("LICENSE", options.license.manifest_id)
            .with_variable("TEST_FRAMEWORK", framework.id)
            .with_variable("TEST_COMMAND", framework.test_command)
            .with_variable("TEST_DIR", framework.test_dir)
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every known `{{KEY}}` in one left-to-right pass.
    ///
    /// Unknown placeholders are left verbatim and substituted values are
    /// never rescanned, so a value containing `{{...}}` is inserted as-is.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after_open = &rest[open + 2..];

            let Some(close) = after_open.find("}}") else {
                out.push_str(&rest[open..]);
                return out;
            };

            let key = &after_open[..close];
            match self.get(key) {
                Some(value) => out.push_str(value),
                None => {
                    out.push_str("{{");
                    out.push_str(key);
                    out.push_str("}}");
                }
            }
            rest = &after_open[close + 2..];
        }

        out.push_str(rest);
        out
    }
}
