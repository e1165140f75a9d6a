//! PHP version strings.
//!
//! Users write short versions (`8`, `8.2`, `8.2.1`); `semver` wants all three
//! components, so parsing pads the missing ones with zero before comparing.

use std::cmp::Ordering;
use std::fmt;

use semver::Version;
use serde::{Serialize, Serializer};

/// Version assumed when the running PHP cannot be determined.
pub const FALLBACK_PHP_VERSION: &str = "8.3.0";

/// A PHP version as the user wrote it plus its semantic value.
#[derive(Debug, Clone)]
pub struct PhpVersion {
    display: String,
    semver: Version,
}

impl PhpVersion {
    /// Strict parse for user input: 1–3 numeric dot-separated components.
    ///
    /// The original text is kept for display.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let semver = parse_components(trimmed)?;
        Some(Self {
            display: trimmed.to_string(),
            semver,
        })
    }

    /// Lenient parse for what a `php` binary reports (`8.3.6`, `8.4.0RC1`,
    /// `8.2.0-dev`). Displayed as `major.minor`.
    pub fn from_runtime(reported: &str) -> Option<Self> {
        let numeric: String = reported
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        let numeric = numeric.trim_end_matches('.');
        let semver = parse_components(numeric)?;
        Some(Self {
            display: format!("{}.{}", semver.major, semver.minor),
            semver,
        })
    }

    /// The version used when nothing could be probed.
    pub fn fallback() -> Self {
        Self::from_runtime(FALLBACK_PHP_VERSION).expect("fallback version constant is valid")
    }

    pub fn as_semver(&self) -> &Version {
        &self.semver
    }

    pub fn as_str(&self) -> &str {
        &self.display
    }
}

fn parse_components(raw: &str) -> Option<Version> {
    let parts: Vec<&str> = raw.split('.').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    if parts
        .iter()
        .any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }

    let mut numbers = parts.iter().map(|p| p.parse::<u64>());
    let major = numbers.next()?.ok()?;
    let minor = numbers.next().transpose().ok()?.unwrap_or(0);
    let patch = numbers.next().transpose().ok()?.unwrap_or(0);
    Some(Version::new(major, minor, patch))
}

// Equality and ordering follow the semantic value, so `8` == `8.0.0`.
impl PartialEq for PhpVersion {
    fn eq(&self, other: &Self) -> bool {
        self.semver == other.semver
    }
}

impl Eq for PhpVersion {}

impl PartialOrd for PhpVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.semver.cmp(&other.semver))
    }
}

impl Serialize for PhpVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl fmt::Display for PhpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_forms_are_padded() {
        assert_eq!(PhpVersion::parse("8").unwrap().as_semver(), &Version::new(8, 0, 0));
        assert_eq!(PhpVersion::parse("7.4").unwrap().as_semver(), &Version::new(7, 4, 0));
        assert_eq!(PhpVersion::parse("5.6.0").unwrap().to_string(), "5.6.0");
    }

    #[test]
    fn garbage_is_rejected() {
        for raw in ["invalid", "", "8.", ".8", "8.x", "1.2.3.4", "v8.1", "8.1-dev"] {
            assert!(PhpVersion::parse(raw).is_none(), "accepted: {raw:?}");
        }
    }

    #[test]
    fn comparison_is_semantic_not_lexical() {
        let nine = PhpVersion::parse("8.9").unwrap();
        let ten = PhpVersion::parse("8.10").unwrap();
        assert!(ten > nine);
        assert!(PhpVersion::parse("10.0").unwrap() > PhpVersion::parse("9.9.9").unwrap());
    }

    #[test]
    fn runtime_versions_drop_suffixes_and_show_major_minor() {
        assert_eq!(PhpVersion::from_runtime("8.3.6").unwrap().as_str(), "8.3");
        assert_eq!(PhpVersion::from_runtime("8.4.0RC1\n").unwrap().as_str(), "8.4");
        assert_eq!(
            PhpVersion::from_runtime("8.2.0-dev").unwrap().as_semver(),
            &Version::new(8, 2, 0)
        );
        assert!(PhpVersion::from_runtime("command not found").is_none());
    }

    #[test]
    fn equality_ignores_spelling() {
        assert_eq!(PhpVersion::parse("8").unwrap(), PhpVersion::parse("8.0.0").unwrap());
    }

    #[test]
    fn fallback_is_parseable() {
        assert_eq!(PhpVersion::fallback().as_str(), "8.3");
    }
}
