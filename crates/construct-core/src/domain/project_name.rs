//! The `vendor/project` package identifier.
//!
//! This is the one input that aborts a run when malformed. Everything else
//! falls back to a default.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// A validated `vendor/project` identifier.
///
/// Invariant: exactly one `/`, both segments non-empty, no whitespace or
/// backslash, and neither segment is `.` or `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName {
    vendor: String,
    project: String,
}

impl ProjectName {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidProjectName {
            name: raw.to_string(),
        };

        let (vendor, project) = raw.split_once('/').ok_or_else(invalid)?;

        if !is_valid_segment(vendor) || !is_valid_segment(project) {
            return Err(invalid());
        }

        Ok(Self {
            vendor: vendor.to_string(),
            project: project.to_string(),
        })
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// The full `vendor/project` identifier.
    pub fn package(&self) -> String {
        format!("{}/{}", self.vendor, self.project)
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_whitespace())
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.vendor, self.project)
    }
}

impl FromStr for ProjectName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
