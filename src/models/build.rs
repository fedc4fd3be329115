//! Build outcome models.
//!
//! These are the values the host CI runtime hands to the notifier when a
//! build completes. They are read-only to this crate.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Terminal state of one build execution
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BuildResult {
    Success,
    Unstable,
    Failure,
    Aborted,
    NotBuilt,
    /// Any state the host reports that is not one of the above
    Other(String),
}

impl BuildResult {
    /// Canonical uppercase name, as it appears in status messages
    pub fn as_str(&self) -> &str {
        match self {
            BuildResult::Success => "SUCCESS",
            BuildResult::Unstable => "UNSTABLE",
            BuildResult::Failure => "FAILURE",
            BuildResult::Aborted => "ABORTED",
            BuildResult::NotBuilt => "NOT_BUILT",
            BuildResult::Other(name) => name,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BuildResult::Success)
    }
}

impl fmt::Display for BuildResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildResult {
    type Err = std::convert::Infallible;

    /// Case-insensitive; unknown names become `Other` in uppercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        Ok(match normalized.as_str() {
            "SUCCESS" => BuildResult::Success,
            "UNSTABLE" => BuildResult::Unstable,
            "FAILURE" => BuildResult::Failure,
            "ABORTED" => BuildResult::Aborted,
            "NOT_BUILT" => BuildResult::NotBuilt,
            _ => BuildResult::Other(normalized),
        })
    }
}

impl Serialize for BuildResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BuildResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let Ok(result) = raw.parse::<BuildResult>();
        Ok(result)
    }
}

/// Outcome of one completed build, as supplied by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOutcome {
    /// Name of the project (job) the build belongs to
    pub project_name: String,
    /// Result of this build
    pub result: BuildResult,
    /// URL fragment of the build relative to the host base URL
    #[serde(default)]
    pub build_path: String,
    /// Result of the build that ran immediately before this one, in execution order
    #[serde(default)]
    pub previous_result: Option<BuildResult>,
}

impl BuildOutcome {
    pub fn new(
        project_name: impl Into<String>,
        result: BuildResult,
        build_path: impl Into<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            result,
            build_path: build_path.into(),
            previous_result: None,
        }
    }

    pub fn with_previous(mut self, previous: BuildResult) -> Self {
        self.previous_result = Some(previous);
        self
    }
}
