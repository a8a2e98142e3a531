/// Case file loading from case.json
use crate::config::types::{CaseError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default case file name looked up in the current directory
pub const DEFAULT_CASE_FILE: &str = "case.json";

/// One explorable location and the clue (if any) statically placed there
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clue: Option<String>,
}

impl LocationSpec {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            left: None,
            right: None,
            clue: None,
        }
    }

    pub fn with_left(mut self, left: &str) -> Self {
        self.left = Some(left.to_string());
        self
    }

    pub fn with_right(mut self, right: &str) -> Self {
        self.right = Some(right.to_string());
        self
    }

    pub fn with_clue(mut self, clue: &str) -> Self {
        self.clue = Some(clue.to_string());
        self
    }
}

/// Clue-to-suspect row of the attribution dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionRow {
    pub clue: String,
    pub suspect: String,
}

impl AttributionRow {
    pub fn new(clue: &str, suspect: &str) -> Self {
        Self {
            clue: clue.to_string(),
            suspect: suspect.to_string(),
        }
    }
}

/// Full case.json structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseFile {
    pub name: String,
    /// Name of the location exploration starts from
    pub root: String,
    pub locations: Vec<LocationSpec>,
    #[serde(default)]
    pub attributions: Vec<AttributionRow>,
}

impl CaseFile {
    /// Load a case from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CaseError::Config(format!(
                "Failed to read case file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_json(&content)
    }

    /// Parse a case from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| CaseError::Config(format!("Failed to parse case JSON: {}", e)))
    }

    /// Load ./case.json if it exists; `Ok(None)` when there is no such file
    pub fn load_default() -> Result<Option<Self>> {
        let case_path = std::env::current_dir()
            .map_err(|e| CaseError::Config(format!("Failed to get current directory: {}", e)))?
            .join(DEFAULT_CASE_FILE);

        if !case_path.exists() {
            return Ok(None);
        }

        Self::load_from_file(case_path).map(Some)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CaseError::Config(format!("Failed to serialize case to JSON: {}", e)))
    }

    pub fn location(&self, name: &str) -> Option<&LocationSpec> {
        self.locations.iter().find(|l| l.name == name)
    }

    /// Placed clues as (location, clue) pairs, in declaration order
    pub fn placed_clues(&self) -> impl Iterator<Item = (&str, &str)> {
        self.locations
            .iter()
            .filter_map(|l| l.clue.as_deref().map(|c| (l.name.as_str(), c)))
    }
}
