/// Stable JSON report for one investigation session
use crate::config::types::*;
use crate::explore::ExplorationSummary;
use crate::verdict::Verdict;
use serde::{Deserialize, Serialize};

pub const REPORT_SCHEMA_VERSION: &str = "1.0";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaseReport {
    /// Schema version (always "1.0" for v1)
    pub schema_version: String,

    /// Case name
    pub case: String,

    /// Journal session id, when a journal was initialized
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    pub exploration: ExplorationSummary,

    /// Name of the location where exploration ended
    pub final_location: String,

    /// Collected clues in ascending order
    pub clues: Vec<String>,

    pub verdict: Verdict,

    /// RFC 3339 timestamp
    pub issued_at: String,
}

impl CaseReport {
    pub fn new(
        case: &str,
        session_id: Option<String>,
        exploration: ExplorationSummary,
        final_location: &str,
        clues: Vec<String>,
        verdict: Verdict,
    ) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_VERSION.to_string(),
            case: case.to_string(),
            session_id,
            exploration,
            final_location: final_location.to_string(),
            clues,
            verdict,
            issued_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CaseError::Config(format!("Failed to serialize report to JSON: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::presets::CasePresets;
    use crate::evidence::AttributionTable;
    use crate::explore::{explore_from, ClueMap, ScriptedCommands, Silent};
    use crate::graph::LocationGraph;
    use crate::verdict::VerdictClassifier;

    #[test]
    fn test_report_serializes_full_session() {
        let presets = CasePresets::new();
        let case = presets.get("mansion").unwrap();
        let graph = LocationGraph::from_case(case).unwrap();
        let table = AttributionTable::from_rows(&case.attributions);
        let mut commands = ScriptedCommands::parse(["l", "r", "l", "f"]);

        let exploration = explore_from(&graph, &ClueMap::from_case(case), &mut commands, &mut Silent);
        let verdict = VerdictClassifier::verify(&exploration.clues, &table, Some("Mr. Green"));
        let clues = exploration.clues.iter().map(str::to_string).collect();
        let final_location = graph.name(exploration.summary.final_location).unwrap();

        let report = CaseReport::new(
            &case.name,
            None,
            exploration.summary.clone(),
            final_location,
            clues,
            verdict,
        );
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["schema_version"], "1.0");
        assert_eq!(value["final_location"], "Study");
        assert_eq!(value["exploration"]["end"], "finished");
        assert_eq!(value["verdict"]["status"], "upheld");
        assert!(value.get("session_id").is_none());
        assert_eq!(value["clues"].as_array().unwrap().len(), 4);
    }
}
