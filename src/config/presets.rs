/// Built-in cases
///
/// Each preset is a complete, pre-validated `CaseFile`: location topology,
/// per-location clue placement and the clue-to-suspect dataset.
use crate::config::case_file::{AttributionRow, CaseFile, LocationSpec};
use std::collections::HashMap;

/// Preset used when no case file is given
pub const DEFAULT_PRESET: &str = "mansion";

/// Built-in case registry
pub struct CasePresets {
    cases: HashMap<String, CaseFile>,
}

impl CasePresets {
    /// Create registry with the default cases
    pub fn new() -> Self {
        let mut presets = Self {
            cases: HashMap::new(),
        };

        presets.register_mansion();

        presets
    }

    /// The mansion: ten rooms, ten clues, five suspects.
    ///
    /// ```text
    ///              Entrance Hall
    ///             /             \
    ///      Living Room        Kitchen
    ///       /       \               \
    ///   Library    Bedroom         Garage
    ///    /         /     \         /
    ///  Attic    Study  Bathroom  Garden
    /// ```
    fn register_mansion(&mut self) {
        let locations = vec![
            LocationSpec::new("Entrance Hall")
                .with_left("Living Room")
                .with_right("Kitchen")
                .with_clue("wet footprint"),
            LocationSpec::new("Living Room")
                .with_left("Library")
                .with_right("Bedroom")
                .with_clue("broken ashtray"),
            LocationSpec::new("Kitchen")
                .with_right("Garage")
                .with_clue("pot with leftovers"),
            LocationSpec::new("Library")
                .with_left("Attic")
                .with_clue("torn bookmark"),
            LocationSpec::new("Bedroom")
                .with_left("Study")
                .with_right("Bathroom")
                .with_clue("strand of blond hair"),
            LocationSpec::new("Garage")
                .with_left("Garden")
                .with_clue("tire mark"),
            LocationSpec::new("Attic").with_clue("rusty tool"),
            LocationSpec::new("Study").with_clue("crumpled note"),
            LocationSpec::new("Bathroom").with_clue("spilled detergent"),
            LocationSpec::new("Garden").with_clue("distinct sole print"),
        ];

        let attributions = vec![
            AttributionRow::new("wet footprint", "Mr. Green"),
            AttributionRow::new("broken ashtray", "Mrs. Blue"),
            AttributionRow::new("torn bookmark", "Prof. Purple"),
            AttributionRow::new("pot with leftovers", "Mrs. Blue"),
            AttributionRow::new("crumpled note", "Mr. Green"),
            AttributionRow::new("strand of blond hair", "Miss Pink"),
            AttributionRow::new("spilled detergent", "Mr. Yellow"),
            AttributionRow::new("distinct sole print", "Mr. Green"),
            AttributionRow::new("rusty tool", "Prof. Purple"),
            AttributionRow::new("tire mark", "Mr. Yellow"),
        ];

        let case = CaseFile {
            name: "mansion".to_string(),
            root: "Entrance Hall".to_string(),
            locations,
            attributions,
        };

        self.cases.insert(case.name.clone(), case);
    }

    /// Get a preset by name
    pub fn get(&self, name: &str) -> Option<&CaseFile> {
        self.cases.get(&name.to_lowercase())
    }

    /// List available preset names, sorted
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cases.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for CasePresets {
    fn default() -> Self {
        Self::new()
    }
}
