// Case validation
// Startup validation of a case file. Topology errors are fatal: the location
// graph must be a single tree rooted at `root`. Empty clue or suspect texts
// are fatal dataset errors; other dataset oddities are warnings.

use crate::config::case_file::CaseFile;
use crate::config::types::{CaseError, Result};
use std::collections::{HashMap, HashSet, VecDeque};

/// Validation result with detailed errors
#[derive(Debug)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: String) {
        self.valid = false;
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a case at startup; fails fast when the topology is not a tree
pub fn validate_case(case: &CaseFile) -> Result<ValidationResult> {
    let mut result = ValidationResult::new();

    validate_topology(case, &mut result);
    let topology_errors = result.errors.len();
    validate_dataset(case, &mut result);

    for warning in &result.warnings {
        log::warn!("case '{}': {}", case.name, warning);
    }

    if !result.is_valid() {
        let error_msg = format!(
            "case '{}' failed validation:\n{}",
            case.name,
            result.errors.join("\n")
        );
        return Err(if topology_errors > 0 {
            CaseError::Topology(error_msg)
        } else {
            CaseError::Dataset(error_msg)
        });
    }

    Ok(result)
}

fn validate_topology(case: &CaseFile, result: &mut ValidationResult) {
    if case.locations.is_empty() {
        result.add_error("case has no locations".to_string());
        return;
    }

    let mut names = HashSet::new();
    for location in &case.locations {
        if location.name.trim().is_empty() {
            result.add_error("location with empty name".to_string());
        } else if !names.insert(location.name.as_str()) {
            result.add_error(format!("duplicate location name '{}'", location.name));
        }
    }

    if !names.contains(case.root.as_str()) {
        result.add_error(format!("root '{}' is not a declared location", case.root));
    }

    // child name -> claiming parent
    let mut parent_of: HashMap<&str, &str> = HashMap::new();
    for location in &case.locations {
        for child in [location.left.as_deref(), location.right.as_deref()]
            .into_iter()
            .flatten()
        {
            if !names.contains(child) {
                result.add_error(format!(
                    "location '{}' links to unknown location '{}'",
                    location.name, child
                ));
                continue;
            }
            if child == location.name {
                result.add_error(format!("location '{}' is its own child", child));
                continue;
            }
            if child == case.root {
                result.add_error(format!(
                    "root '{}' is listed as a child of '{}'",
                    child, location.name
                ));
                continue;
            }
            if let Some(previous) = parent_of.insert(child, location.name.as_str()) {
                result.add_error(format!(
                    "location '{}' has two parents ('{}' and '{}')",
                    child, previous, location.name
                ));
            }
        }
    }

    if !result.is_valid() {
        return;
    }

    // Every location must hang off the root.
    let mut reached = HashSet::new();
    let mut queue = VecDeque::from([case.root.as_str()]);
    while let Some(name) = queue.pop_front() {
        if !reached.insert(name) {
            continue;
        }
        if let Some(spec) = case.location(name) {
            queue.extend(spec.left.as_deref());
            queue.extend(spec.right.as_deref());
        }
    }
    for location in &case.locations {
        if !reached.contains(location.name.as_str()) {
            result.add_error(format!(
                "location '{}' is unreachable from root '{}'",
                location.name, case.root
            ));
        }
    }
}

fn validate_dataset(case: &CaseFile, result: &mut ValidationResult) {
    for location in &case.locations {
        if let Some(clue) = &location.clue {
            if clue.is_empty() {
                result.add_error(format!("location '{}' has an empty clue", location.name));
            }
        }
    }

    let mut attributed: HashMap<&str, &str> = HashMap::new();
    for row in &case.attributions {
        if row.clue.is_empty() {
            result.add_error(format!("attribution to '{}' has an empty clue", row.suspect));
            continue;
        }
        if row.suspect.is_empty() {
            result.add_error(format!("clue '{}' is attributed to an empty name", row.clue));
            continue;
        }
        if let Some(previous) = attributed.insert(row.clue.as_str(), row.suspect.as_str()) {
            result.add_warning(format!(
                "clue '{}' attributed twice ('{}' then '{}'); the later entry wins",
                row.clue, previous, row.suspect
            ));
        }
    }

    let placed: HashSet<&str> = case.placed_clues().map(|(_, clue)| clue).collect();
    for (location, clue) in case.placed_clues() {
        if !clue.is_empty() && !attributed.contains_key(clue) {
            result.add_warning(format!(
                "clue '{}' in '{}' points at no suspect",
                clue, location
            ));
        }
    }
    for row in &case.attributions {
        if !row.clue.is_empty() && !placed.contains(row.clue.as_str()) {
            result.add_warning(format!(
                "attributed clue '{}' is not placed in any location",
                row.clue
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::case_file::{AttributionRow, LocationSpec};

    fn case(root: &str, locations: Vec<LocationSpec>) -> CaseFile {
        CaseFile {
            name: "test".to_string(),
            root: root.to_string(),
            locations,
            attributions: vec![],
        }
    }

    fn errors_of(case: &CaseFile) -> String {
        match validate_case(case) {
            Err(CaseError::Topology(msg)) => msg,
            other => panic!("expected topology error, got {:?}", other.map(|r| r.valid)),
        }
    }

    #[test]
    fn test_single_room_is_valid() {
        let report = validate_case(&case("A", vec![LocationSpec::new("A")])).unwrap();
        assert!(report.is_valid());
    }

    #[test]
    fn test_empty_case_rejected() {
        assert!(errors_of(&case("A", vec![])).contains("no locations"));
    }

    #[test]
    fn test_unknown_root_rejected() {
        let msg = errors_of(&case("Z", vec![LocationSpec::new("A")]));
        assert!(msg.contains("root 'Z'"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let msg = errors_of(&case(
            "A",
            vec![LocationSpec::new("A"), LocationSpec::new("A")],
        ));
        assert!(msg.contains("duplicate location name 'A'"));
    }

    #[test]
    fn test_dangling_child_rejected() {
        let msg = errors_of(&case("A", vec![LocationSpec::new("A").with_left("B")]));
        assert!(msg.contains("unknown location 'B'"));
    }

    #[test]
    fn test_two_parents_rejected() {
        let msg = errors_of(&case(
            "A",
            vec![
                LocationSpec::new("A").with_left("B").with_right("C"),
                LocationSpec::new("B").with_left("D"),
                LocationSpec::new("C").with_right("D"),
                LocationSpec::new("D"),
            ],
        ));
        assert!(msg.contains("'D' has two parents"));
    }

    #[test]
    fn test_cycle_back_to_root_rejected() {
        let msg = errors_of(&case(
            "A",
            vec![
                LocationSpec::new("A").with_left("B"),
                LocationSpec::new("B").with_left("A"),
            ],
        ));
        assert!(msg.contains("root 'A' is listed as a child"));
    }

    #[test]
    fn test_detached_cycle_is_unreachable() {
        let msg = errors_of(&case(
            "A",
            vec![
                LocationSpec::new("A"),
                LocationSpec::new("B").with_left("C"),
                LocationSpec::new("C").with_left("B"),
            ],
        ));
        assert!(msg.contains("'B' is unreachable"));
        assert!(msg.contains("'C' is unreachable"));
    }

    #[test]
    fn test_self_child_rejected() {
        let msg = errors_of(&case(
            "A",
            vec![
                LocationSpec::new("A").with_left("B"),
                LocationSpec::new("B").with_right("B"),
            ],
        ));
        assert!(msg.contains("'B' is its own child"));
    }

    #[test]
    fn test_dataset_warnings() {
        let mut c = case(
            "A",
            vec![
                LocationSpec::new("A").with_left("B").with_clue("ash"),
                LocationSpec::new("B").with_clue("mud"),
            ],
        );
        c.attributions = vec![
            AttributionRow::new("ash", "Cook"),
            AttributionRow::new("ash", "Butler"),
            AttributionRow::new("glove", "Maid"),
        ];

        let report = validate_case(&c).unwrap();
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 3);
        assert!(report.warnings.iter().any(|w| w.contains("attributed twice")));
        assert!(report.warnings.iter().any(|w| w.contains("'mud'")));
        assert!(report.warnings.iter().any(|w| w.contains("'glove'")));
    }

    fn dataset_errors_of(case: &CaseFile) -> String {
        match validate_case(case) {
            Err(CaseError::Dataset(msg)) => msg,
            other => panic!("expected dataset error, got {:?}", other.map(|r| r.valid)),
        }
    }

    #[test]
    fn test_empty_suspect_rejected() {
        let mut c = case("A", vec![LocationSpec::new("A").with_clue("ash")]);
        c.attributions = vec![AttributionRow::new("ash", "")];
        let msg = dataset_errors_of(&c);
        assert!(msg.contains("empty name"));
    }

    #[test]
    fn test_empty_clue_text_is_dataset_error() {
        let c = case("A", vec![LocationSpec::new("A").with_clue("")]);
        let msg = dataset_errors_of(&c);
        assert!(msg.contains("empty clue"));
    }

    #[test]
    fn test_topology_error_wins_over_dataset_error() {
        let c = case("Z", vec![LocationSpec::new("A").with_clue("")]);
        let msg = errors_of(&c);
        assert!(msg.contains("root 'Z'"));
        assert!(msg.contains("empty clue"));
    }
}
