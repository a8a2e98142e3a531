//! Case files on disk: loading, validation and building a playable graph

use cluebox::config::case_file::CaseFile;
use cluebox::config::presets::CasePresets;
use cluebox::evidence::AttributionTable;
use cluebox::explore::{explore, ClueMap, ScriptedCommands};
use cluebox::graph::LocationGraph;
use cluebox::verdict::VerdictClassifier;
use cluebox::{CaseError, VerdictStatus};
use std::path::PathBuf;

fn write_temp(content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("cluebox-tests");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("case-{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_preset_survives_disk_round_trip() {
    let presets = CasePresets::new();
    let mansion = presets.get("mansion").unwrap();
    let path = write_temp(&mansion.to_json().unwrap());

    let loaded = CaseFile::load_from_file(&path).unwrap();
    assert_eq!(&loaded, mansion);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_custom_case_plays_end_to_end() {
    let path = write_temp(
        r#"{
            "name": "lighthouse",
            "root": "Door",
            "locations": [
                {"name": "Door", "left": "Stairs", "right": "Shed", "clue": "sand on the mat"},
                {"name": "Stairs", "left": "Lamp Room", "clue": "torn glove"},
                {"name": "Lamp Room", "clue": "smashed lens"},
                {"name": "Shed"}
            ],
            "attributions": [
                {"clue": "sand on the mat", "suspect": "Keeper"},
                {"clue": "torn glove", "suspect": "Fisher"},
                {"clue": "smashed lens", "suspect": "Keeper"}
            ]
        }"#,
    );

    let case = CaseFile::load_from_file(&path).unwrap();
    let graph = LocationGraph::from_case(&case).unwrap();
    let table = AttributionTable::from_rows(&case.attributions);
    let mut commands = ScriptedCommands::parse(["l", "l"]);
    let index = explore(&graph, &ClueMap::from_case(&case), &mut commands);

    assert_eq!(
        index.iter().collect::<Vec<_>>(),
        vec!["sand on the mat", "smashed lens", "torn glove"]
    );
    let verdict = VerdictClassifier::verify(&index, &table, Some("Keeper"));
    assert_eq!(verdict.status, VerdictStatus::Upheld);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_cyclic_case_refused_at_build() {
    let path = write_temp(
        r#"{
            "name": "loop",
            "root": "A",
            "locations": [
                {"name": "A", "left": "B"},
                {"name": "B", "left": "C"},
                {"name": "C", "right": "B"}
            ]
        }"#,
    );

    let case = CaseFile::load_from_file(&path).unwrap();
    let err = LocationGraph::from_case(&case).unwrap_err();
    assert!(matches!(err, CaseError::Topology(_)));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_missing_file_is_config_error() {
    let path = std::env::temp_dir().join("cluebox-tests").join("does-not-exist.json");
    let err = CaseFile::load_from_file(&path).unwrap_err();
    assert!(matches!(err, CaseError::Config(_)));
}
