/// Core types shared across the cluebox engine
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Minimum number of corroborating clues for an accusation to be upheld
pub const UPHELD_THRESHOLD: usize = 2;

/// Navigation command accepted by the exploration cursor
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavCommand {
    MoveLeft,
    MoveRight,
    MoveBack,
    Finish,
    /// Raw input that matched no known command (kept for reporting)
    Unrecognized(String),
}

impl NavCommand {
    /// Parse one line of user input.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace. An
    /// empty line is unrecognized rather than an implicit finish.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "l" | "left" => NavCommand::MoveLeft,
            "r" | "right" => NavCommand::MoveRight,
            "b" | "back" => NavCommand::MoveBack,
            "f" | "finish" | "q" | "quit" => NavCommand::Finish,
            _ => NavCommand::Unrecognized(trimmed.to_string()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NavCommand::MoveLeft => "move-left",
            NavCommand::MoveRight => "move-right",
            NavCommand::MoveBack => "move-back",
            NavCommand::Finish => "finish",
            NavCommand::Unrecognized(_) => "unrecognized",
        }
    }
}

/// Why the cursor refused a command
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveRejection {
    NoLeftChild,
    NoRightChild,
    AtRoot,
    UnknownCommand(String),
    /// Exploration already finished; further commands are ignored
    NotExploring,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRejection::NoLeftChild => write!(f, "there is no location to the left"),
            MoveRejection::NoRightChild => write!(f, "there is no location to the right"),
            MoveRejection::AtRoot => write!(f, "already at the starting location, cannot go back"),
            MoveRejection::UnknownCommand(raw) if raw.is_empty() => write!(f, "empty command"),
            MoveRejection::UnknownCommand(raw) => write!(f, "unknown command '{}'", raw),
            MoveRejection::NotExploring => write!(f, "exploration has already finished"),
        }
    }
}

/// How the exploration loop terminated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplorationEnd {
    /// Explicit finish command
    Finished,
    /// The command source ran dry
    InputExhausted,
}

/// Verdict taxonomy (closed set)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    /// At least `UPHELD_THRESHOLD` clues point at the accused
    Upheld,
    /// Exactly one clue points at the accused
    Insufficient,
    /// No clue points at the accused
    Unfounded,
    /// No clues were collected at all
    CannotJudge,
    /// Empty or absent accused name
    Cancelled,
}

impl VerdictStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictStatus::Upheld => "upheld",
            VerdictStatus::Insufficient => "insufficient",
            VerdictStatus::Unfounded => "unfounded",
            VerdictStatus::CannotJudge => "cannot_judge",
            VerdictStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evidence trail behind a verdict
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictProvenance {
    /// Accused name as given (None when cancelled before one was supplied)
    pub accused: Option<String>,
    /// Clues attributed to the accused, in index order
    pub supporting_clues: Vec<String>,
    /// Number of clues consulted against the attribution table
    pub clues_examined: usize,
    /// Clues that have no attribution entry
    pub unattributed_clues: Vec<String>,
    /// Threshold applied for an upheld verdict
    pub threshold: usize,
}

/// Error types for cluebox
///
/// Only setup paths produce these. Rejected moves, missing attributions and
/// non-upheld verdicts are ordinary values.
#[derive(Error, Debug)]
pub enum CaseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Topology error: {0}")]
    Topology(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Journal error: {0}")]
    Journal(String),
}

pub type Result<T> = std::result::Result<T, CaseError>;
