/// Accusation verification
///
/// verdict = f(clue index, attribution table, accused name). The count of
/// clues attributed to the accused is classified against
/// `UPHELD_THRESHOLD`; traversal order does not affect the result.
use crate::config::types::*;
use crate::evidence::{AttributionTable, ClueIndex};
use serde::{Deserialize, Serialize};

/// Classified outcome with its evidence trail
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: VerdictStatus,
    pub provenance: VerdictProvenance,
}

impl Verdict {
    /// Number of clues attributed to the accused
    pub fn supporting_count(&self) -> usize {
        self.provenance.supporting_clues.len()
    }

    pub fn is_upheld(&self) -> bool {
        self.status == VerdictStatus::Upheld
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CaseError::Config(format!("Failed to serialize verdict to JSON: {}", e)))
    }
}

/// Verdict classifier - pure function over collected evidence
pub struct VerdictClassifier;

impl VerdictClassifier {
    /// Whether there is anything to judge. Callers check this before
    /// asking for an accused name.
    pub fn can_judge(clues: &ClueIndex) -> bool {
        !clues.is_empty()
    }

    /// Verify an accusation.
    ///
    /// An empty index short-circuits to `CannotJudge` and an empty or absent
    /// name to `Cancelled`; neither consults the attribution table.
    pub fn verify(
        clues: &ClueIndex,
        attributions: &AttributionTable,
        accused: Option<&str>,
    ) -> Verdict {
        if !Self::can_judge(clues) {
            return Self::classify_without_evidence(accused);
        }

        let accused = match accused {
            Some(name) if !name.is_empty() => name,
            _ => return Self::classify_cancelled(),
        };

        let mut supporting_clues = Vec::new();
        let mut unattributed_clues = Vec::new();
        let mut clues_examined = 0;

        for clue in clues {
            clues_examined += 1;
            match attributions.lookup(clue) {
                Some(suspect) if suspect == accused => supporting_clues.push(clue.to_string()),
                Some(_) => {}
                None => unattributed_clues.push(clue.to_string()),
            }
        }

        let status = Self::classify_count(supporting_clues.len());
        log::debug!(
            "accusation against '{}': {} of {} clue(s) support it -> {}",
            accused,
            supporting_clues.len(),
            clues_examined,
            status
        );

        Verdict {
            status,
            provenance: VerdictProvenance {
                accused: Some(accused.to_string()),
                supporting_clues,
                clues_examined,
                unattributed_clues,
                threshold: UPHELD_THRESHOLD,
            },
        }
    }

    /// Map a supporting-clue count to a status
    pub fn classify_count(count: usize) -> VerdictStatus {
        if count >= UPHELD_THRESHOLD {
            VerdictStatus::Upheld
        } else if count == 1 {
            VerdictStatus::Insufficient
        } else {
            VerdictStatus::Unfounded
        }
    }

    fn classify_without_evidence(accused: Option<&str>) -> Verdict {
        Verdict {
            status: VerdictStatus::CannotJudge,
            provenance: VerdictProvenance {
                accused: accused.filter(|n| !n.is_empty()).map(str::to_string),
                supporting_clues: Vec::new(),
                clues_examined: 0,
                unattributed_clues: Vec::new(),
                threshold: UPHELD_THRESHOLD,
            },
        }
    }

    fn classify_cancelled() -> Verdict {
        Verdict {
            status: VerdictStatus::Cancelled,
            provenance: VerdictProvenance {
                accused: None,
                supporting_clues: Vec::new(),
                clues_examined: 0,
                unattributed_clues: Vec::new(),
                threshold: UPHELD_THRESHOLD,
            },
        }
    }
}
