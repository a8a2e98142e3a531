//! Verdict classification
//!
//! Derives verdicts as pure functions over the collected clues and the
//! attribution table, and packages a session into a JSON report.

pub mod report;
pub mod verdict;

pub use report::CaseReport;
pub use verdict::{Verdict, VerdictClassifier};
