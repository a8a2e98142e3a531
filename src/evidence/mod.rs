//! Evidence stores
//!
//! The clue index accumulates what was discovered; the attribution table
//! says who each clue points at.

pub mod attribution;
pub mod clue_index;

pub use attribution::{bucket_for, AttributionTable, BucketStats, BUCKET_COUNT};
pub use clue_index::{ClueIndex, InOrder};
