//! Exploration
//!
//! Cursor navigation over the location graph and the command loop that
//! feeds discovered clues into the clue index.

pub mod cursor;
pub mod session;

pub use cursor::{Cursor, Exits, MoveOutcome};
pub use session::{
    explore, explore_from, ClueAssignment, ClueMap, CommandSource, Discovery, Exploration,
    ExplorationObserver, ExplorationSummary, LineCommands, ScriptedCommands, Silent,
};
