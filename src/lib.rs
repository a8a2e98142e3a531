//! cluebox: an in-memory evidence tracking engine
//!
//! A fixed tree of locations is explored with a cursor; clues found along
//! the way land in an ordered, deduplicating index; a hash table attributes
//! each clue to a suspect; and a verdict counts how many collected clues
//! point at the accused.
//!
//! # Architecture
//!
//! ## Location Graph ([`graph`])
//! - [`graph::location`]: arena-backed binary tree with parent back-references
//!
//! ## Evidence ([`evidence`])
//! - [`evidence::clue_index`]: binary search tree of distinct clue texts
//! - [`evidence::attribution`]: fixed-bucket chained hash table, clue -> suspect
//!
//! ## Exploration ([`explore`])
//! - [`explore::cursor`]: navigation state machine (left/right/back/finish)
//! - [`explore::session`]: command loop feeding discoveries into the index
//!
//! ## Verdict ([`verdict`])
//! - [`verdict::verdict`]: threshold classification of an accusation
//! - [`verdict::report`]: stable JSON session report
//!
//! ## Observability ([`observability`])
//! - [`observability::journal`]: structured case events, optional JSON-lines file
//!
//! ## Configuration ([`config`])
//! - [`config::case_file`]: case.json loading
//! - [`config::presets`]: built-in cases
//! - [`config::validator`]: startup validation
//! - [`config::types`]: shared enums and the error type
//!
//! # Design Principles
//!
//! 1. **Setup can fail, play cannot** - only loading a case returns errors
//! 2. **Rejections are values** - bad moves and missing attributions are results
//! 3. **Indices, not pointers** - parent links and tree children live in arenas

// Location Graph
pub mod graph;

// Evidence
pub mod evidence;

// Exploration
pub mod explore;

// Verdict
pub mod verdict;

// Observability
pub mod observability;

// Configuration
pub mod config;

// CLI entrypoint wiring for the cluebox binary.
pub mod cli;

pub use config::types::*;
