//! Location graph
//!
//! Fixed binary tree of explorable locations stored in a single arena.
//! Parent links are plain indices used for navigation only.

pub mod location;

pub use location::{Location, LocationGraph, LocationGraphBuilder, LocationId, MapEntry, Side};
