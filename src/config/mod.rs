//! Configuration and case data
//!
//! Case file model, built-in presets, startup validation and shared types.

pub mod case_file;
pub mod presets;
pub mod types;
pub mod validator;
