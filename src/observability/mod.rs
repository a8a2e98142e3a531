//! Observability
//!
//! Structured case-journal events on top of the `log` facade.

pub mod journal;
