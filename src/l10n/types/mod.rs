//! Foundational data structures, error types and culture identifiers.

pub mod culture;
pub mod error;
pub mod models;
