//! Test module for pipeline, determinism and property tests.
//!
//! # Test Structure
//!
//! - `integration.rs`: Scripted encounters through the full tick pipeline
//! - `determinism.rs`: Seeded replay of long random encounters
//! - `properties.rs`: Rotation invariants under arbitrary inputs
//! - `helpers.rs`: The `Encounter` driver and observation factories

mod helpers;
mod properties;

// Re-export for convenience
pub use helpers::*;
