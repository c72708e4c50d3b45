//! Plan domain model.
//!
//! # Responsibility
//! - Define the phase/task tree persisted as one snapshot.
//! - Own the phase color palette.
//!
//! # Invariants
//! - A plan exclusively owns its phases; a phase exclusively owns its tasks.
//! - Display order equals insertion order at both levels.

pub mod palette;
pub mod plan;
