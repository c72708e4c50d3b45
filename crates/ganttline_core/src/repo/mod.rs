//! Persistence port for plan snapshots.
//!
//! # Responsibility
//! - Define the load/save contract used by the plan service.
//! - Keep storage details (SQLite, in-memory) out of transitions.
//!
//! # Invariants
//! - The whole plan is written on every save; there are no partial writes.
//! - Loading never fails: absent or malformed snapshots load as empty plans.

pub mod plan_repo;
