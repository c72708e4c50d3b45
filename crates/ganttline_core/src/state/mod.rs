//! Plan state transitions.
//!
//! # Responsibility
//! - Map the current plan to the next plan for every user edit.
//!
//! # Invariants
//! - Transitions are pure: they never read clocks or storage.
//! - Unknown ids leave the plan unchanged instead of failing.

pub mod transitions;
