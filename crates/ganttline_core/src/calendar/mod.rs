//! Visible calendar window.
//!
//! # Responsibility
//! - Derive the months shown by the timeline grid.
//! - Provide day counts that geometry uses as its unit of width.
//!
//! # Invariants
//! - A window is never empty.
//! - Months are distinct and chronologically ordered.

pub mod window;
