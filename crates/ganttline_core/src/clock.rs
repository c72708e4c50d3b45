//! Calendar clock abstraction.
//!
//! # Responsibility
//! - Supply "today" to the calendar window and task defaults.
//! - Keep wall-clock reads out of pure state transitions.
//!
//! # Invariants
//! - Dates are local calendar dates without a time component.

use chrono::{Local, NaiveDate};

/// Source of the current local calendar date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Reads the host's local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date. Used by tests and replay tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
