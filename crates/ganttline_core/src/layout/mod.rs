//! View-side layout helpers shared by UI shells.
//!
//! # Responsibility
//! - Model the sidebar resize drag as a plain state machine.
//! - Provide grid sizing constants for month columns.

pub mod sidebar;

use crate::calendar::window::Month;

/// Minimum rendered width of one day column.
pub const DAY_MIN_WIDTH_PX: u32 = 8;

/// Minimum rendered width of a month column.
pub fn month_min_width_px(month: &Month) -> u32 {
    month.day_count * DAY_MIN_WIDTH_PX
}

#[cfg(test)]
mod tests {
    use super::month_min_width_px;
    use crate::calendar::window::Month;

    #[test]
    fn month_width_scales_with_days() {
        assert_eq!(month_min_width_px(&Month::new(2025, 1).unwrap()), 224);
        assert_eq!(month_min_width_px(&Month::new(2025, 0).unwrap()), 248);
    }
}
