//! Phase color palette and custom color validation.
//!
//! # Invariants
//! - Palette assignment is a pure function of the current phase count.
//! - Normalized custom colors are `#RRGGBB` in upper case.

use once_cell::sync::Lazy;
use regex::Regex;

/// Colors handed out to new phases, in cycling order.
pub const PALETTE: [&str; 12] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEEAD", "#D4A5A5", "#9B59B6", "#3498DB",
    "#E67E22", "#2ECC71", "#F1C40F", "#E74C3C",
];

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex color regex")
});

/// Returns the palette color for a plan that currently has `phase_count`
/// phases.
pub fn palette_color(phase_count: usize) -> &'static str {
    PALETTE[phase_count % PALETTE.len()]
}

/// Validates and normalizes a user-entered hex color.
///
/// Accepts `#RGB`, `#RRGGBB` and the same forms without `#`. Returns `None`
/// for anything else.
pub fn normalize_hex_color(raw: &str) -> Option<String> {
    let caps = HEX_COLOR_RE.captures(raw.trim())?;
    let digits = caps.get(1)?.as_str().to_ascii_uppercase();
    let expanded = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect::<String>()
    } else {
        digits
    };
    Some(format!("#{expanded}"))
}

#[cfg(test)]
mod tests {
    use super::{normalize_hex_color, palette_color, PALETTE};

    #[test]
    fn palette_cycles_by_phase_count() {
        assert_eq!(palette_color(0), "#FF6B6B");
        assert_eq!(palette_color(11), "#E74C3C");
        assert_eq!(palette_color(12), PALETTE[0]);
        assert_eq!(palette_color(13), PALETTE[1]);
    }

    #[test]
    fn normalize_accepts_short_and_long_forms() {
        assert_eq!(normalize_hex_color("#abc").as_deref(), Some("#AABBCC"));
        assert_eq!(normalize_hex_color(" 4ecdc4 ").as_deref(), Some("#4ECDC4"));
    }

    #[test]
    fn normalize_rejects_garbage() {
        assert_eq!(normalize_hex_color("red"), None);
        assert_eq!(normalize_hex_color("#12345"), None);
        assert_eq!(normalize_hex_color(""), None);
    }
}
