//! Sidebar resize interaction.
//!
//! The host dispatches pointer events one at a time; a drag is active from
//! `begin_drag` until `end_drag`, and moves outside a drag are ignored.

/// Initial sidebar width in percent of the container.
pub const DEFAULT_SIDEBAR_WIDTH_PCT: f64 = 25.0;
pub const MIN_SIDEBAR_WIDTH_PCT: f64 = 15.0;
pub const MAX_SIDEBAR_WIDTH_PCT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidebarResize {
    width_pct: f64,
    dragging: bool,
}

impl Default for SidebarResize {
    fn default() -> Self {
        Self {
            width_pct: DEFAULT_SIDEBAR_WIDTH_PCT,
            dragging: false,
        }
    }
}

impl SidebarResize {
    pub fn width_pct(&self) -> f64 {
        self.width_pct
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// CSS-style width such as `25%`.
    pub fn width_css(&self) -> String {
        format!("{}%", self.width_pct)
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Recomputes the width from a pointer position, clamped to
    /// `[MIN_SIDEBAR_WIDTH_PCT, MAX_SIDEBAR_WIDTH_PCT]`.
    ///
    /// Returns `false` when no drag is active or the container has no width.
    pub fn drag_to(&mut self, pointer_x: f64, container_left: f64, container_width: f64) -> bool {
        if !self.dragging || container_width <= 0.0 {
            return false;
        }
        let pct = (pointer_x - container_left) * 100.0 / container_width;
        self.width_pct = pct.clamp(MIN_SIDEBAR_WIDTH_PCT, MAX_SIDEBAR_WIDTH_PCT);
        true
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }
}
