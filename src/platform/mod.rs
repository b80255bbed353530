//! Platform layer
//!
//! Handles the browser side of the game:
//! - Input folding (keys, touch buttons, pointer)
//! - Haptics
//! - Touch control visibility

pub mod haptics;
pub mod input;

pub use input::{Hold, InputState};

/// Widest viewport that still shows the on-screen touch buttons
pub const TOUCH_CONTROLS_MAX_WIDTH: f64 = 900.0;

/// Whether the touch buttons should be visible
pub fn show_touch_controls(has_touch: bool, viewport_width: f64) -> bool {
    has_touch && viewport_width <= TOUCH_CONTROLS_MAX_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_controls_only_on_small_touch_screens() {
        assert!(show_touch_controls(true, 800.0));
        assert!(show_touch_controls(true, 900.0));
        assert!(!show_touch_controls(true, 1200.0));
        assert!(!show_touch_controls(false, 400.0));
    }
}
