//! Input intent collected between frames
//!
//! Event callbacks only set flags here; the frame loop folds them into a
//! `TickInput` once per tick. Pause and reset are edges and are consumed.

use crate::clamp;
use crate::sim::TickInput;

/// Longest real-time gap credited to one tick (tab switches, debugger stops)
pub const MAX_ELAPSED_MS: f32 = 250.0;

/// Held directions from one input device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hold {
    pub up: bool,
    pub down: bool,
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keys: Hold,
    pub touch: Hold,
    /// Pointer y in field coordinates while the pointer is over the field
    pub pointer_y: Option<f32>,
    pause_requested: bool,
    reset_requested: bool,
    last_time_ms: Option<f64>,
}

impl InputState {
    /// Record a pointer position, clamped to the field height
    pub fn set_pointer(&mut self, y: f32, field_height: f32) {
        self.pointer_y = Some(clamp(y, 0.0, field_height));
    }

    pub fn clear_pointer(&mut self) {
        self.pointer_y = None;
    }

    pub fn request_pause_toggle(&mut self) {
        self.pause_requested = !self.pause_requested;
    }

    pub fn request_reset(&mut self) {
        self.reset_requested = true;
    }

    /// Build the input for the tick starting at `now_ms`, consuming edges
    pub fn take_tick_input(&mut self, now_ms: f64) -> TickInput {
        let elapsed_ms = match self.last_time_ms {
            Some(last) => ((now_ms - last) as f32).clamp(0.0, MAX_ELAPSED_MS),
            None => 0.0,
        };
        self.last_time_ms = Some(now_ms);

        // Touch buttons win over keys, and down over up, when both are held
        let (up, down) = if self.touch.up || self.touch.down {
            (self.touch.up && !self.touch.down, self.touch.down)
        } else {
            (self.keys.up, self.keys.down && !self.keys.up)
        };

        TickInput {
            up,
            down,
            pointer_y: self.pointer_y,
            pause: std::mem::take(&mut self.pause_requested),
            reset: std::mem::take(&mut self.reset_requested),
            elapsed_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_consumed_once() {
        let mut input = InputState::default();
        input.request_pause_toggle();
        input.request_reset();
        let first = input.take_tick_input(0.0);
        assert!(first.pause && first.reset);
        let second = input.take_tick_input(16.0);
        assert!(!second.pause && !second.reset);
    }

    #[test]
    fn test_double_pause_press_cancels_out() {
        let mut input = InputState::default();
        input.request_pause_toggle();
        input.request_pause_toggle();
        assert!(!input.take_tick_input(0.0).pause);
    }

    #[test]
    fn test_elapsed_time_clamped() {
        let mut input = InputState::default();
        assert_eq!(input.take_tick_input(1000.0).elapsed_ms, 0.0);
        assert_eq!(input.take_tick_input(1016.0).elapsed_ms, 16.0);
        assert_eq!(input.take_tick_input(9000.0).elapsed_ms, MAX_ELAPSED_MS);
    }

    #[test]
    fn test_key_and_touch_precedence() {
        let mut input = InputState::default();
        input.keys = Hold {
            up: true,
            down: true,
        };
        let tick = input.take_tick_input(0.0);
        assert!(tick.up && !tick.down);

        input.touch.down = true;
        let tick = input.take_tick_input(16.0);
        assert!(!tick.up && tick.down);
    }

    #[test]
    fn test_pointer_clamped_to_field() {
        let mut input = InputState::default();
        input.set_pointer(-20.0, 600.0);
        assert_eq!(input.pointer_y, Some(0.0));
        input.set_pointer(900.0, 600.0);
        assert_eq!(input.take_tick_input(0.0).pointer_y, Some(600.0));
        input.clear_pointer();
        assert_eq!(input.take_tick_input(16.0).pointer_y, None);
    }
}
