//! Screen shake and flash overlay
//!
//! Both effects are re-triggerable: a new trigger takes the max of the current
//! and requested values, so a weak hit never cuts a strong one short.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use crate::consts::{FLASH_DECAY, TICK_MS_ESTIMATE};

/// Transient shake and flash state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Effects {
    /// Shake amplitude in pixels
    pub shake_magnitude: f32,
    /// Shake time left in milliseconds
    pub shake_ms: f32,
    /// Flash overlay alpha (0-1)
    pub flash_alpha: f32,
}

impl Effects {
    pub fn trigger_shake(&mut self, magnitude: f32, duration_ms: f32) {
        self.shake_magnitude = self.shake_magnitude.max(magnitude);
        self.shake_ms = self.shake_ms.max(duration_ms);
    }

    pub fn trigger_flash(&mut self, alpha: f32) {
        self.flash_alpha = self.flash_alpha.max(alpha).min(1.0);
    }

    /// Decay both effects by one tick
    pub fn decay(&mut self) {
        if self.shake_ms > 0.0 {
            self.shake_ms = (self.shake_ms - TICK_MS_ESTIMATE).max(0.0);
        }
        if self.shake_ms == 0.0 {
            self.shake_magnitude = 0.0;
        }
        self.flash_alpha = (self.flash_alpha - FLASH_DECAY).max(0.0);
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_ms > 0.0 && self.shake_magnitude > 0.0
    }

    /// Current shake amplitude; eases down as the remaining time runs out
    pub fn shake_amplitude(&self) -> f32 {
        if !self.is_shaking() {
            return 0.0;
        }
        let decay = self.shake_ms / (self.shake_ms + 1.0).max(300.0);
        self.shake_magnitude * (0.6 + decay * 0.4)
    }

    /// Random scene offset for this frame (vertical travel is damped)
    pub fn shake_offset<R: Rng>(&self, rng: &mut R) -> Vec2 {
        let mag = self.shake_amplitude();
        if mag == 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            rng.random_range(-1.0..=1.0) * mag,
            rng.random_range(-1.0..=1.0) * mag * 0.6,
        )
    }

    /// Whether the flash overlay is worth drawing
    pub fn flash_visible(&self) -> bool {
        self.flash_alpha > 0.01
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_shake_takes_max_not_sum() {
        let mut fx = Effects::default();
        fx.trigger_shake(8.0, 260.0);
        fx.trigger_shake(3.0, 140.0);
        assert_eq!(fx.shake_magnitude, 8.0);
        assert_eq!(fx.shake_ms, 260.0);

        fx.trigger_shake(12.0, 100.0);
        assert_eq!(fx.shake_magnitude, 12.0);
        assert_eq!(fx.shake_ms, 260.0);
    }

    #[test]
    fn test_shake_decays_to_zero() {
        let mut fx = Effects::default();
        fx.trigger_shake(3.0, 140.0);
        // 140 / 16 = 8.75 -> nine ticks to run out
        for _ in 0..8 {
            fx.decay();
            assert_eq!(fx.shake_magnitude, 3.0);
        }
        fx.decay();
        assert_eq!(fx.shake_ms, 0.0);
        assert_eq!(fx.shake_magnitude, 0.0);
        assert!(!fx.is_shaking());
    }

    #[test]
    fn test_flash_takes_max_and_decays_linearly() {
        let mut fx = Effects::default();
        fx.trigger_flash(0.65);
        fx.trigger_flash(0.3);
        assert_eq!(fx.flash_alpha, 0.65);
        fx.decay();
        assert!((fx.flash_alpha - 0.61).abs() < 1e-6);
        for _ in 0..20 {
            fx.decay();
        }
        assert_eq!(fx.flash_alpha, 0.0);
        assert!(!fx.flash_visible());
    }

    #[test]
    fn test_flash_clamped_to_one() {
        let mut fx = Effects::default();
        fx.trigger_flash(3.0);
        assert_eq!(fx.flash_alpha, 1.0);
    }

    #[test]
    fn test_shake_offset_bounded_by_amplitude() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut fx = Effects::default();
        assert_eq!(fx.shake_offset(&mut rng), Vec2::ZERO);

        fx.trigger_shake(12.0, 420.0);
        let amp = fx.shake_amplitude();
        assert!(amp <= 12.0 && amp >= 12.0 * 0.6);
        for _ in 0..100 {
            let off = fx.shake_offset(&mut rng);
            assert!(off.x.abs() <= amp);
            assert!(off.y.abs() <= amp * 0.6 + 1e-6);
        }
    }

    #[test]
    fn test_amplitude_eases_as_time_runs_out() {
        let mut fx = Effects::default();
        fx.trigger_shake(10.0, 420.0);
        let early = fx.shake_amplitude();
        fx.shake_ms = 20.0;
        let late = fx.shake_amplitude();
        assert!(late < early);
    }
}
