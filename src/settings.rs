//! Game settings and preferences
//!
//! In-memory only. The page may hand over a JSON blob at startup; nothing is
//! written back.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Particle pool size for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 128,
            QualityPreset::Medium => 512,
            QualityPreset::High => 2048,
        }
    }

    /// Share of the trail to draw (1.0 = full)
    pub fn trail_quality(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.5,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 1.0,
        }
    }

    /// Whether the speed blur filter is used
    pub fn blur_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Screen shake on hits and points
    pub screen_shake: bool,
    /// Flash overlay on points
    pub flash: bool,
    /// Speed-dependent blur
    pub blur: bool,
    /// Ball trail
    pub trails: bool,
    /// Particle bursts
    pub particles: bool,

    // === Audio / haptics ===
    pub sound_enabled: bool,
    /// Playback volume (0.0 - 1.0)
    pub volume: f32,
    /// Vibrate on hits (where supported)
    pub haptics: bool,

    // === Accessibility ===
    /// Reduced motion (no shake, flash or blur)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            screen_shake: true,
            flash: true,
            blur: true,
            trails: true,
            particles: true,

            sound_enabled: true,
            volume: 0.9,
            haptics: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset drops the blur filter for performance
        if preset == QualityPreset::Low {
            self.blur = false;
        }
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.volume = settings.volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Parse settings from JSON, falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings ({} quality)", settings.quality.as_str());
                settings
            }
            Err(err) => {
                log::warn!("Invalid settings ({}), using defaults", err);
                Self::default()
            }
        }
    }

    /// Settings handed over by the page: an optional JSON blob, then an
    /// optional preset name that overrides its quality
    pub fn from_page(json: Option<&str>, quality: Option<&str>) -> Self {
        let preset = quality.and_then(|name| {
            let preset = QualityPreset::from_str(name);
            if preset.is_none() {
                log::warn!("Unknown quality preset {:?}", name);
            }
            preset
        });
        match (json, preset) {
            (Some(json), Some(preset)) => {
                let mut settings = Self::from_json_or_default(json);
                settings.apply_preset(preset);
                settings
            }
            (Some(json), None) => Self::from_json_or_default(json),
            (None, preset) => Self::from_preset(preset.unwrap_or_default()),
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective flash overlay (respects reduced_motion)
    pub fn effective_flash(&self) -> bool {
        self.flash && !self.reduced_motion
    }

    /// Effective speed blur (respects reduced_motion and quality)
    pub fn effective_blur(&self) -> bool {
        self.blur && self.quality.blur_enabled() && !self.reduced_motion
    }

    /// Effective particle pool size
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Playback gain (0 when sound is off)
    pub fn effective_volume(&self) -> f32 {
        if self.sound_enabled {
            self.volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
