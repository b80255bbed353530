//! Procedural sound effects
//!
//! Each game event maps to a small recipe of enveloped oscillator tones.
//! Recipes are plain data; the Web Audio player that renders them only
//! exists on wasm32 and goes silent when no `AudioContext` can be created.

use rand::Rng;

use crate::sim::GameEvent;

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Sawtooth,
}

/// One enveloped tone. Times are seconds from the moment the sound starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub waveform: Waveform,
    pub start: f64,
    /// Peak gain reached after `attack`
    pub peak: f32,
    pub attack: f64,
    /// Gain decays exponentially to `floor` at `release`
    pub release: f64,
    pub floor: f32,
    pub stop: f64,
}

/// Tones to play for an event (empty if the event is silent)
pub fn recipe<R: Rng>(event: &GameEvent, rng: &mut R) -> Vec<Tone> {
    match *event {
        GameEvent::PaddleHit { intensity, .. } => vec![Tone {
            freq: 250.0 + rng.random::<f32>() * 300.0 * intensity,
            waveform: Waveform::Sawtooth,
            start: 0.0,
            peak: 0.6 * intensity,
            attack: 0.01,
            release: 0.22,
            floor: 0.001,
            stop: 0.25,
        }],
        GameEvent::WallHit => vec![Tone {
            freq: 100.0 + rng.random::<f32>() * 80.0,
            waveform: Waveform::Triangle,
            start: 0.0,
            peak: 0.35,
            attack: 0.01,
            release: 0.18,
            floor: 0.0001,
            stop: 0.2,
        }],
        GameEvent::Score { .. } => [220.0, 330.0, 440.0]
            .iter()
            .enumerate()
            .map(|(i, &freq)| {
                let start = i as f64 * 0.06;
                Tone {
                    freq,
                    waveform: Waveform::Sine,
                    start,
                    peak: 0.6,
                    attack: start + 0.01,
                    release: start + 0.26,
                    floor: 0.0001,
                    stop: start + 0.26,
                }
            })
            .collect(),
        GameEvent::Serve { .. } => Vec::new(),
    }
}

#[cfg(target_arch = "wasm32")]
pub use player::AudioManager;

#[cfg(target_arch = "wasm32")]
mod player {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorType};

    use super::{Tone, Waveform, recipe};
    use crate::sim::GameEvent;

    /// Web Audio playback for game events
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        rng: Pcg32,
    }

    impl AudioManager {
        pub fn new(seed: u64) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: 0.9,
                rng: Pcg32::seed_from_u64(seed),
            }
        }

        /// Resume a suspended context (needs a user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                if ctx.state() == AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }
        }

        /// Suspend playback entirely (sound toggled off)
        pub fn suspend(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.suspend();
            }
        }

        /// Output gain (0.0 - 1.0); 0 silences every event
        pub fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
        }

        /// Play the sound for a game event; never blocks
        pub fn play(&mut self, event: &GameEvent) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            let tones = recipe(event, &mut self.rng);
            if tones.is_empty() {
                return;
            }
            let Some(master) = master_gain(ctx, self.volume) else {
                return;
            };
            for tone in &tones {
                play_tone(ctx, &master, tone);
            }
        }
    }

    fn master_gain(ctx: &AudioContext, volume: f32) -> Option<GainNode> {
        let gain = ctx.create_gain().ok()?;
        gain.gain().set_value(volume);
        gain.connect_with_audio_node(&ctx.destination()).ok()?;
        Some(gain)
    }

    fn play_tone(ctx: &AudioContext, master: &GainNode, tone: &Tone) -> Option<()> {
        let osc = ctx.create_oscillator().ok()?;
        let env = ctx.create_gain().ok()?;
        osc.set_type(match tone.waveform {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Triangle => OscillatorType::Triangle,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
        });
        osc.frequency().set_value(tone.freq);

        let t = ctx.current_time();
        let gain = env.gain();
        gain.set_value_at_time(0.0001, t + tone.start).ok()?;
        gain.exponential_ramp_to_value_at_time(tone.peak.max(0.0001), t + tone.attack)
            .ok()?;
        gain.exponential_ramp_to_value_at_time(tone.floor, t + tone.release)
            .ok()?;

        osc.connect_with_audio_node(&env).ok()?;
        env.connect_with_audio_node(master).ok()?;
        osc.start_with_when(t + tone.start).ok()?;
        osc.stop_with_when(t + tone.stop).ok()?;
        Some(())
    }
}
