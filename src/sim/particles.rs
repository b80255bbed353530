//! Particle bursts for hits and points
//!
//! Particles live in a fixed-capacity arena. Dead slots go on a free list and
//! are reused; when every slot is live the earliest-spawned particle is overwritten.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use crate::consts::*;

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color(pub u32);

impl Color {
    /// Ball, trail and default spark color
    pub const GLOW: Color = Color(0xe6f0ff);
    pub const WALL_SPARK: Color = Color(0x9be7ff);
    pub const PADDLE_SPARK: Color = Color(0xdbeafe);
    /// Burst on the left side when the player loses a point
    pub const LEFT_LOST: Color = Color(0xff9b9b);
    /// Burst on the right side when the AI loses a point
    pub const RIGHT_LOST: Color = Color(0x9bffce);

    pub fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn b(self) -> u8 {
        self.0 as u8
    }

    /// CSS color string with the given alpha
    pub fn css_rgba(self, alpha: f32) -> String {
        format!("rgba({},{},{},{:.3})", self.r(), self.g(), self.b(), alpha)
    }
}

/// A single particle
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left to live
    pub life: i32,
    pub color: Color,
    pub size: f32,
}

impl Particle {
    /// Advance one tick: move, fall, drag, age, shrink
    pub fn step(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.vel *= PARTICLE_DRAG;
        self.life -= 1;
        self.size *= PARTICLE_SHRINK;
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.life <= 0 || self.size <= PARTICLE_MIN_SIZE
    }
}

/// Fixed-capacity particle pool
#[derive(Debug, Clone, Serialize)]
pub struct ParticleSystem {
    slots: Vec<Option<Particle>>,
    /// Spawn order of each slot's particle; the smallest live stamp is the oldest
    #[serde(skip)]
    stamps: Vec<u64>,
    #[serde(skip)]
    free: Vec<usize>,
    capacity: usize,
    #[serde(skip)]
    next_stamp: u64,
    live: usize,
}

impl ParticleSystem {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            stamps: Vec::with_capacity(capacity),
            free: Vec::new(),
            capacity,
            next_stamp: 0,
            live: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the pool size. Shrinking keeps the newest `capacity` live particles.
    pub fn set_capacity(&mut self, capacity: usize) {
        if capacity == self.capacity {
            return;
        }
        let mut survivors: Vec<(u64, Particle)> = self
            .stamps
            .drain(..)
            .zip(self.slots.drain(..))
            .filter_map(|(stamp, slot)| slot.map(|p| (stamp, p)))
            .collect();
        survivors.sort_by_key(|(stamp, _)| *stamp);
        let skip = survivors.len().saturating_sub(capacity);
        for (stamp, particle) in survivors.into_iter().skip(skip) {
            self.stamps.push(stamp);
            self.slots.push(Some(particle));
        }
        self.live = self.slots.len();
        self.free.clear();
        self.capacity = capacity;
        log::debug!("Particle pool resized to {}", capacity);
    }

    /// Number of live particles
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().flatten()
    }

    /// Insert a particle, reusing a free slot or evicting the oldest
    pub fn spawn(&mut self, particle: Particle) {
        let stamp = self.next_stamp;
        if let Some(index) = self.free.pop() {
            self.slots[index] = Some(particle);
            self.stamps[index] = stamp;
            self.live += 1;
        } else if self.slots.len() < self.capacity {
            self.slots.push(Some(particle));
            self.stamps.push(stamp);
            self.live += 1;
        } else if let Some(index) = self.oldest_slot() {
            self.slots[index] = Some(particle);
            self.stamps[index] = stamp;
        } else {
            return;
        }
        self.next_stamp += 1;
    }

    /// Index of the earliest-spawned live particle
    fn oldest_slot(&self) -> Option<usize> {
        self.slots
            .iter()
            .zip(&self.stamps)
            .enumerate()
            .filter(|(_, (slot, _))| slot.is_some())
            .min_by_key(|(_, (_, stamp))| **stamp)
            .map(|(index, _)| index)
    }

    /// Spawn `count` particles flying out of `origin` in random directions
    pub fn spawn_burst<R: Rng>(&mut self, origin: Vec2, count: usize, color: Color, rng: &mut R) {
        for _ in 0..count {
            let angle = rng.random_range(0.0..TAU);
            let speed = rng.random_range(0.8..4.0);
            self.spawn(Particle {
                pos: origin,
                vel: Vec2::new(
                    angle.cos() * speed,
                    angle.sin() * speed - PARTICLE_UPWARD_BIAS,
                ),
                life: rng.random_range(18..=46),
                color,
                size: rng.random_range(1.0..4.0),
            });
        }
    }

    /// Step every particle and free the dead ones
    pub fn update(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(particle) = slot else { continue };
            particle.step();
            if particle.is_dead() {
                *slot = None;
                self.free.push(index);
                self.live -= 1;
            }
        }
    }
}
