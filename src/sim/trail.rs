//! Ball trail ring buffer

use std::collections::VecDeque;

use glam::Vec2;
use serde::Serialize;

/// Recent ball positions, newest first
#[derive(Debug, Clone, Serialize)]
pub struct TrailBuffer {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl TrailBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a position, evicting the oldest once full
    pub fn push(&mut self, pos: Vec2) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_back();
        }
        self.points.push_front(pos);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Positions from newest to oldest
    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }

    /// Recency weight of entry `index`: 1.0 for the newest, falling toward 0
    pub fn fade(&self, index: usize) -> f32 {
        if self.points.is_empty() {
            return 0.0;
        }
        1.0 - index as f32 / self.points.len() as f32
    }
}
