//! Collision helpers for grid and plane actors
//!
//! Pickups and actor contact use proximity thresholds rather than exact
//! equality so that sub-cell movement speeds still register.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Horizontal velocity imparted per pixel of paddle impact offset
pub const ENGLISH_FACTOR: f32 = 0.15;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict interior test (points on the border are outside)
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x > self.min.x && p.x < max.x && p.y > self.min.y && p.y < max.y
    }

    /// Strict horizontal span test
    pub fn spans_x(&self, x: f32) -> bool {
        x > self.min.x && x < self.max().x
    }
}

/// Reflect velocity off a surface with the given unit normal
#[inline]
pub fn reflect_velocity(vel: Vec2, normal: Vec2) -> Vec2 {
    vel - 2.0 * vel.dot(normal) * normal
}

/// Horizontal velocity after a paddle bounce
///
/// Linear in the impact offset from the paddle centre, so it is continuous,
/// monotonic and carries the offset's sign.
#[inline]
pub fn paddle_english(offset: f32) -> f32 {
    offset * ENGLISH_FACTOR
}

/// Manhattan distance in the plane
#[inline]
pub fn manhattan(a: Vec2, b: Vec2) -> f32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Manhattan distance between grid cells
#[inline]
pub fn grid_manhattan(a: IVec2, b: IVec2) -> i32 {
    (a - b).abs().element_sum()
}

/// Whether `pos` is within `tolerance` of `center` on both axes
#[inline]
pub fn near_center(pos: Vec2, center: Vec2, tolerance: f32) -> bool {
    (pos.x - center.x).abs() < tolerance && (pos.y - center.y).abs() < tolerance
}
