//! Axis-aligned rectangle geometry
//!
//! Every movable entity and every wall is a `Rect` stored as a center plus
//! half-extents, in screen coordinates (y grows downward):
//! - left/right: center.x ∓ half.x
//! - top/bottom: center.y ∓ half.y

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    /// Half width and half height
    pub half: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    /// Square rectangle of side `size` centred on `center`
    pub fn square(center: Vec2, size: f32) -> Self {
        Self::new(center, Vec2::splat(size / 2.0))
    }

    /// Rectangle from its top-left corner and size
    pub fn from_top_left(x: f32, y: f32, width: f32, height: f32) -> Self {
        let half = Vec2::new(width / 2.0, height / 2.0);
        Self::new(Vec2::new(x, y) + half, half)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.half.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.half.y
    }

    pub fn width(&self) -> f32 {
        self.half.x * 2.0
    }

    pub fn height(&self) -> f32 {
        self.half.y * 2.0
    }

    /// Move the rectangle by `delta`
    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Copy of the rectangle moved by `delta`
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.center + delta, self.half)
    }

    /// Check if a point lies inside (edges included)
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }
}
