//! World <-> screen mapping
//!
//! The world rectangle is letterboxed into the canvas, centered, with uniform
//! scale. World y points down like canvas pixels; NDC y points up.

use glam::Vec2;

use crate::sim::WorldBounds;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Canvas size in the same units as the pointer coordinates
    pub canvas: Vec2,
    pub world: WorldBounds,
}

impl Viewport {
    pub fn new(canvas_width: f32, canvas_height: f32, world: WorldBounds) -> Self {
        Self {
            canvas: Vec2::new(canvas_width, canvas_height),
            world,
        }
    }

    /// Canvas units per world unit
    pub fn scale(&self) -> f32 {
        if self.world.width <= 0.0 || self.world.height <= 0.0 {
            return 1.0;
        }
        (self.canvas.x / self.world.width).min(self.canvas.y / self.world.height)
    }

    /// Convert a world position to normalized device coordinates
    pub fn world_to_ndc(&self, p: Vec2) -> Vec2 {
        let half = self.canvas / 2.0;
        if half.x <= 0.0 || half.y <= 0.0 {
            return Vec2::ZERO;
        }
        let offset = (p - self.world.center()) * self.scale();
        Vec2::new(offset.x / half.x, -offset.y / half.y)
    }

    /// Convert a canvas position (e.g. a mouse offset) to a world position
    pub fn screen_to_world(&self, p: Vec2) -> Vec2 {
        (p - self.canvas / 2.0) / self.scale() + self.world.center()
    }
}
