//! Arcade physics bodies
//!
//! Circle bodies with velocity integration, optional gravity, linear drag and
//! bounce against the world rectangle. World coordinates have the origin at
//! the top-left corner with y pointing down, like the canvas.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::heading_vec;

/// The playable rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.y >= 0.0 && point.x <= self.width && point.y <= self.height
    }
}

/// A circular arcade body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Fraction of velocity kept when bouncing off a wall (0 = stop, 1 = elastic)
    pub bounce: f32,
    /// Linear deceleration in px/s², applied against the direction of travel
    pub drag: f32,
    /// Whether world gravity pulls on this body
    pub gravity: bool,
    pub collide_world_bounds: bool,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            bounce: 0.0,
            drag: 0.0,
            gravity: false,
            collide_world_bounds: true,
        }
    }

    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = bounce;
        self
    }

    pub fn with_drag(mut self, drag: f32) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Advance one step. Returns true if the body hit a world edge.
    pub fn integrate(&mut self, dt: f32, gravity_y: f32, bounds: &WorldBounds) -> bool {
        if self.gravity {
            self.vel.y += gravity_y * dt;
        }

        if self.drag > 0.0 {
            let speed = self.vel.length();
            let reduced = (speed - self.drag * dt).max(0.0);
            self.vel = if reduced > 0.0 {
                self.vel * (reduced / speed)
            } else {
                Vec2::ZERO
            };
        }

        self.pos += self.vel * dt;

        if self.collide_world_bounds {
            self.resolve_bounds(bounds)
        } else {
            false
        }
    }

    fn resolve_bounds(&mut self, bounds: &WorldBounds) -> bool {
        let mut hit = false;
        let (min_x, max_x) = (self.radius, (bounds.width - self.radius).max(self.radius));
        let (min_y, max_y) = (self.radius, (bounds.height - self.radius).max(self.radius));

        if self.pos.x < min_x {
            self.pos.x = min_x;
            self.vel.x = self.vel.x.abs() * self.bounce;
            hit = true;
        } else if self.pos.x > max_x {
            self.pos.x = max_x;
            self.vel.x = -self.vel.x.abs() * self.bounce;
            hit = true;
        }

        if self.pos.y < min_y {
            self.pos.y = min_y;
            self.vel.y = self.vel.y.abs() * self.bounce;
            hit = true;
        } else if self.pos.y > max_y {
            self.pos.y = max_y;
            self.vel.y = -self.vel.y.abs() * self.bounce;
            hit = true;
        }

        hit
    }

    /// Point hit-test, with optional extra slop for fat fingers
    pub fn contains(&self, point: Vec2, slop: f32) -> bool {
        let r = self.radius + slop;
        self.pos.distance_squared(point) <= r * r
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        let r = self.radius + other.radius;
        self.pos.distance_squared(other.pos) <= r * r
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Direction of travel in radians (0 when at rest)
    pub fn heading(&self) -> f32 {
        if self.vel == Vec2::ZERO {
            0.0
        } else {
            self.vel.y.atan2(self.vel.x)
        }
    }

    /// Point the velocity along `angle`, keeping the current speed
    pub fn set_heading(&mut self, angle: f32) {
        self.vel = heading_vec(angle) * self.speed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: WorldBounds = WorldBounds {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn test_integrate_moves_by_velocity() {
        let mut body = Body::new(Vec2::new(100.0, 100.0), 5.0).with_velocity(Vec2::new(60.0, 0.0));
        let hit = body.integrate(0.5, 300.0, &BOUNDS);
        assert!(!hit);
        assert!((body.pos.x - 130.0).abs() < 1e-4);
        assert_eq!(body.pos.y, 100.0);
    }

    #[test]
    fn test_gravity_only_when_enabled() {
        let mut floating = Body::new(Vec2::new(100.0, 100.0), 5.0);
        floating.integrate(0.1, 300.0, &BOUNDS);
        assert_eq!(floating.vel, Vec2::ZERO);

        let mut falling = Body::new(Vec2::new(100.0, 100.0), 5.0);
        falling.gravity = true;
        falling.integrate(0.1, 300.0, &BOUNDS);
        assert!((falling.vel.y - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_drag_never_reverses() {
        let mut body = Body::new(Vec2::new(400.0, 300.0), 5.0)
            .with_velocity(Vec2::new(100.0, 0.0))
            .with_drag(300.0);
        body.integrate(0.1, 0.0, &BOUNDS);
        assert!((body.vel.x - 70.0).abs() < 1e-3);
        body.integrate(1.0, 0.0, &BOUNDS);
        assert_eq!(body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_bounce_off_right_wall() {
        let mut body = Body::new(Vec2::new(790.0, 300.0), 10.0)
            .with_velocity(Vec2::new(200.0, 0.0))
            .with_bounce(0.5);
        let hit = body.integrate(0.1, 0.0, &BOUNDS);
        assert!(hit);
        assert_eq!(body.pos.x, 790.0);
        assert!((body.vel.x - (-100.0)).abs() < 1e-4);
    }

    #[test]
    fn test_unbounded_body_leaves_world() {
        let mut body = Body::new(Vec2::new(5.0, 5.0), 2.0).with_velocity(Vec2::new(-100.0, 0.0));
        body.collide_world_bounds = false;
        assert!(!body.integrate(0.1, 0.0, &BOUNDS));
        assert!(body.pos.x < 0.0);
    }

    #[test]
    fn test_hit_tests() {
        let a = Body::new(Vec2::new(0.0, 0.0), 10.0);
        let b = Body::new(Vec2::new(15.0, 0.0), 6.0);
        assert!(a.overlaps(&b));
        assert!(a.contains(Vec2::new(10.0, 0.0), 0.0));
        assert!(!a.contains(Vec2::new(12.0, 0.0), 0.0));
        assert!(a.contains(Vec2::new(12.0, 0.0), 3.0));
    }

    #[test]
    fn test_set_heading_keeps_speed() {
        let mut body = Body::new(Vec2::ZERO, 1.0).with_velocity(Vec2::new(3.0, 4.0));
        body.set_heading(std::f32::consts::FRAC_PI_2);
        assert!((body.speed() - 5.0).abs() < 1e-4);
        assert!(body.vel.x.abs() < 1e-4);
        assert!((body.heading() - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }
}
