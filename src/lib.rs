//! Mozzie Swat - swat the mosquitoes before they sting the smiley
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, pool, steering, bursts, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Victim sprite radius
    pub const VICTIM_RADIUS: f32 = 24.0;
    /// Mosquito sprite radius (hit area is slightly generous)
    pub const MOSQUITO_RADIUS: f32 = 10.0;
    /// Extra pointer slop added to mosquito hit tests
    pub const TOUCH_SLOP: f32 = 6.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector pointing along `angle` (screen coordinates, y down)
#[inline]
pub fn heading_vec(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Shortest signed angular difference from `from` to `to`
#[inline]
pub fn angle_delta(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}
