//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (pool order = spawn order)
//! - No rendering or platform dependencies

pub mod body;
pub mod emitter;
pub mod pool;
pub mod state;
pub mod steering;
pub mod tick;
pub mod timer;

pub use body::{Body, WorldBounds};
pub use emitter::{BurstConfig, Emitter, Particle};
pub use pool::Pool;
pub use state::{GameEvent, GamePhase, GameState, Mosquito, Victim};
pub use steering::{random_turn, steer};
pub use tick::{TickInput, tick};
pub use timer::RepeatTimer;
