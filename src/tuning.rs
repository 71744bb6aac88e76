//! Data-driven game balance
//!
//! Every gameplay number lives here so balance changes never touch the
//! simulation code. The shipped values come from `assets/tuning.json`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::SIM_DT;
use crate::sim::{BurstConfig, WorldBounds};

/// Shipped balance file
const BUILTIN_TUNING: &str = include_str!("../assets/tuning.json");

/// Reasons a tuning file is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("world size must be positive, got {width}x{height}")]
    WorldSize { width: f32, height: f32 },
    #[error("mosquito capacity must be at least 1")]
    ZeroCapacity,
    #[error("{name} range is inverted: {min} > {max}")]
    InvertedRange { name: &'static str, min: f32, max: f32 },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must be at least one tick ({min}s), got {value}")]
    BelowTick { name: &'static str, value: f32, min: f32 },
    #[error("burst must emit at least one particle")]
    EmptyBurst,
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world_width: f32,
    pub world_height: f32,
    /// Downward acceleration for bodies that opt into gravity (px/s²)
    pub gravity_y: f32,

    // === Victim ===
    pub victim_bounce: f32,
    /// Deceleration applied to the victim (px/s²)
    pub victim_drag: f32,
    /// Speed of the impulse given when the player pokes the victim
    pub repel_speed: f32,
    /// Roaming impulse speed; 0 keeps the victim stationary
    pub victim_wander_speed: f32,
    /// Seconds between roaming impulses
    pub victim_wander_period: f32,

    // === Mosquitoes ===
    pub mosquito_capacity: usize,
    /// Seconds between spawn attempts
    pub spawn_period: f32,
    pub mosquito_speed_min: f32,
    pub mosquito_speed_max: f32,
    /// Random heading wobble range (rad/s), picked per mosquito
    pub turn_rate_min: f32,
    pub turn_rate_max: f32,
    /// Maximum correction toward the victim (rad/s)
    pub homing: f32,

    // === Scoring ===
    pub score_per_kill: u64,

    // === Effects ===
    pub burst: BurstConfig,
    /// Screen shake added when the victim is stung (0-1)
    pub sting_shake: f32,

    // === Autoplay ===
    /// Autoplay only swats mosquitoes this close to the victim
    pub autoplay_reach: f32,
    /// Seconds between autoplay swats
    pub autoplay_cooldown: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            gravity_y: 300.0,

            victim_bounce: 0.2,
            victim_drag: 300.0,
            repel_speed: 300.0,
            victim_wander_speed: 0.0,
            victim_wander_period: 2.5,

            mosquito_capacity: 10,
            spawn_period: 1.5,
            mosquito_speed_min: 60.0,
            mosquito_speed_max: 110.0,
            turn_rate_min: 1.5,
            turn_rate_max: 4.0,
            homing: 0.9,

            score_per_kill: 10,

            burst: BurstConfig::default(),
            sting_shake: 1.0,

            autoplay_reach: 160.0,
            autoplay_cooldown: 0.35,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning file
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// The shipped balance, or defaults if it fails to load
    pub fn builtin() -> Self {
        match Self::from_json(BUILTIN_TUNING) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Built-in tuning rejected ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(TuningError::WorldSize {
                width: self.world_width,
                height: self.world_height,
            });
        }
        if self.mosquito_capacity == 0 {
            return Err(TuningError::ZeroCapacity);
        }
        check_range("mosquito speed", self.mosquito_speed_min, self.mosquito_speed_max)?;
        check_range("turn rate", self.turn_rate_min, self.turn_rate_max)?;
        check_range("burst speed", self.burst.speed_min, self.burst.speed_max)?;
        check_period("spawn_period", self.spawn_period)?;
        check_positive("mosquito_speed_min", self.mosquito_speed_min)?;
        check_positive("burst.lifespan", self.burst.lifespan)?;
        if self.victim_wander_speed > 0.0 {
            check_period("victim_wander_period", self.victim_wander_period)?;
        }
        if self.burst.count == 0 {
            return Err(TuningError::EmptyBurst);
        }
        Ok(())
    }

    pub fn bounds(&self) -> WorldBounds {
        WorldBounds::new(self.world_width, self.world_height)
    }
}

fn check_range(name: &'static str, min: f32, max: f32) -> Result<(), TuningError> {
    if min > max {
        Err(TuningError::InvertedRange { name, min, max })
    } else {
        Ok(())
    }
}

fn check_positive(name: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NotPositive { name, value })
    }
}

/// Timer periods shorter than a simulation tick would fire several times per tick
fn check_period(name: &'static str, value: f32) -> Result<(), TuningError> {
    check_positive(name, value)?;
    if value < SIM_DT {
        Err(TuningError::BelowTick {
            name,
            value,
            min: SIM_DT,
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tuning_is_valid() {
        let tuning = Tuning::from_json(BUILTIN_TUNING).expect("shipped tuning should parse");
        assert_eq!(tuning.mosquito_capacity, 10);
        assert_eq!(tuning.world_width, 800.0);
        assert_eq!(tuning.world_height, 600.0);
    }

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning = Tuning::from_json(r#"{ "score_per_kill": 25 }"#).unwrap();
        assert_eq!(tuning.score_per_kill, 25);
        assert_eq!(tuning.mosquito_capacity, Tuning::default().mosquito_capacity);
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = Tuning::from_json(r#"{ "mosquito_capacity": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::ZeroCapacity));
    }

    #[test]
    fn test_rejects_inverted_turn_rate() {
        let err = Tuning::from_json(r#"{ "turn_rate_min": 5.0, "turn_rate_max": 1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::InvertedRange { name: "turn rate", .. }));
    }

    #[test]
    fn test_rejects_empty_burst() {
        let err = Tuning::from_json(r#"{ "burst": { "count": 0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::EmptyBurst));
    }

    #[test]
    fn test_rejects_sub_tick_periods() {
        let err = Tuning::from_json(r#"{ "spawn_period": 1e-12 }"#).unwrap_err();
        assert!(matches!(err, TuningError::BelowTick { name: "spawn_period", .. }));

        let err = Tuning::from_json(r#"{ "victim_wander_speed": 50.0, "victim_wander_period": 0.001 }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TuningError::BelowTick {
                name: "victim_wander_period",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "spawn_period": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::NotPositive { .. }));

        assert!(Tuning::from_json(r#"{ "spawn_period": 0.01 }"#).is_ok());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
