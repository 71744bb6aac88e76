//! Mosquito steering
//!
//! Each tick a mosquito's heading wobbles by a small random delta scaled by
//! its own turn rate, then bends toward its target by a bounded amount.

use glam::Vec2;
use rand::Rng;

use super::body::Body;
use crate::angle_delta;

/// Uniform random heading delta in `[-turn_rate * dt, turn_rate * dt]`
pub fn random_turn<R: Rng + ?Sized>(rng: &mut R, turn_rate: f32, dt: f32) -> f32 {
    let max = turn_rate * dt;
    if max <= 0.0 {
        return 0.0;
    }
    rng.random_range(-max..=max)
}

/// Wobble the body's heading and bend it toward `target`.
///
/// `homing` is the maximum correction toward the target in rad/s. Speed is
/// preserved; a body at rest is left alone.
pub fn steer<R: Rng + ?Sized>(
    body: &mut Body,
    target: Vec2,
    turn_rate: f32,
    homing: f32,
    rng: &mut R,
    dt: f32,
) {
    if body.vel == Vec2::ZERO {
        return;
    }

    let mut heading = body.heading() + random_turn(rng, turn_rate, dt);

    let to_target = target - body.pos;
    if homing > 0.0 && to_target != Vec2::ZERO {
        let desired = to_target.y.atan2(to_target.x);
        let max_correction = homing * dt;
        heading += angle_delta(heading, desired).clamp(-max_correction, max_correction);
    }

    body.set_heading(heading);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_turn_bounded() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let d = random_turn(&mut rng, 2.0, 0.1);
            assert!(d.abs() <= 0.2 + 1e-6);
        }
        assert_eq!(random_turn(&mut rng, 0.0, 0.1), 0.0);
    }

    #[test]
    fn test_steer_preserves_speed() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut body = Body::new(Vec2::new(100.0, 100.0), 5.0).with_velocity(Vec2::new(80.0, 0.0));
        for _ in 0..100 {
            steer(&mut body, Vec2::new(400.0, 300.0), 3.0, 1.0, &mut rng, 1.0 / 60.0);
        }
        assert!((body.speed() - 80.0).abs() < 1e-2);
    }

    #[test]
    fn test_homing_turns_toward_target() {
        let mut rng = Pcg32::seed_from_u64(3);
        // Flying right, target straight below: no wobble, strong homing
        let mut body = Body::new(Vec2::new(0.0, 0.0), 5.0).with_velocity(Vec2::new(50.0, 0.0));
        steer(&mut body, Vec2::new(0.0, 100.0), 0.0, 1.0, &mut rng, 0.5);
        assert!((body.heading() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_resting_body_untouched() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut body = Body::new(Vec2::new(10.0, 10.0), 5.0);
        steer(&mut body, Vec2::new(0.0, 100.0), 5.0, 5.0, &mut rng, 0.5);
        assert_eq!(body.vel, Vec2::ZERO);
    }
}
