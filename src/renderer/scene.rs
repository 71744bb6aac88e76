//! Scene assembly
//!
//! Turns a `GameState` into one triangle list in world coordinates, back to
//! front: playfield, bursts, victim, mosquitoes.

use glam::Vec2;
use std::f32::consts::PI;

use super::shapes::{arc_band, circle, ellipse, rect, ring, segment};
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::{GameState, Mosquito, Victim};

/// Maximum shake offset in world units
const SHAKE_AMPLITUDE: f32 = 8.0;

/// Build the full frame
pub fn build(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let segments = settings.quality.circle_segments();
    let mut vertices = Vec::with_capacity(4096);

    vertices.extend(rect(
        Vec2::ZERO,
        Vec2::new(state.bounds.width, state.bounds.height),
        colors::FIELD,
    ));

    push_particles(&mut vertices, state, settings.max_particles());
    push_victim(&mut vertices, &state.victim, segments);

    // Wing flap phase from the tick counter so paused frames hold still
    let flap = (state.time_ticks as f32 * 0.9).sin();
    for mosquito in &state.mosquitoes {
        push_mosquito(&mut vertices, mosquito, flap, segments);
    }

    if settings.effective_screen_shake() && state.screen_shake > 0.0 {
        let t = state.time_ticks as f32;
        let offset = Vec2::new((t * 1.7).sin(), (t * 2.3).cos())
            * state.screen_shake
            * SHAKE_AMPLITUDE;
        for v in vertices.iter_mut() {
            v.position[0] += offset.x;
            v.position[1] += offset.y;
        }
    }

    vertices
}

fn push_particles(out: &mut Vec<Vertex>, state: &GameState, max_particles: usize) {
    let particles = state
        .emitters
        .iter()
        .flat_map(|e| e.particles.iter())
        .take(max_particles);

    for p in particles {
        let [r, g, b] = colors::BLOOD;
        let color = [r, g, b, p.life.clamp(0.0, 1.0)];
        let radius = (p.size * (0.4 + 0.6 * p.life)).max(0.5);
        out.extend(circle(p.pos, radius, color, 6));
    }
}

fn push_victim(out: &mut Vec<Vertex>, victim: &Victim, segments: u32) {
    let c = victim.body.pos;
    let r = victim.body.radius;
    let face = if victim.alive {
        colors::FACE
    } else {
        colors::FACE_DEAD
    };

    out.extend(circle(c, r, face, segments));
    out.extend(ring(c, r * 0.92, r, colors::FACE_OUTLINE, segments));

    let eye_l = c + Vec2::new(-r * 0.35, -r * 0.25);
    let eye_r = c + Vec2::new(r * 0.35, -r * 0.25);

    if victim.alive {
        out.extend(circle(eye_l, r * 0.12, colors::FEATURES, 8));
        out.extend(circle(eye_r, r * 0.12, colors::FEATURES, 8));
        // Smile: lower half of a circle (y down)
        out.extend(arc_band(
            c + Vec2::new(0.0, r * 0.05),
            r * 0.48,
            r * 0.58,
            0.15 * PI,
            0.85 * PI,
            colors::FEATURES,
            segments / 2,
        ));
    } else {
        let k = r * 0.12;
        for eye in [eye_l, eye_r] {
            out.extend(segment(eye - Vec2::splat(k), eye + Vec2::splat(k), r * 0.07, colors::FEATURES));
            out.extend(segment(
                eye + Vec2::new(-k, k),
                eye + Vec2::new(k, -k),
                r * 0.07,
                colors::FEATURES,
            ));
        }
        // Frown: upper half of a circle centered below the face midline
        out.extend(arc_band(
            c + Vec2::new(0.0, r * 0.6),
            r * 0.3,
            r * 0.4,
            -0.85 * PI,
            -0.15 * PI,
            colors::FEATURES,
            segments / 2,
        ));
    }
}

fn push_mosquito(out: &mut Vec<Vertex>, mosquito: &Mosquito, flap: f32, segments: u32) {
    let body = &mosquito.body;
    let heading = body.heading();
    let forward = Vec2::from_angle(heading);
    let side = forward.perp();
    let r = body.radius;

    // Wings behind the body, flapping
    let wing_len = r * (0.7 + 0.25 * flap);
    for s in [-1.0, 1.0] {
        let wing_center = body.pos + side * (s * r * 0.6) - forward * (r * 0.15);
        out.extend(ellipse(
            wing_center,
            wing_len,
            r * 0.3,
            heading + s * PI / 2.0,
            colors::MOSQUITO_WING,
            segments / 2,
        ));
    }

    // Thorax and abdomen
    out.extend(ellipse(
        body.pos - forward * (r * 0.35),
        r * 0.55,
        r * 0.28,
        heading,
        colors::MOSQUITO_BODY,
        segments / 2,
    ));
    out.extend(circle(body.pos + forward * (r * 0.25), r * 0.3, colors::MOSQUITO_BODY, 8));

    // Proboscis
    out.extend(segment(
        body.pos + forward * (r * 0.5),
        body.pos + forward * (r * 1.2),
        r * 0.1,
        colors::PROBOSCIS,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_empty_field_draws_background_and_victim() {
        let state = GameState::new(1, &Tuning::default());
        let verts = build(&state, &Settings::default());
        assert!(verts.len() > 6);
        assert_eq!(verts.len() % 3, 0);
    }

    #[test]
    fn test_mosquitoes_add_geometry() {
        let mut state = GameState::new(1, &Tuning::default());
        let before = build(&state, &Settings::default()).len();
        state.spawn_mosquito();
        let after = build(&state, &Settings::default()).len();
        assert!(after > before);
    }

    #[test]
    fn test_particle_cap_respected() {
        let mut state = GameState::new(1, &Tuning::default());
        state.emit_burst(Vec2::new(100.0, 100.0));
        let with = build(&state, &Settings::default()).len();
        let without = build(
            &state,
            &Settings {
                particles: false,
                ..Settings::default()
            },
        )
        .len();
        // Each particle is a 6-segment circle
        assert_eq!(with - without, state.particle_count() * 18);
    }
}
