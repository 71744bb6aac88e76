//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::state::{GamePhase, GameState};
use super::steering::steer;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Click/tap position in world coordinates
    pub pointer: Option<Vec2>,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - the game swats for the player
    pub autoplay: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            GamePhase::GameOver => {}
        }
    }

    match state.phase {
        GamePhase::Paused => return,
        GamePhase::GameOver => {
            // Nothing left to defend; let the mosquitoes buzz and the blood settle
            state.time_ticks += 1;
            decay_shake(state);
            move_mosquitoes(state, dt);
            state.update_emitters(dt);
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    decay_shake(state);

    // Pointer: a swat takes priority over poking the victim
    let pointer = if input.autoplay && input.pointer.is_none() {
        autoplay_pointer(state, dt)
    } else {
        input.pointer
    };
    if let Some(point) = pointer {
        if !state.swat_at(point) {
            state.repel_victim(point);
        }
    }

    // Spawn timer; attempts past the free slots would all be rejected
    let spawns = state.spawn_timer.advance(dt);
    let free = state.mosquitoes.free_slots();
    if spawns as usize > free {
        log::trace!("{} spawns skipped, pool full", spawns as usize - free);
    }
    for _ in 0..(spawns as usize).min(free) {
        state.spawn_mosquito();
    }

    // Roaming victim: at most one kick per tick
    if state.tuning.victim_wander_speed > 0.0 && state.wander_timer.advance(dt) > 0 {
        state.wander_victim();
    }

    move_mosquitoes(state, dt);

    let bounds = state.bounds;
    let gravity_y = state.tuning.gravity_y;
    state.victim.body.integrate(dt, gravity_y, &bounds);

    // Sting check
    if state.victim.alive {
        let victim = &state.victim.body;
        if let Some(index) = state.mosquitoes.iter().position(|m| m.body.overlaps(victim)) {
            state.sting(index);
        }
    }

    state.update_emitters(dt);
}

/// Steer and integrate every live mosquito
fn move_mosquitoes(state: &mut GameState, dt: f32) {
    let bounds = state.bounds;
    let gravity_y = state.tuning.gravity_y;
    let target = state.victim.body.pos;
    let homing = if state.victim.alive {
        state.tuning.homing
    } else {
        0.0
    };

    for mosquito in state.mosquitoes.iter_mut() {
        steer(
            &mut mosquito.body,
            target,
            mosquito.turn_rate,
            homing,
            &mut state.rng,
            dt,
        );
        mosquito.body.integrate(dt, gravity_y, &bounds);
    }
}

fn decay_shake(state: &mut GameState) {
    state.screen_shake *= 0.92;
    if state.screen_shake < 0.01 {
        state.screen_shake = 0.0;
    }
}

/// Pick a swat target for demo mode: the mosquito closest to the victim, once
/// it is within reach and the cooldown has elapsed
fn autoplay_pointer(state: &mut GameState, dt: f32) -> Option<Vec2> {
    state.autoplay_cooldown = (state.autoplay_cooldown - dt).max(0.0);
    if state.autoplay_cooldown > 0.0 {
        return None;
    }

    let victim_pos = state.victim.body.pos;
    let reach = state.tuning.autoplay_reach;
    let target = state
        .mosquitoes
        .iter()
        .map(|m| (m.body.pos, m.body.pos.distance(victim_pos)))
        .filter(|(_, dist)| *dist <= reach)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(pos, _)| pos)?;

    state.autoplay_cooldown = state.tuning.autoplay_cooldown;
    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::body::Body;
    use crate::sim::state::{GameEvent, Mosquito};
    use crate::tuning::Tuning;

    fn new_state() -> GameState {
        GameState::new(12345, &Tuning::default())
    }

    fn place_mosquito(state: &mut GameState, pos: Vec2, vel: Vec2) -> u32 {
        let id = state.next_entity_id();
        state.mosquitoes.spawn(Mosquito {
            id,
            body: Body::new(pos, MOSQUITO_RADIUS).with_velocity(vel),
            turn_rate: 0.0,
        });
        id
    }

    #[test]
    fn test_spawn_timer_fills_pool() {
        let mut state = new_state();
        let input = TickInput::default();

        // Spawn period is 1.5s = 180 ticks
        for _ in 0..170 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.mosquitoes.len(), 0);

        for _ in 0..20 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.mosquitoes.len(), 1);
    }

    #[test]
    fn test_sub_tick_spawn_period_stays_bounded() {
        // GameState::new does not validate, so guard tick itself
        let tuning = Tuning {
            spawn_period: 1e-12,
            ..Tuning::default()
        };
        let mut state = GameState::new(7, &tuning);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.mosquitoes.len(), state.mosquitoes.capacity());

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.mosquitoes.len(), state.mosquitoes.capacity());
    }

    #[test]
    fn test_victim_roams_after_wander_period() {
        let tuning = Tuning {
            victim_wander_speed: 80.0,
            victim_wander_period: 0.5,
            ..Tuning::default()
        };
        let mut state = GameState::new(99, &tuning);
        let center = state.victim.body.pos;
        let input = TickInput::default();

        // 0.5s = 60 ticks; nothing happens before the first kick
        for _ in 0..50 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.victim.body.pos, center);
        assert_eq!(state.victim.body.vel, Vec2::ZERO);

        for _ in 0..20 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_ne!(state.victim.body.pos, center);
        assert!(state.victim.alive);
    }

    #[test]
    fn test_tick_click_swats() {
        let mut state = new_state();
        place_mosquito(&mut state, Vec2::new(100.0, 100.0), Vec2::ZERO);

        let input = TickInput {
            pointer: Some(Vec2::new(100.0, 100.0)),
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.score, 10);
        assert!(state.mosquitoes.is_empty());
    }

    #[test]
    fn test_tick_click_on_victim_repels() {
        let mut state = new_state();
        let center = state.victim.body.pos;
        let input = TickInput {
            pointer: Some(center + Vec2::new(0.0, 10.0)),
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(state.victim.body.vel.y < 0.0);
        assert!(state.drain_events().contains(&GameEvent::VictimRepelled));

        // Drag brings the victim back to rest
        let idle = TickInput::default();
        for _ in 0..240 {
            tick(&mut state, &idle, SIM_DT);
        }
        assert_eq!(state.victim.body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_mosquito_reaching_victim_ends_run() {
        let mut state = new_state();
        let center = state.victim.body.pos;
        place_mosquito(&mut state, center + Vec2::new(-60.0, 0.0), Vec2::new(200.0, 0.0));

        let input = TickInput::default();
        for _ in 0..60 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.victim.alive);

        // Clicks on the dead victim do nothing
        let poke = TickInput {
            pointer: Some(center),
            ..Default::default()
        };
        tick(&mut state, &poke, SIM_DT);
        assert_eq!(state.victim.body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_game_over_still_settles_bursts() {
        let mut state = new_state();
        let center = state.victim.body.pos;
        place_mosquito(&mut state, center, Vec2::ZERO);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.emitters.len(), 1);

        for _ in 0..240 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.emitters.is_empty());
        // No spawns after game over
        assert!(state.mosquitoes.is_empty());
    }

    #[test]
    fn test_tick_pause() {
        let mut state = new_state();
        let input = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        // Paused: time stands still
        let ticks = state.time_ticks;
        for _ in 0..500 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.time_ticks, ticks);
        assert!(state.mosquitoes.is_empty());

        // Unpause
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_autoplay_swats_nearby_mosquito() {
        let mut state = new_state();
        let center = state.victim.body.pos;
        place_mosquito(&mut state, center + Vec2::new(100.0, 0.0), Vec2::ZERO);
        place_mosquito(&mut state, Vec2::new(20.0, 20.0), Vec2::ZERO);

        let input = TickInput {
            autoplay: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.score, 10);
        assert_eq!(state.mosquitoes.len(), 1);

        // Far mosquito is out of reach
        for _ in 0..120 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = new_state();
        let mut state2 = new_state();

        let inputs = [
            TickInput::default(),
            TickInput {
                pointer: Some(Vec2::new(400.0, 300.0)),
                ..Default::default()
            },
            TickInput {
                autoplay: true,
                ..Default::default()
            },
        ];

        for i in 0..2000 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.mosquitoes.len(), state2.mosquitoes.len());
        for (a, b) in state1.mosquitoes.iter().zip(state2.mosquitoes.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.body.pos, b.body.pos);
        }
    }
}
