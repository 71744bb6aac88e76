//! Game state and core simulation types
//!
//! Everything a run needs lives in `GameState`; a restart simply builds a
//! fresh one.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, WorldBounds};
use super::emitter::Emitter;
use super::pool::Pool;
use super::timer::RepeatTimer;
use crate::consts::*;
use crate::heading_vec;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Mosquitoes spawn and the player swats
    Playing,
    /// Game is paused
    Paused,
    /// The victim was stung; waiting for restart
    GameOver,
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    MosquitoSpawned { id: u32 },
    /// A mosquito was swatted; `score` is the total after the kill
    MosquitoSwatted { id: u32, score: u64 },
    VictimRepelled,
    /// The victim was stung by mosquito `by`
    VictimStung { by: u32 },
    /// A particle burst has fully decayed and was removed
    BurstFinished { id: u32 },
}

/// The smiley being hunted
#[derive(Debug, Clone)]
pub struct Victim {
    pub body: Body,
    pub alive: bool,
}

/// A mosquito entity
#[derive(Debug, Clone)]
pub struct Mosquito {
    pub id: u32,
    pub body: Body,
    /// Heading wobble range in rad/s
    pub turn_rate: f32,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub bounds: WorldBounds,
    pub phase: GamePhase,
    pub victim: Victim,
    /// Live mosquitoes in spawn order (last = topmost)
    pub mosquitoes: Pool<Mosquito>,
    pub score: u64,
    /// Live particle bursts
    pub emitters: Vec<Emitter>,
    pub spawn_timer: RepeatTimer,
    pub wander_timer: RepeatTimer,
    /// Seconds until autoplay may swat again
    pub autoplay_cooldown: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Screen shake intensity (0-1), decays each tick
    pub screen_shake: f32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Set up a new run: victim centred, empty mosquito pool, score 0
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let bounds = tuning.bounds();
        let mut victim_body = Body::new(bounds.center(), VICTIM_RADIUS)
            .with_bounce(tuning.victim_bounce)
            .with_drag(tuning.victim_drag);
        victim_body.gravity = false;

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning: tuning.clone(),
            bounds,
            phase: GamePhase::Playing,
            victim: Victim {
                body: victim_body,
                alive: true,
            },
            mosquitoes: Pool::with_capacity(tuning.mosquito_capacity),
            score: 0,
            emitters: Vec::new(),
            spawn_timer: RepeatTimer::new(tuning.spawn_period),
            wander_timer: RepeatTimer::new(tuning.victim_wander_period),
            autoplay_cooldown: 0.0,
            time_ticks: 0,
            screen_shake: 0.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Start over with a new seed, keeping the tuning
    pub fn restart(&mut self, seed: u64) {
        let tuning = self.tuning.clone();
        *self = Self::new(seed, &tuning);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn a mosquito on a random world edge, aimed at the victim.
    /// Returns the new id, or `None` if the pool is full.
    pub fn spawn_mosquito(&mut self) -> Option<u32> {
        if self.mosquitoes.is_full() {
            return None;
        }

        let (w, h) = (self.bounds.width, self.bounds.height);
        let r = MOSQUITO_RADIUS;
        let pos = match self.rng.random_range(0..4u8) {
            0 => Vec2::new(random_between(&mut self.rng, r, w - r), r),
            1 => Vec2::new(w - r, random_between(&mut self.rng, r, h - r)),
            2 => Vec2::new(random_between(&mut self.rng, r, w - r), h - r),
            _ => Vec2::new(r, random_between(&mut self.rng, r, h - r)),
        };

        let to_victim = (self.victim.body.pos - pos).normalize_or_zero();
        let dir = if to_victim == Vec2::ZERO { Vec2::X } else { to_victim };
        let speed = random_between(
            &mut self.rng,
            self.tuning.mosquito_speed_min,
            self.tuning.mosquito_speed_max,
        );
        let turn_rate = random_between(
            &mut self.rng,
            self.tuning.turn_rate_min,
            self.tuning.turn_rate_max,
        );

        let id = self.next_entity_id();
        let body = Body::new(pos, MOSQUITO_RADIUS)
            .with_velocity(dir * speed)
            .with_bounce(1.0);
        self.mosquitoes.spawn(Mosquito {
            id,
            body,
            turn_rate,
        })?;

        log::debug!("Mosquito {} spawned at ({:.0}, {:.0})", id, pos.x, pos.y);
        self.events.push(GameEvent::MosquitoSpawned { id });
        Some(id)
    }

    /// Swat the topmost mosquito under `point`. Returns true on a kill.
    pub fn swat_at(&mut self, point: Vec2) -> bool {
        let Some(index) = self
            .mosquitoes
            .iter()
            .rposition(|m| m.body.contains(point, TOUCH_SLOP))
        else {
            return false;
        };
        let Some(mosquito) = self.mosquitoes.remove(index) else {
            return false;
        };

        self.score += self.tuning.score_per_kill;
        self.emit_burst(mosquito.body.pos);
        log::debug!("Mosquito {} swatted, score {}", mosquito.id, self.score);
        self.events.push(GameEvent::MosquitoSwatted {
            id: mosquito.id,
            score: self.score,
        });
        true
    }

    /// Push the victim away from `point`. Only a live victim under the
    /// pointer can be repelled.
    pub fn repel_victim(&mut self, point: Vec2) -> bool {
        if !self.victim.alive || !self.victim.body.contains(point, 0.0) {
            return false;
        }

        let away = (self.victim.body.pos - point).normalize_or_zero();
        let dir = if away == Vec2::ZERO { Vec2::NEG_Y } else { away };
        self.victim.body.vel = dir * self.tuning.repel_speed;
        self.events.push(GameEvent::VictimRepelled);
        true
    }

    /// Kick a roaming victim in a random direction
    pub fn wander_victim(&mut self) {
        if !self.victim.alive || self.tuning.victim_wander_speed <= 0.0 {
            return;
        }
        let angle = self
            .rng
            .random_range(-std::f32::consts::PI..std::f32::consts::PI);
        self.victim.body.vel += heading_vec(angle) * self.tuning.victim_wander_speed;
    }

    /// The mosquito at `index` reached the victim: end the run
    pub fn sting(&mut self, index: usize) {
        let Some(mosquito) = self.mosquitoes.remove(index) else {
            return;
        };

        self.victim.alive = false;
        self.victim.body.vel = Vec2::ZERO;
        self.phase = GamePhase::GameOver;
        self.screen_shake = self.tuning.sting_shake;
        self.emit_burst(self.victim.body.pos);

        log::info!(
            "Victim stung by mosquito {} - game over with score {}",
            mosquito.id,
            self.score
        );
        self.events.push(GameEvent::VictimStung { by: mosquito.id });
    }

    /// Start a blood burst at `origin`. Returns the emitter id.
    pub fn emit_burst(&mut self, origin: Vec2) -> u32 {
        let id = self.next_entity_id();
        let emitter = Emitter::burst(id, origin, &self.tuning.burst, &mut self.rng);
        self.emitters.push(emitter);
        id
    }

    /// Advance every burst, dropping the ones that just finished
    pub fn update_emitters(&mut self, dt: f32) {
        let gravity_y = self.tuning.gravity_y;
        let mut finished = Vec::new();
        for emitter in self.emitters.iter_mut() {
            if emitter.update(dt, gravity_y) {
                finished.push(emitter.id);
            }
        }
        if finished.is_empty() {
            return;
        }
        self.emitters.retain(|e| !e.is_finished());
        self.events
            .extend(finished.into_iter().map(|id| GameEvent::BurstFinished { id }));
    }

    /// Total live particles across all bursts
    pub fn particle_count(&self) -> usize {
        self.emitters.iter().map(Emitter::live_count).sum()
    }
}

/// Uniform value in `[lo, hi]`, tolerating an empty or inverted range
fn random_between<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + (hi - lo).max(0.0) * rng.random::<f32>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(42, &Tuning::default())
    }

    fn place_mosquito(state: &mut GameState, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        state.mosquitoes.spawn(Mosquito {
            id,
            body: Body::new(pos, MOSQUITO_RADIUS),
            turn_rate: 0.0,
        });
        id
    }

    #[test]
    fn test_new_state() {
        let state = state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.victim.alive);
        assert_eq!(state.victim.body.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.score, 0);
        assert!(state.mosquitoes.is_empty());
        assert_eq!(state.mosquitoes.capacity(), 10);
    }

    #[test]
    fn test_spawn_stops_at_capacity() {
        let mut state = state();
        for _ in 0..10 {
            assert!(state.spawn_mosquito().is_some());
        }
        assert!(state.spawn_mosquito().is_none());
        assert_eq!(state.mosquitoes.len(), 10);
    }

    #[test]
    fn test_spawned_mosquito_on_edge_heading_inward() {
        let mut state = state();
        state.spawn_mosquito();
        let m = state.mosquitoes.as_slice()[0].clone();
        let p = m.body.pos;
        let on_edge = p.x <= MOSQUITO_RADIUS + 1e-3
            || p.y <= MOSQUITO_RADIUS + 1e-3
            || p.x >= 800.0 - MOSQUITO_RADIUS - 1e-3
            || p.y >= 600.0 - MOSQUITO_RADIUS - 1e-3;
        assert!(on_edge);
        assert!(m.body.vel.dot(state.victim.body.pos - p) > 0.0);
        assert!(m.turn_rate >= 1.5 && m.turn_rate <= 4.0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::MosquitoSpawned { id: m.id }]
        );
    }

    #[test]
    fn test_swat_scores_and_bursts() {
        let mut state = state();
        let id = place_mosquito(&mut state, Vec2::new(100.0, 100.0));

        assert!(!state.swat_at(Vec2::new(300.0, 300.0)));
        assert_eq!(state.score, 0);

        assert!(state.swat_at(Vec2::new(104.0, 100.0)));
        assert_eq!(state.score, 10);
        assert!(state.mosquitoes.is_empty());
        assert_eq!(state.emitters.len(), 1);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::MosquitoSwatted { id, score: 10 }]
        );
    }

    #[test]
    fn test_swat_hits_topmost_only() {
        let mut state = state();
        let _bottom = place_mosquito(&mut state, Vec2::new(100.0, 100.0));
        let top = place_mosquito(&mut state, Vec2::new(102.0, 100.0));
        assert!(state.swat_at(Vec2::new(101.0, 100.0)));
        assert_eq!(state.mosquitoes.len(), 1);
        assert!(state.mosquitoes.iter().all(|m| m.id != top));
    }

    #[test]
    fn test_repel_pushes_away_from_pointer() {
        let mut state = state();
        let center = state.victim.body.pos;
        assert!(state.repel_victim(center + Vec2::new(-10.0, 0.0)));
        assert!(state.victim.body.vel.x > 0.0);
        assert!((state.victim.body.vel.length() - 300.0).abs() < 1e-3);

        // Miss
        assert!(!state.repel_victim(center + Vec2::new(100.0, 0.0)));
    }

    #[test]
    fn test_sting_kills_victim_and_blocks_repel() {
        let mut state = state();
        let center = state.victim.body.pos;
        let id = place_mosquito(&mut state, center);
        state.sting(0);

        assert!(!state.victim.alive);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.mosquitoes.is_empty());
        assert_eq!(state.emitters.len(), 1);
        assert!(state.drain_events().contains(&GameEvent::VictimStung { by: id }));

        assert!(!state.repel_victim(center));
        assert_eq!(state.victim.body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_restart_resets_score_and_victim() {
        let mut state = state();
        place_mosquito(&mut state, Vec2::new(50.0, 50.0));
        state.swat_at(Vec2::new(50.0, 50.0));
        let center = state.victim.body.pos;
        place_mosquito(&mut state, center);
        state.sting(0);

        state.restart(7);
        assert_eq!(state.seed, 7);
        assert_eq!(state.score, 0);
        assert!(state.victim.alive);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.emitters.is_empty());
    }

    #[test]
    fn test_finished_bursts_removed_once() {
        let mut state = state();
        let id = state.emit_burst(Vec2::new(200.0, 200.0));
        for _ in 0..200 {
            state.update_emitters(0.01);
        }
        assert!(state.emitters.is_empty());
        let finished: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::BurstFinished { .. }))
            .collect();
        assert_eq!(finished, vec![GameEvent::BurstFinished { id }]);
    }

    #[test]
    fn test_wander_only_when_enabled() {
        let mut still = state();
        still.wander_victim();
        assert_eq!(still.victim.body.vel, Vec2::ZERO);

        let tuning = Tuning {
            victim_wander_speed: 50.0,
            ..Tuning::default()
        };
        let mut roaming = GameState::new(1, &tuning);
        roaming.wander_victim();
        assert!((roaming.victim.body.vel.length() - 50.0).abs() < 1e-3);
    }
}
