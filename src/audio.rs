//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A mosquito arrives
    Buzz,
    /// Mosquito swatted
    Swat,
    /// Victim poked away
    Repel,
    /// Victim stung
    Sting,
    /// Run over
    GameOver,
}

impl SoundEffect {
    /// The sound a simulation event should make, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::MosquitoSpawned { .. } => Some(SoundEffect::Buzz),
            GameEvent::MosquitoSwatted { .. } => Some(SoundEffect::Swat),
            GameEvent::VictimRepelled => Some(SoundEffect::Repel),
            GameEvent::VictimStung { .. } => Some(SoundEffect::Sting),
            GameEvent::BurstFinished { .. } => None,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    /// Player mute from settings
    user_muted: bool,
    /// Temporary mute while the window is unfocused
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            user_muted: false,
            muted: false,
        }
    }

    /// Pick up volumes from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.user_muted = settings.muted;
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Mute/unmute while the window is in the background
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted || self.user_muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Buzz => self.play_buzz(ctx, vol),
            SoundEffect::Swat => self.play_swat(ctx, vol),
            SoundEffect::Repel => self.play_repel(ctx, vol),
            SoundEffect::Sting => self.play_sting(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Arrival - thin wavering whine
    fn play_buzz(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 620.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.001, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(vol * 0.06, t + 0.08)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + 0.45)
            .ok();
        osc.frequency().set_value_at_time(620.0, t).ok();
        osc.frequency().set_value_at_time(660.0, t + 0.1).ok();
        osc.frequency().set_value_at_time(600.0, t + 0.2).ok();
        osc.frequency().set_value_at_time(650.0, t + 0.3).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.5).ok();
    }

    /// Swat - flat slap with a short squelch
    fn play_swat(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.07)
                .ok();
            osc.frequency().set_value_at_time(180.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.07)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.09).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Triangle) {
            gain.gain().set_value_at_time(vol * 0.15, t + 0.02).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(900.0, t + 0.02).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(300.0, t + 0.12)
                .ok();
            osc.start_with_when(t + 0.02).ok();
            osc.stop_with_when(t + 0.14).ok();
        }
    }

    /// Repel - springy boing
    fn play_repel(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.25)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(520.0, t + 0.08)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(260.0, t + 0.25)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Sting - sharp rising jab
    fn play_sting(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 1200.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok();
        osc.frequency().set_value_at_time(1200.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(2400.0, t + 0.05)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(400.0, t + 0.2)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.22).ok();
    }

    /// Game over - three descending notes
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        let notes = [392.0, 311.1, 233.1];

        for (i, freq) in notes.iter().enumerate() {
            let start = t + 0.25 + i as f64 * 0.22;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                gain.gain().set_value_at_time(0.001, t).ok();
                gain.gain().set_value_at_time(vol * 0.3, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.3)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.32).ok();
            }
        }
    }
}
