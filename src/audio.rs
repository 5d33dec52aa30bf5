//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects driven by round events.

use web_sys::{AudioContext, OscillatorType};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoundEffect {
    /// Player swallowed a smaller polygon; pitch drops as the player grows
    Eat { size: u32 },
    /// Player was eaten
    Death,
    /// A new round began
    RoundStart,
}

impl SoundEffect {
    pub fn for_event(event: &GameEvent) -> Self {
        match *event {
            GameEvent::RoundStarted => SoundEffect::RoundStart,
            GameEvent::Ate { size, .. } => SoundEffect::Eat { size },
            GameEvent::Died { .. } => SoundEffect::Death,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_volume(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play the sound for each drained round event
    pub fn handle_events(&self, events: &[GameEvent]) {
        for event in events {
            self.play(SoundEffect::for_event(event));
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Eat { size } => self.play_eat(ctx, vol, size),
            SoundEffect::Death => self.play_death(ctx, vol),
            SoundEffect::RoundStart => self.play_round_start(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Schedule one enveloped oscillator note
    fn tone(&self, ctx: &AudioContext, note: Note, vol: f32) {
        let Ok(osc) = ctx.create_oscillator() else {
            return;
        };
        let Ok(gain) = ctx.create_gain() else {
            return;
        };
        osc.set_type(note.wave);
        if osc.connect_with_audio_node(&gain).is_err()
            || gain.connect_with_audio_node(&ctx.destination()).is_err()
        {
            return;
        }

        let t = ctx.current_time() + note.delay;
        let end = t + note.length;
        gain.gain().set_value_at_time(vol * note.level, t).ok();
        gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
        osc.frequency().set_value_at_time(note.freq, t).ok();
        if let Some(target) = note.slide_to {
            osc.frequency()
                .exponential_ramp_to_value_at_time(target, end)
                .ok();
        }

        osc.start_with_when(t).ok();
        osc.stop_with_when(end + 0.05).ok();
    }

    /// Eat - short upward chirp, lower as the player grows
    fn play_eat(&self, ctx: &AudioContext, vol: f32, size: u32) {
        let base = (900.0 - size as f32 * 6.0).max(220.0);
        self.tone(
            ctx,
            Note::new(base, OscillatorType::Square, 0.15, 0.08).slide(base * 1.6),
            vol,
        );
    }

    /// Death - low crunch, then a falling four-note tail
    fn play_death(&self, ctx: &AudioContext, vol: f32) {
        self.tone(
            ctx,
            Note::new(120.0, OscillatorType::Sawtooth, 0.5, 0.4).slide(30.0),
            vol,
        );
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].into_iter().enumerate() {
            let note = Note::new(freq, OscillatorType::Sine, 0.3, 0.3).after(0.3 + i as f64 * 0.2);
            self.tone(ctx, note, vol);
        }
    }

    /// Round start - rising major triad
    fn play_round_start(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [262.0, 330.0, 392.0].into_iter().enumerate() {
            let note = Note::new(freq, OscillatorType::Triangle, 0.25, 0.12).after(i as f64 * 0.07);
            self.tone(ctx, note, vol);
        }
    }
}

/// Parameters for [`AudioManager::tone`]
#[derive(Debug, Clone, Copy)]
struct Note {
    freq: f32,
    wave: OscillatorType,
    /// Peak gain before the master volume
    level: f32,
    /// Seconds
    length: f64,
    delay: f64,
    slide_to: Option<f32>,
}

impl Note {
    fn new(freq: f32, wave: OscillatorType, level: f32, length: f64) -> Self {
        Self {
            freq,
            wave,
            level,
            length,
            delay: 0.0,
            slide_to: None,
        }
    }

    fn after(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    fn slide(mut self, target: f32) -> Self {
        self.slide_to = Some(target);
        self
    }
}
