//! Headless attract mode
//!
//! Plays rounds on autopilot against a CPU framebuffer. Enter is "pressed"
//! on the title screen and once the death explosion has cleared; Escape is
//! pressed after the last round.

use crate::consts::DEMO_ROUND_FRAME_LIMIT;
use crate::platform::{FrameClock, InputLatch, KeySnapshot};
use crate::renderer::{Framebuffer, RenderSurface, draw_scene};
use crate::settings::{CollisionStrategy, Settings};
use crate::sim::{GameEvent, GamePhase, GameState, tick};

pub struct DemoRunner {
    pub state: GameState,
    framebuffer: Framebuffer,
    latch: InputLatch,
    keys: KeySnapshot,
    framerate: u32,
    rounds: u32,
    /// Rounds still alive after this many frames are ended
    pub round_frame_limit: u64,
    /// Final score of each finished round
    pub scores: Vec<u64>,
}

impl DemoRunner {
    pub fn new(settings: &Settings, seed: u64, rounds: u32) -> Self {
        Self {
            state: GameState::new(seed, settings),
            framebuffer: Framebuffer::new(settings.window_width, settings.window_height),
            latch: InputLatch::default(),
            keys: KeySnapshot::default(),
            framerate: settings.framerate,
            rounds,
            round_frame_limit: DEMO_ROUND_FRAME_LIMIT,
            scores: Vec::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state.phase == GamePhase::Terminated
    }

    fn script_keys(&mut self) {
        let done = self.scores.len() as u32 >= self.rounds;
        self.keys.escape = done;
        self.keys.enter = !done
            && match self.state.phase {
                GamePhase::Title => true,
                GamePhase::GameOver => self.state.explosion.is_none(),
                _ => false,
            };
    }

    /// Run one frame
    pub fn step(&mut self, clock: &mut impl FrameClock) {
        self.script_keys();
        let mut input = self.latch.sample(&mut self.keys);
        input.autopilot = true;

        let dt = clock.tick(self.framerate);
        tick(&mut self.state, &input, dt);

        draw_scene(&self.state, &mut self.framebuffer);
        if self.state.strategy == CollisionStrategy::PixelProbe {
            self.state.resolve_with_probe(&self.framebuffer);
        }
        self.framebuffer
            .present()
            .unwrap_or_else(|never| match never {});

        if self.state.phase == GamePhase::Playing && self.state.time_ticks >= self.round_frame_limit
        {
            log::info!("Round hit the {} frame limit", self.round_frame_limit);
            self.state.end_round();
        }

        for event in self.state.drain_events() {
            if let GameEvent::Died { score } = event {
                self.scores.push(score);
                log::info!(
                    "Demo round {}/{} finished with score {}",
                    self.scores.len(),
                    self.rounds,
                    score
                );
            }
        }
    }

    /// Step until every round has been played; returns the scores
    pub fn run(&mut self, clock: &mut impl FrameClock) -> &[u64] {
        while !self.is_finished() {
            self.step(clock);
        }
        &self.scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::FixedClock;

    fn small_settings(collision: CollisionStrategy) -> Settings {
        Settings {
            window_width: 200,
            window_height: 150,
            collision,
            ..Default::default()
        }
    }

    fn run(settings: &Settings, seed: u64, rounds: u32) -> (Vec<u64>, u64) {
        let mut runner = DemoRunner::new(settings, seed, rounds);
        runner.round_frame_limit = 600;
        let mut clock = FixedClock::default();
        let scores = runner.run(&mut clock).to_vec();
        (scores, clock.frames)
    }

    #[test]
    fn test_plays_requested_rounds_then_quits() {
        let (scores, frames) = run(&small_settings(CollisionStrategy::Geometric), 5, 2);
        assert_eq!(scores.len(), 2);
        // Two capped rounds plus explosions and title
        assert!(frames <= 2 * (600 + 200));
    }

    #[test]
    fn test_demo_is_deterministic() {
        let settings = small_settings(CollisionStrategy::Geometric);
        assert_eq!(run(&settings, 99, 2), run(&settings, 99, 2));
    }

    #[test]
    fn test_pixel_probe_demo_completes() {
        let (scores, _) = run(&small_settings(CollisionStrategy::PixelProbe), 7, 1);
        assert_eq!(scores.len(), 1);
    }

    #[test]
    fn test_zero_rounds_quits_immediately() {
        let (scores, frames) = run(&small_settings(CollisionStrategy::Geometric), 1, 0);
        assert!(scores.is_empty());
        assert_eq!(frames, 1);
    }
}
