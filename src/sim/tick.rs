//! Fixed-rate frame step
//!
//! One call = one rendered frame. Drives the Title -> Playing -> GameOver
//! state machine and, while playing, the spawn / move / resolve pipeline.

use super::actor;
use super::autopilot;
use super::state::{GamePhase, GameState};
use crate::platform::KeySnapshot;
use crate::settings::CollisionStrategy;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Arrow keys currently held
    pub keys: KeySnapshot,
    /// Enter was pressed this frame (edge, not level)
    pub confirm: bool,
    /// Escape pressed or window closed
    pub quit: bool,
    /// Demo mode - the autopilot drives the player
    pub autopilot: bool,
}

/// Advance the game by one frame of `dt` seconds.
///
/// With the geometric strategy collisions are resolved here. With the pixel
/// probe strategy the caller draws the frame and then calls
/// `GameState::resolve_with_probe`.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.quit {
        if state.phase != GamePhase::Terminated {
            log::info!("Quit requested");
        }
        state.phase = GamePhase::Terminated;
        return;
    }

    state.clock += dt;

    match state.phase {
        GamePhase::Title => {
            if input.confirm {
                state.start_round();
            }
        }

        GamePhase::Playing => {
            state.time_ticks += 1;
            state.maybe_spawn();

            let keys = if input.autopilot {
                autopilot::steer(&state.player, &state.enemies, state.arena)
            } else {
                input.keys
            };
            actor::move_actor(&mut state.player, &keys, state.arena);
            state.player.regenerate();

            advance_enemies(state);
            state.refresh_enemy_colors();

            if state.strategy == CollisionStrategy::Geometric {
                state.resolve_collisions();
            }
        }

        GamePhase::GameOver => {
            if input.confirm {
                state.start_round();
                return;
            }

            // Player stays frozen; the world keeps going for effect
            advance_enemies(state);

            let now = state.clock;
            let arena = state.arena;
            if let Some(explosion) = state.explosion.as_mut() {
                explosion.advance(arena);
            }
            if state.explosion.as_ref().is_some_and(|e| e.is_finished(now)) {
                state.explosion = None;
            }
        }

        GamePhase::Terminated => {}
    }
}

fn advance_enemies(state: &mut GameState) {
    let no_keys = KeySnapshot::default();
    for enemy in &mut state.enemies {
        actor::move_actor(enemy, &no_keys, state.arena);
        enemy.regenerate();
    }
}
