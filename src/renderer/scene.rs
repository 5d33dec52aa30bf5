//! Scene drawing shared by every render surface
//!
//! Draw order matters for pixel probing: the player goes down first so any
//! enemy overlapping it paints over it.

use super::surface::RenderSurface;
use crate::sim::{Actor, GameState, Rgb};

pub const BACKGROUND: Rgb = Rgb::BLACK;

fn draw_actor<S: RenderSurface>(surface: &mut S, actor: &Actor) {
    let shape = &actor.shape;
    surface.draw_polygon(shape.fill_color, &shape.verts);
    surface.draw_outline(shape.outline_color, &shape.verts, true);
}

/// Draw one frame of the game (does not present)
pub fn draw_scene<S: RenderSurface>(state: &GameState, surface: &mut S) {
    surface.fill_background(BACKGROUND);

    if state.player_visible() {
        draw_actor(surface, &state.player);
    }
    for enemy in &state.enemies {
        draw_actor(surface, enemy);
    }
    if let Some(explosion) = &state.explosion {
        for particle in &explosion.particles {
            surface.draw_polygon(particle.shape.fill_color, &particle.shape.verts);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::Framebuffer;
    use crate::settings::{CollisionStrategy, Settings};
    use crate::sim::spawner::enemy_colors;
    use crate::sim::{ActorKind, GamePhase, KinematicState, Outcome, PixelProbe, ShapeState};
    use glam::Vec2;

    fn probe_state() -> GameState {
        let settings = Settings {
            collision: CollisionStrategy::PixelProbe,
            ..Default::default()
        };
        let mut state = GameState::new(21, &settings);
        state.start_round();
        state
    }

    fn add_enemy(state: &mut GameState, offset: Vec2, size: f32, sides: u32) {
        let id = state.next_entity_id();
        let mut enemy = Actor {
            id,
            kind: ActorKind::Enemy { target: state.player.id },
            body: KinematicState::new(state.player.position() + offset, Vec2::ZERO, 1.0),
            shape: ShapeState::new(size, sides, enemy_colors(size, state.player.size())),
        };
        enemy.regenerate();
        state.enemies.push(enemy);
    }

    fn framebuffer(state: &GameState) -> Framebuffer {
        let mut fb = Framebuffer::new(state.arena.x as u32, state.arena.y as u32);
        draw_scene(state, &mut fb);
        fb
    }

    #[test]
    fn test_enemy_paints_over_player() {
        let mut state = probe_state();
        add_enemy(&mut state, Vec2::ZERO, 30.0, 8);
        let fb = framebuffer(&state);
        let center = state.player.position();
        let pixel = fb.read_pixel(center.x as i32, center.y as i32).unwrap();
        assert_eq!(pixel.b, BIG_CODE);
    }

    #[test]
    fn test_probe_eats_small_overlap() {
        let mut state = probe_state();
        add_enemy(&mut state, Vec2::new(300.0, 0.0), 5.0, 5);
        add_enemy(&mut state, Vec2::new(6.0, 0.0), 6.0, 6);
        let fb = framebuffer(&state);

        assert_eq!(state.resolve_with_probe(&fb), Outcome::Eat);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.player.size(), PLAYER_START_SIZE + 1.0);
        assert_eq!(state.player.shape.num_sides, 6);
    }

    #[test]
    fn test_probe_dies_on_big_overlap() {
        let mut state = probe_state();
        add_enemy(&mut state, Vec2::ZERO, 30.0, 8);
        let fb = framebuffer(&state);
        assert_eq!(state.resolve_with_probe(&fb), Outcome::Dead);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_probe_ignores_distant_enemies() {
        let mut state = probe_state();
        add_enemy(&mut state, Vec2::new(100.0, 0.0), 30.0, 8);
        let fb = framebuffer(&state);
        assert_eq!(state.resolve_with_probe(&fb), Outcome::None);
    }

    #[test]
    fn test_stale_frame_with_no_enemies() {
        let mut state = probe_state();
        add_enemy(&mut state, Vec2::new(6.0, 0.0), 6.0, 8);
        let fb = framebuffer(&state);
        // Enemy vanished after the frame was drawn
        state.enemies.clear();
        assert_eq!(state.resolve_with_probe(&fb), Outcome::None);
        assert_eq!(state.player.size(), PLAYER_START_SIZE);
    }

    #[test]
    fn test_dead_player_not_drawn() {
        let mut state = probe_state();
        state.end_round();
        state.explosion = None;
        let fb = framebuffer(&state);
        let center = state.player.position();
        assert_eq!(fb.read_pixel(center.x as i32, center.y as i32), Some(BACKGROUND));
    }
}
