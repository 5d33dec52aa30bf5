//! Enemy spawning
//!
//! Enemies enter from a random window edge, sized relative to the player so
//! the mix of food and threats keeps up as the player grows.

use glam::Vec2;
use rand::Rng;

use super::actor::{Actor, ActorId, ActorKind};
use super::kinematics::KinematicState;
use super::polygon::{Rgb, ShapeState};
use crate::consts::*;

/// Window edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Unit normal pointing into the window
    pub fn inward_normal(self) -> Vec2 {
        match self {
            Edge::Left => Vec2::X,
            Edge::Right => Vec2::NEG_X,
            Edge::Top => Vec2::Y,
            Edge::Bottom => Vec2::NEG_Y,
        }
    }

    /// Point just outside this edge, `offset` px beyond it, `t` in [0, 1] along it
    pub fn outside_point(self, arena: Vec2, t: f32, offset: f32) -> Vec2 {
        match self {
            Edge::Left => Vec2::new(-offset, t * arena.y),
            Edge::Right => Vec2::new(arena.x + offset, t * arena.y),
            Edge::Top => Vec2::new(t * arena.x, -offset),
            Edge::Bottom => Vec2::new(t * arena.x, arena.y + offset),
        }
    }
}

/// Size range for a new enemy given the player's size
pub fn enemy_size_range(player_size: f32) -> (f32, f32) {
    let lo = (player_size / SPAWN_SIZE_SCALE).max(MIN_ENEMY_SIZE);
    let hi = (player_size * SPAWN_SIZE_SCALE).max(lo);
    (lo, hi)
}

/// Fill color for an enemy relative to the player.
///
/// The blue channel carries the size class sentinel (`BIG_CODE` when the
/// enemy is at least as large as the player, `SMALL_CODE` otherwise) so a
/// rendered frame can be read back as a collision map. Red or green scales
/// with the size ratio.
pub fn enemy_colors(enemy_size: f32, player_size: f32) -> Rgb {
    let ratio = enemy_size / player_size.max(f32::EPSILON);
    if ratio >= 1.0 {
        let t = ((ratio - 1.0) / (SPAWN_SIZE_SCALE - 1.0)).clamp(0.0, 1.0);
        Rgb::new(128 + (127.0 * t) as u8, 0, BIG_CODE)
    } else {
        let t = (1.0 - ratio).clamp(0.0, 1.0);
        Rgb::new(0, 128 + (127.0 * t) as u8, SMALL_CODE)
    }
}

/// Average frames between spawns at a given score
pub fn frames_per_spawn(score: u64) -> f32 {
    (BASE_FRAMES_PER_SPAWN - score as f32 * SPAWN_RATE_STEP).max(MIN_FRAMES_PER_SPAWN)
}

/// Per-frame spawn roll with probability 1 / frames_per_spawn
pub fn should_spawn(rng: &mut impl Rng, frames_per_spawn: f32) -> bool {
    rng.random_bool((1.0 / frames_per_spawn.max(1.0)) as f64)
}

/// Create an enemy just outside a random edge, heading inward.
///
/// `angle_variance` bounds the random perpendicular component added to the
/// inward direction; 0 gives axis-aligned flight. Speed is drawn in px/s and
/// stored per frame at `framerate`.
pub fn spawn_enemy(
    rng: &mut impl Rng,
    id: ActorId,
    player: &Actor,
    arena: Vec2,
    angle_variance: f32,
    framerate: u32,
) -> Actor {
    let (lo, hi) = enemy_size_range(player.size());
    let size = if hi > lo { rng.random_range(lo..=hi) } else { lo };

    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let position = edge.outside_point(arena, rng.random::<f32>(), size);

    let normal = edge.inward_normal();
    let jitter = if angle_variance > 0.0 {
        rng.random_range(-angle_variance..=angle_variance)
    } else {
        0.0
    };
    let direction = (normal + normal.perp() * jitter).normalize_or(normal);
    let speed = rng.random_range(ENEMY_SPEED_MIN..=ENEMY_SPEED_MAX) / framerate.max(1) as f32;

    let num_sides = rng.random_range(ENEMY_SIDES_MIN..=ENEMY_SIDES_MAX);
    let rotation = rng.random_range(0.0..std::f32::consts::TAU);
    let rotation_rate = rng.random_range(-ENEMY_ROTATION_MAX..=ENEMY_ROTATION_MAX);

    let mut enemy = Actor {
        id,
        kind: ActorKind::Enemy { target: player.id },
        body: KinematicState::new(position, direction * speed, 1.0)
            .with_spin(rotation, rotation_rate),
        shape: ShapeState::new(size, num_sides, enemy_colors(size, player.size())),
    };
    enemy.regenerate();

    log::trace!(
        "Spawned enemy {} ({:?} edge, size {:.1}, {} sides)",
        id,
        edge,
        size,
        num_sides
    );
    enemy
}
