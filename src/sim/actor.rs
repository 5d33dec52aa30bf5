//! Actors: the player, enemies and explosion particles
//!
//! One data record for every moving polygon. Variant behavior (how it
//! accelerates, how its speed is limited, whether it is walled in) is a
//! `match` on [`ActorKind`] in the free functions below.

use glam::Vec2;

use super::kinematics::KinematicState;
use super::polygon::{Rgb, ShapeState};
use crate::clamp_magnitude;
use crate::consts::*;
use crate::platform::KeySnapshot;

/// Entity id, unique within a game state
pub type ActorId = u32;

/// Variant tag with variant-specific data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    Player,
    /// `target` is the id of the player this enemy is sized against
    Enemy { target: ActorId },
    Particle,
}

/// A moving, drawable polygon
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
    pub body: KinematicState,
    pub shape: ShapeState,
}

pub const PLAYER_FILL: Rgb = Rgb::new(240, 240, 240);

impl Actor {
    /// Fresh player at the center of the arena
    pub fn player(id: ActorId, arena: Vec2) -> Self {
        Self {
            id,
            kind: ActorKind::Player,
            body: KinematicState::new(arena / 2.0, Vec2::ZERO, PLAYER_FRICTION),
            shape: ShapeState::new(PLAYER_START_SIZE, PLAYER_START_SIDES, PLAYER_FILL),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.shape.size
    }

    /// Recompute cached vertices from the body
    pub fn regenerate(&mut self) {
        self.shape.regenerate(self.body.position, self.body.rotation);
    }
}

/// Acceleration from four directional keys, clamped as a whole vector
pub fn key_acceleration(keys: &KeySnapshot) -> Vec2 {
    let mut acc = Vec2::ZERO;
    if keys.left {
        acc.x -= ACC_LIMIT;
    }
    if keys.right {
        acc.x += ACC_LIMIT;
    }
    if keys.up {
        acc.y -= ACC_LIMIT;
    }
    if keys.down {
        acc.y += ACC_LIMIT;
    }
    clamp_magnitude(acc, ACC_LIMIT)
}

/// Set this frame's acceleration.
///
/// Only the player reads input. Enemies keep whatever was set at spawn and
/// particles never accelerate.
pub fn accelerate(actor: &mut Actor, keys: &KeySnapshot) {
    match actor.kind {
        ActorKind::Player => actor.body.acceleration = key_acceleration(keys),
        ActorKind::Enemy { .. } => {}
        ActorKind::Particle => actor.body.acceleration = Vec2::ZERO,
    }
}

/// Speed policy. The player is clamped to `SPEED_LIMIT` before friction.
pub fn modify_speed(kind: ActorKind, body: &mut KinematicState) {
    if kind == ActorKind::Player {
        body.speed = clamp_magnitude(body.speed, SPEED_LIMIT);
    }
    body.apply_friction();
}

/// Full per-frame move: accelerate, integrate, then wall the player in
pub fn move_actor(actor: &mut Actor, keys: &KeySnapshot, arena: Vec2) {
    accelerate(actor, keys);
    let kind = actor.kind;
    actor.body.integrate(|body| modify_speed(kind, body));
    if kind == ActorKind::Player {
        contain(actor, arena);
    }
}

/// Clamp position into [size, W - size] x [size, H - size].
///
/// Speed is left alone: pushing into a wall keeps the velocity.
pub fn contain(actor: &mut Actor, arena: Vec2) {
    let size = actor.shape.size;
    let min = Vec2::splat(size);
    // An arena smaller than the actor pins it to the center line
    let max = (arena - min).max(min);
    actor.body.position = actor.body.position.clamp(min, max);
}

/// Grow by one after eating; optionally take the meal's shape identity
pub fn grow(player: &mut Actor, meal: &Actor, inherit_shape: bool) {
    player.shape.size += 1.0;
    if inherit_shape {
        player.shape.num_sides = meal.shape.num_sides;
        player.body.rotation_rate = meal.body.rotation_rate;
    }
}
