//! Collision and consumption
//!
//! Two interchangeable resolvers decide what the player touched this frame:
//! - geometric: circle-vs-circle distance against every enemy, in spawn order
//! - pixel probe: read the rendered frame around the player and look for the
//!   size-class sentinel painted into enemy fills
//!
//! Both only *report* a [`Contact`]; `GameState::apply_contact` mutates.

use glam::Vec2;

use super::actor::Actor;
use super::polygon::Rgb;
use crate::consts::*;
use crate::polar_to_cartesian;

/// Result of resolving a frame, as seen by the rest of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Eat,
    Dead,
    None,
}

/// What the resolver found, with the index of the enemy to consume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Index into the enemy list
    Eat { enemy: usize },
    Dead,
    None,
}

/// Read access to a rendered frame
pub trait PixelProbe {
    /// Color at pixel (x, y), or None outside the surface
    fn read_pixel(&self, x: i32, y: i32) -> Option<Rgb>;
}

/// Circle overlap test; symmetric in its arguments
#[inline]
pub fn collides(a: &Actor, b: &Actor) -> bool {
    a.position().distance(b.position()) < a.size() + b.size()
}

/// Geometric resolver.
///
/// The first overlapping enemy in spawn order decides: smaller than the
/// player is eaten, anything else kills.
pub fn resolve_geometric(player: &Actor, enemies: &[Actor]) -> Contact {
    enemies
        .iter()
        .position(|enemy| collides(player, enemy))
        .map_or(Contact::None, |i| {
            if player.size() > enemies[i].size() {
                Contact::Eat { enemy: i }
            } else {
                Contact::Dead
            }
        })
}

/// Sample points around the player: its polygon vertices, then a ring of
/// `PROBE_RING_POINTS` at half its size
pub fn probe_points(player: &Actor) -> Vec<Vec2> {
    let center = player.position();
    let inner = player.size() / 2.0;
    let step = std::f32::consts::TAU / PROBE_RING_POINTS as f32;

    let mut points = Vec::with_capacity(player.shape.verts.len() + PROBE_RING_POINTS);
    points.extend_from_slice(&player.shape.verts);
    points.extend(
        (0..PROBE_RING_POINTS)
            .map(|i| center + polar_to_cartesian(inner, step * i as f32 + player.body.rotation)),
    );
    points
}

/// Pixel probe resolver.
///
/// Must run after every actor has been drawn for the frame, with the player
/// drawn before enemies. Enemy fill colors must be current (see
/// `GameState::refresh_enemy_colors`). Any big-sentinel sample kills; the
/// first small-sentinel sample eats the nearest enemy smaller than the
/// player. A small sample with no small enemy left resolves to `None`.
pub fn resolve_pixel_probe(player: &Actor, enemies: &[Actor], probe: &impl PixelProbe) -> Contact {
    let mut small_hit: Option<Vec2> = None;

    for point in probe_points(player) {
        let Some(color) = probe.read_pixel(point.x.floor() as i32, point.y.floor() as i32) else {
            continue;
        };
        if color.b == BIG_CODE {
            return Contact::Dead;
        }
        if color.b == SMALL_CODE && small_hit.is_none() {
            small_hit = Some(point);
        }
    }

    let Some(point) = small_hit else {
        return Contact::None;
    };

    enemies
        .iter()
        .enumerate()
        .filter(|(_, enemy)| enemy.size() < player.size())
        .min_by(|(_, a), (_, b)| {
            a.position()
                .distance_squared(point)
                .total_cmp(&b.position().distance_squared(point))
        })
        .map_or(Contact::None, |(i, _)| Contact::Eat { enemy: i })
}
