//! Poly Feast - an arcade survival game of hungry polygons
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, spawning, collisions, round state)
//! - `renderer`: Render surfaces (CPU framebuffer and WebGPU pipeline)
//! - `platform`: Input and frame clock collaborators
//! - `settings`: Data-driven configuration
//! - `demo`: Headless attract mode

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod demo;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target frames per second; one simulation step per frame
    pub const FRAMERATE: u32 = 60;
    /// Maximum substeps per browser frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default window dimensions
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Player kinematics (per-frame units)
    pub const ACC_LIMIT: f32 = 0.4;
    pub const SPEED_LIMIT: f32 = 8.0;
    pub const PLAYER_FRICTION: f32 = 0.9;
    pub const PLAYER_START_SIZE: f32 = 10.0;
    pub const PLAYER_START_SIDES: u32 = 8;

    /// Enemy speed range in pixels per second (divided by the framerate at spawn)
    pub const ENEMY_SPEED_MIN: f32 = 20.0;
    pub const ENEMY_SPEED_MAX: f32 = 100.0;
    /// Max perpendicular jitter added to the inward spawn direction
    pub const ANGLE_VARIANCE: f32 = 0.5;
    /// Enemy sizes span [player / SCALE, player * SCALE]
    pub const SPAWN_SIZE_SCALE: f32 = 2.0;
    pub const MIN_ENEMY_SIZE: f32 = 4.0;
    pub const ENEMY_SIDES_MIN: u32 = 3;
    pub const ENEMY_SIDES_MAX: u32 = 8;
    /// Max enemy spin (radians per frame, either direction)
    pub const ENEMY_ROTATION_MAX: f32 = 0.05;

    /// Spawn cadence: one enemy every N frames on average
    pub const BASE_FRAMES_PER_SPAWN: f32 = 50.0;
    pub const MIN_FRAMES_PER_SPAWN: f32 = 12.0;
    /// Frames shaved off the spawn interval per point scored
    pub const SPAWN_RATE_STEP: f32 = 0.5;

    /// Blue channel sentinels painted into enemy fills for pixel probing
    pub const BIG_CODE: u8 = 1;
    pub const SMALL_CODE: u8 = 2;
    /// Secondary probe ring sample count (at half the player's size)
    pub const PROBE_RING_POINTS: usize = 12;

    /// Death explosion
    pub const EXPLOSION_PARTICLES: usize = 24;
    /// Seconds before the explosion is cleared
    pub const EXPLOSION_DURATION: f32 = 1.5;
    pub const PARTICLE_FRICTION: f32 = 0.95;
    pub const PARTICLE_SPEED_MAX: f32 = 6.0;

    /// Rounds played by the headless attract-mode runner
    pub const DEMO_ROUNDS: u32 = 3;
    /// Frame cap per demo round so a stalemate cannot run forever
    pub const DEMO_ROUND_FRAME_LIMIT: u64 = 60 * 120;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Scale `v` down so its length is at most `limit`.
///
/// Vectors already within the limit (including the zero vector) are
/// returned unchanged, so this never divides by zero.
#[inline]
pub fn clamp_magnitude(v: Vec2, limit: f32) -> Vec2 {
    let mag = v.length();
    if mag > limit && mag > 0.0 {
        v / mag * limit
    } else {
        v
    }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
