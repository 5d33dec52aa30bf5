//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, per-frame units
//! - Seeded RNG only, owned by the game state
//! - Stable iteration order (enemies in spawn order)
//! - No rendering or platform dependencies (the pixel probe is a trait)

pub mod actor;
pub mod autopilot;
pub mod collision;
pub mod explosion;
pub mod kinematics;
pub mod polygon;
pub mod spawner;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorId, ActorKind};
pub use collision::{Contact, Outcome, PixelProbe, resolve_geometric, resolve_pixel_probe};
pub use explosion::Explosion;
pub use kinematics::KinematicState;
pub use polygon::{Rgb, ShapeState, generate_vertices};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
