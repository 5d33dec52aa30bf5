//! Death explosion: a short-lived burst of particle actors

use glam::Vec2;
use rand::Rng;

use super::actor::{Actor, ActorId, ActorKind};
use super::kinematics::KinematicState;
use super::polygon::{Rgb, ShapeState};
use crate::consts::*;
use crate::platform::KeySnapshot;

/// Particles flung from the player's last position
#[derive(Debug, Clone)]
pub struct Explosion {
    pub particles: Vec<Actor>,
    /// Game clock (seconds) when the burst started
    pub started_at: f32,
}

impl Explosion {
    /// Burst `EXPLOSION_PARTICLES` particles from `origin`, colored like the victim.
    ///
    /// `next_id` is called once per particle.
    pub fn burst(
        rng: &mut impl Rng,
        origin: Vec2,
        color: Rgb,
        started_at: f32,
        mut next_id: impl FnMut() -> ActorId,
    ) -> Self {
        let particles = (0..EXPLOSION_PARTICLES)
            .map(|_| {
                let angle = rng.random_range(0.0..std::f32::consts::TAU);
                let speed = rng.random_range(0.5..PARTICLE_SPEED_MAX);
                let size = rng.random_range(1.5..4.0);
                let spin = rng.random_range(-0.3..0.3);
                let mut particle = Actor {
                    id: next_id(),
                    kind: ActorKind::Particle,
                    body: KinematicState::new(origin, Vec2::from_angle(angle) * speed, PARTICLE_FRICTION)
                        .with_spin(angle, spin),
                    shape: ShapeState::new(size, 3, color),
                };
                particle.regenerate();
                particle
            })
            .collect();

        Self {
            particles,
            started_at,
        }
    }

    /// Seconds since the burst
    pub fn age(&self, now: f32) -> f32 {
        now - self.started_at
    }

    pub fn is_finished(&self, now: f32) -> bool {
        self.age(now) >= EXPLOSION_DURATION
    }

    /// Drift every particle one frame
    pub fn advance(&mut self, arena: Vec2) {
        let no_keys = KeySnapshot::default();
        for particle in &mut self.particles {
            super::actor::move_actor(particle, &no_keys, arena);
            particle.regenerate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn burst() -> Explosion {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut id = 100;
        Explosion::burst(&mut rng, Vec2::new(400.0, 300.0), Rgb::WHITE, 2.0, || {
            id += 1;
            id
        })
    }

    #[test]
    fn test_burst_particles() {
        let explosion = burst();
        assert_eq!(explosion.particles.len(), EXPLOSION_PARTICLES);
        assert!(explosion.particles.iter().all(|p| p.kind == ActorKind::Particle));
        let mut ids: Vec<_> = explosion.particles.iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), EXPLOSION_PARTICLES);
    }

    #[test]
    fn test_particles_slow_down() {
        let mut explosion = burst();
        let before: Vec<f32> = explosion.particles.iter().map(|p| p.body.speed.length()).collect();
        explosion.advance(Vec2::new(800.0, 600.0));
        for (p, v0) in explosion.particles.iter().zip(before) {
            assert!(p.body.speed.length() < v0);
            assert_eq!(p.body.acceleration, Vec2::ZERO);
        }
    }

    #[test]
    fn test_duration() {
        let explosion = burst();
        assert!(!explosion.is_finished(2.0));
        assert!(!explosion.is_finished(2.0 + EXPLOSION_DURATION - 0.01));
        assert!(explosion.is_finished(2.0 + EXPLOSION_DURATION));
    }
}
