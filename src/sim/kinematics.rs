//! Linear Euler integration with scalar friction
//!
//! Every actor owns one `KinematicState`; the variant-specific policies in
//! `actor.rs` decide acceleration and speed limiting, this module does the rest.

use glam::Vec2;

use crate::wrap_angle;

/// Position, velocity and spin of one actor (per-frame units)
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicState {
    pub speed: Vec2,
    pub position: Vec2,
    pub acceleration: Vec2,
    /// Speed multiplier applied every frame, in (0, 1]. Fixed at construction.
    friction: f32,
    /// Radians, always in [0, 2π)
    pub rotation: f32,
    /// Radians per frame
    pub rotation_rate: f32,
}

impl KinematicState {
    pub fn new(position: Vec2, speed: Vec2, friction: f32) -> Self {
        debug_assert!(friction > 0.0 && friction <= 1.0);
        Self {
            speed,
            position,
            acceleration: Vec2::ZERO,
            friction,
            rotation: 0.0,
            rotation_rate: 0.0,
        }
    }

    /// Set initial rotation and spin
    pub fn with_spin(mut self, rotation: f32, rotation_rate: f32) -> Self {
        self.rotation = wrap_angle(rotation);
        self.rotation_rate = rotation_rate;
        self
    }

    #[inline]
    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// Base speed policy: decay by friction
    #[inline]
    pub fn apply_friction(&mut self) {
        self.speed *= self.friction;
    }

    /// Advance one frame.
    ///
    /// `acceleration` must already be set. `modify_speed` runs between the
    /// velocity update and the position update.
    pub fn integrate(&mut self, modify_speed: impl FnOnce(&mut Self)) {
        self.speed += self.acceleration;
        modify_speed(self);
        self.position += self.speed;
        self.rotation = wrap_angle(self.rotation + self.rotation_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_integrate_order() {
        let mut body = KinematicState::new(Vec2::new(10.0, 10.0), Vec2::new(1.0, 0.0), 0.5);
        body.acceleration = Vec2::new(1.0, 2.0);
        body.integrate(KinematicState::apply_friction);
        // (1 + 1, 0 + 2) * 0.5 = (1, 1)
        assert_eq!(body.speed, Vec2::new(1.0, 1.0));
        assert_eq!(body.position, Vec2::new(11.0, 11.0));
    }

    #[test]
    fn test_rotation_wraps() {
        let mut body = KinematicState::new(Vec2::ZERO, Vec2::ZERO, 1.0).with_spin(6.2, 0.2);
        body.integrate(KinematicState::apply_friction);
        assert!(body.rotation >= 0.0 && body.rotation < std::f32::consts::TAU);
        assert!((body.rotation - (6.4 - std::f32::consts::TAU)).abs() < 1e-4);

        let mut body = KinematicState::new(Vec2::ZERO, Vec2::ZERO, 1.0).with_spin(0.05, -0.1);
        body.integrate(KinematicState::apply_friction);
        assert!(body.rotation >= 0.0 && body.rotation < std::f32::consts::TAU);
    }

    #[test]
    fn test_unit_friction_keeps_straight_line() {
        let mut body = KinematicState::new(Vec2::ZERO, Vec2::new(0.5, -0.25), 1.0);
        for _ in 0..100 {
            body.integrate(KinematicState::apply_friction);
        }
        assert!((body.position - Vec2::new(50.0, -25.0)).length() < 1e-3);
    }

    proptest! {
        #[test]
        fn friction_decays_geometrically(
            x in -50.0f32..50.0,
            y in -50.0f32..50.0,
            f in 0.05f32..0.99,
            k in 1usize..40,
        ) {
            let v0 = Vec2::new(x, y);
            let mut body = KinematicState::new(Vec2::ZERO, v0, f);
            for _ in 0..k {
                body.apply_friction();
            }
            let expected = v0.length() * f.powi(k as i32);
            prop_assert!((body.speed.length() - expected).abs() <= 1e-3 * v0.length().max(1.0));
            prop_assert!(body.speed.length() <= v0.length());
        }
    }
}
