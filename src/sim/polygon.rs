//! Regular polygon geometry and fill colors

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Normalized RGBA for GPU vertices
    pub fn to_rgba(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

/// Size, side count and colors of a polygon actor
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeState {
    /// Circumradius in pixels, > 0
    pub size: f32,
    /// >= 3
    pub num_sides: u32,
    pub outline_color: Rgb,
    pub fill_color: Rgb,
    /// Derived each frame by `regenerate`; empty until then
    pub verts: Vec<Vec2>,
}

impl ShapeState {
    pub fn new(size: f32, num_sides: u32, fill_color: Rgb) -> Self {
        debug_assert!(size > 0.0);
        Self {
            size,
            num_sides: num_sides.max(3),
            outline_color: Rgb::WHITE,
            fill_color,
            verts: Vec::new(),
        }
    }

    /// Refresh cached vertices for the current position/rotation
    pub fn regenerate(&mut self, position: Vec2, rotation: f32) {
        self.verts.clear();
        self.verts
            .extend(polygon_vertices(position, rotation, self.size, self.num_sides));
    }
}

/// Vertices of a regular polygon, vertex 0 at angle `rotation`
pub fn polygon_vertices(
    position: Vec2,
    rotation: f32,
    size: f32,
    num_sides: u32,
) -> impl Iterator<Item = Vec2> {
    let step = std::f32::consts::TAU / num_sides as f32;
    (0..num_sides).map(move |i| position + polar_to_cartesian(size, step * i as f32 + rotation))
}

/// Collected form of [`polygon_vertices`]
pub fn generate_vertices(position: Vec2, rotation: f32, size: f32, num_sides: u32) -> Vec<Vec2> {
    polygon_vertices(position, rotation, size, num_sides).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::TAU;

    #[test]
    fn test_first_vertex_at_rotation() {
        let verts = generate_vertices(Vec2::new(100.0, 50.0), 0.0, 10.0, 4);
        assert_eq!(verts.len(), 4);
        assert!((verts[0] - Vec2::new(110.0, 50.0)).length() < 1e-4);
        assert!((verts[1] - Vec2::new(100.0, 60.0)).length() < 1e-4);
        assert!((verts[2] - Vec2::new(90.0, 50.0)).length() < 1e-4);
    }

    #[test]
    fn test_regenerate_replaces_cache() {
        let mut shape = ShapeState::new(5.0, 6, Rgb::WHITE);
        shape.regenerate(Vec2::ZERO, 0.0);
        shape.regenerate(Vec2::new(1.0, 1.0), 1.0);
        assert_eq!(shape.verts.len(), 6);
    }

    proptest! {
        #[test]
        fn vertices_are_regular(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            rotation in 0.0f32..TAU,
            size in 1.0f32..100.0,
            sides in 3u32..16,
        ) {
            let center = Vec2::new(x, y);
            let verts = generate_vertices(center, rotation, size, sides);
            prop_assert_eq!(verts.len(), sides as usize);

            let step = TAU / sides as f32;
            for (i, v) in verts.iter().enumerate() {
                let offset = *v - center;
                prop_assert!((offset.length() - size).abs() < 1e-3 * size.max(1.0));

                let next = verts[(i + 1) % verts.len()] - center;
                let angle = offset.angle_to(next);
                prop_assert!((angle - step).abs() < 1e-3);
            }
        }
    }
}
