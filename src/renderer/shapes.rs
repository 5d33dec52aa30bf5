//! Triangle-list tessellation of polygons and outlines

use glam::Vec2;

use super::vertex::Vertex;

/// Filled convex polygon as a triangle fan around vertex 0
pub fn polygon_fill(verts: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if verts.len() < 3 {
        return Vec::new();
    }
    let anchor = verts[0];
    verts[1..]
        .windows(2)
        .flat_map(|pair| [anchor, pair[0], pair[1]])
        .map(|p| Vertex::at(p, color))
        .collect()
}

/// Outline as one thin quad per edge
pub fn polyline(verts: &[Vec2], closed: bool, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    if verts.len() < 2 {
        return Vec::new();
    }
    let edge_count = if closed { verts.len() } else { verts.len() - 1 };
    let mut vertices = Vec::with_capacity(edge_count * 6);
    let half = width / 2.0;

    for i in 0..edge_count {
        let p1 = verts[i];
        let p2 = verts[(i + 1) % verts.len()];

        let dir = (p2 - p1).normalize_or_zero();
        // Perpendicular for width
        let perp = Vec2::new(-dir.y, dir.x) * half;

        // Quad corners, stretched past the ends so joints overlap
        let a = p1 - dir * half;
        let b = p2 + dir * half;
        let v1a = a + perp;
        let v1b = a - perp;
        let v2a = b + perp;
        let v2b = b - perp;

        vertices.extend([v1a, v1b, v2a, v2a, v1b, v2b].map(|p| Vertex::at(p, color)));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::generate_vertices;

    #[test]
    fn test_fan_triangle_count() {
        let hexagon = generate_vertices(Vec2::ZERO, 0.0, 10.0, 6);
        assert_eq!(polygon_fill(&hexagon, [1.0; 4]).len(), 4 * 3);
        assert!(polygon_fill(&hexagon[..2], [1.0; 4]).is_empty());
    }

    #[test]
    fn test_fan_covers_every_vertex() {
        let square = generate_vertices(Vec2::ZERO, 0.0, 10.0, 4);
        let fan = polygon_fill(&square, [1.0; 4]);
        for v in &square {
            assert!(fan.iter().any(|f| Vec2::from(f.position) == *v));
        }
    }

    #[test]
    fn test_polyline_edges() {
        let square = generate_vertices(Vec2::ZERO, 0.0, 10.0, 4);
        assert_eq!(polyline(&square, true, 1.0, [1.0; 4]).len(), 4 * 6);
        assert_eq!(polyline(&square, false, 1.0, [1.0; 4]).len(), 3 * 6);
    }
}
