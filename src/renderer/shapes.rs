//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in world coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, radius, radius, 0.0, color, segments)
}

/// Generate vertices for a filled ellipse rotated by `rotation` radians
pub fn ellipse(
    center: Vec2,
    rx: f32,
    ry: f32,
    rotation: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    let rot = Vec2::from_angle(rotation);

    let point = |i: u32| {
        let theta = (i as f32 / segments as f32) * 2.0 * PI;
        center + rot.rotate(Vec2::new(rx * theta.cos(), ry * theta.sin()))
    };

    for i in 0..segments {
        let p1 = point(i);
        let p2 = point(i + 1);

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    arc_band(center, inner_radius, outer_radius, 0.0, 2.0 * PI, color, segments)
}

/// Generate vertices for a thick arc band between two angles
pub fn arc_band(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    theta_start: f32,
    theta_end: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(1);
    let span = theta_end - theta_start;
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = theta_start + (i as f32 / segments as f32) * span;
        let theta2 = theta_start + ((i + 1) as f32 / segments as f32) * span;

        let inner1 = center + Vec2::from_angle(theta1) * inner_radius;
        let outer1 = center + Vec2::from_angle(theta1) * outer_radius;
        let inner2 = center + Vec2::from_angle(theta2) * inner_radius;
        let outer2 = center + Vec2::from_angle(theta2) * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Generate vertices for a thick line segment
pub fn segment(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    let perp = dir.perp() * (width / 2.0);

    let a = from + perp;
    let b = from - perp;
    let c = to + perp;
    let d = to - perp;

    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Generate vertices for an axis-aligned rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_circle_vertices_on_radius() {
        let center = Vec2::new(10.0, 20.0);
        let verts = circle(center, 5.0, WHITE, 16);
        assert_eq!(verts.len(), 16 * 3);
        for tri in verts.chunks(3) {
            let edge = Vec2::from(tri[1].position);
            assert!((edge.distance(center) - 5.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_rotated_ellipse_major_axis() {
        let verts = ellipse(Vec2::ZERO, 10.0, 2.0, PI / 2.0, WHITE, 4);
        // First edge point sits on the rotated major axis
        let p = Vec2::from(verts[1].position);
        assert!(p.x.abs() < 1e-3);
        assert!((p.y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_segment_width() {
        let verts = segment(Vec2::ZERO, Vec2::new(10.0, 0.0), 4.0, WHITE);
        assert_eq!(verts.len(), 6);
        let a = Vec2::from(verts[0].position);
        let b = Vec2::from(verts[1].position);
        assert!((a.distance(b) - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_ring_segment_count() {
        assert_eq!(ring(Vec2::ZERO, 4.0, 5.0, WHITE, 10).len(), 60);
    }
}
