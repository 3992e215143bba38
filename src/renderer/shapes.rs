//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;

/// Push one quad (two triangles) with corners in winding order
fn quad(vertices: &mut Vec<Vertex>, corners: [Vec2; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners;
    vertices.push(Vertex::new(a.x, a.y, color));
    vertices.push(Vertex::new(b.x, b.y, color));
    vertices.push(Vertex::new(c.x, c.y, color));

    vertices.push(Vertex::new(c.x, c.y, color));
    vertices.push(Vertex::new(b.x, b.y, color));
    vertices.push(Vertex::new(d.x, d.y, color));
}

/// Generate vertices for a closed polygon outline, one stroked band per edge
pub fn polygon_outline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 || width <= 0.0 {
        return Vec::new();
    }

    let half = width * 0.5;
    let mut vertices = Vec::with_capacity(points.len() * 6);

    for (i, &p1) in points.iter().enumerate() {
        let p2 = points[(i + 1) % points.len()];

        // Perpendicular for width
        let dir = (p2 - p1).normalize_or_zero();
        let perp = Vec2::new(-dir.y, dir.x) * half;

        quad(&mut vertices, [p1 + perp, p1 - perp, p2 + perp, p2 - perp], color);
    }

    vertices
}

/// Generate vertices for a filled convex polygon (triangle fan)
pub fn polygon_fill(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    let hub = points[0];
    for pair in points[1..].windows(2) {
        vertices.push(Vertex::new(hub.x, hub.y, color));
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }

    vertices
}
