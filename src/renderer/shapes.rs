//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in view pixels (y down).

use glam::{Affine2, Vec2};
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Vec<Vertex> {
    quad(
        [
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x + w, y + h),
            Vec2::new(x, y + h),
        ],
        color,
    )
}

/// Generate vertices for a convex quad given in winding order
pub fn quad(corners: [Vec2; 4], color: [f32; 4]) -> Vec<Vertex> {
    let [a, b, c, d] = corners;
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(a.x, a.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Generate vertices for a rectangle defined in a local frame
pub fn transformed_rect(
    transform: &Affine2,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    quad(
        [
            transform.transform_point2(Vec2::new(x, y)),
            transform.transform_point2(Vec2::new(x + w, y)),
            transform.transform_point2(Vec2::new(x + w, y + h)),
            transform.transform_point2(Vec2::new(x, y + h)),
        ],
        color,
    )
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    sector(center, radius, 0.0, TAU, color, segments)
}

/// Generate vertices for a filled pie slice swept from `start` to `end`
/// (either direction, radians, canvas convention)
pub fn sector(
    center: Vec2,
    radius: f32,
    start: f32,
    end: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(1);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = start + (end - start) * (i as f32 / segments as f32);
        let theta2 = start + (end - start) * ((i + 1) as f32 / segments as f32);

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a stroked line segment of the given width
pub fn line(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    quad([a + perp, b + perp, b - perp, a - perp], color)
}

/// Generate vertices for a stroked open polyline
pub fn polyline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    points
        .windows(2)
        .flat_map(|w| line(w[0], w[1], width, color))
        .collect()
}

/// Generate vertices for a stroked arc swept from `start` to `end`
pub fn arc_stroke(
    center: Vec2,
    radius: f32,
    start: f32,
    end: f32,
    width: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(1);
    let points: Vec<Vec2> = (0..=segments)
        .map(|i| {
            let theta = start + (end - start) * (i as f32 / segments as f32);
            center + Vec2::new(theta.cos(), theta.sin()) * radius
        })
        .collect();
    polyline(&points, width, color)
}

/// Map locally-built vertices into another frame
pub fn transform(vertices: Vec<Vertex>, transform: &Affine2) -> Vec<Vertex> {
    vertices
        .into_iter()
        .map(|v| {
            let p = transform.transform_point2(Vec2::from(v.position));
            Vertex::new(p.x, p.y, v.color)
        })
        .collect()
}
