//! Guillotine-plane clipping geometry.
//!
//! Clips triangles against planes given in normal + offset form. The frame
//! pipeline never calls into this module; near/far clipping is an explicit
//! opt-in at the call site, matching the renderer's painter's-algorithm
//! heritage where off-screen geometry is handled by culling alone.
//!
//! The two-vertices-inside case emits the full quad as two triangles.

use crate::math::vec4::Vec4;
use crate::triangle::Triangle;

/// A clipping plane in implicit form: a point p is inside when
/// `dot(normal, p) + offset >= 0`.
#[derive(Clone, Copy, Debug)]
pub struct Plane {
    pub normal: Vec4,
    pub offset: f32,
}

impl Plane {
    pub fn new(normal: Vec4, offset: f32) -> Self {
        Self { normal, offset }
    }

    /// Signed distance from the plane, scaled by the normal's length.
    /// Non-negative means inside.
    pub fn signed_distance(&self, p: Vec4) -> f32 {
        self.normal.dot(p) + self.offset
    }
}

/// Clip one triangle against one plane.
///
/// Returns 0, 1 or 2 triangles:
/// - all 3 vertices inside: the triangle unchanged;
/// - 1 inside: one sub-triangle made of the inside vertex and the two
///   edge/plane intersections;
/// - 2 inside: the clipped quad split into two triangles;
/// - 0 inside: nothing.
///
/// Implemented as a Sutherland-Hodgman edge walk so the output keeps the
/// input winding order.
pub fn clip_to_plane(triangle: &Triangle, plane: &Plane) -> Vec<Triangle> {
    let mut inside: Vec<Vec4> = Vec::with_capacity(4);

    for i in 0..3 {
        let current = triangle.p[i];
        let next = triangle.p[(i + 1) % 3];
        let d1 = plane.signed_distance(current);
        let d2 = plane.signed_distance(next);

        if d1 >= 0.0 {
            inside.push(current);
            if d2 < 0.0 {
                inside.push(intersection(current, next, d1, d2));
            }
        } else if d2 >= 0.0 {
            inside.push(intersection(current, next, d1, d2));
        }
    }

    // A vertex sitting exactly on the plane is emitted both as an
    // intersection (t = 0 or 1) and as an inside vertex; collapse such
    // coincident neighbors so the fan never yields zero-area triangles.
    dedup_coincident(&mut inside);
    fan_triangulate(&inside, triangle.color)
}

/// Clip a triangle against every plane in turn, feeding each plane's
/// output triangles into the next.
pub fn clip_to_planes(triangle: &Triangle, planes: &[Plane]) -> Vec<Triangle> {
    let mut triangles = vec![triangle.clone()];
    for plane in planes {
        triangles = triangles
            .iter()
            .flat_map(|tri| clip_to_plane(tri, plane))
            .collect();
        if triangles.is_empty() {
            break;
        }
    }
    triangles
}

/// Point on the edge from `start` to `end` where the signed distance
/// crosses zero.
fn intersection(start: Vec4, end: Vec4, d_start: f32, d_end: f32) -> Vec4 {
    let t = d_start / (d_start - d_end);
    start.lerp(end, t)
}

const COINCIDENT_EPSILON: f32 = 1e-6;

fn coincident(a: Vec4, b: Vec4) -> bool {
    (a - b).length() < COINCIDENT_EPSILON
}

/// Drop consecutive duplicate vertices, treating the polygon as closed
/// (the last vertex is also checked against the first).
fn dedup_coincident(vertices: &mut Vec<Vec4>) {
    vertices.dedup_by(|a, b| coincident(*a, *b));
    while let [first, .., last] = vertices.as_slice() {
        if !coincident(*first, *last) {
            break;
        }
        vertices.pop();
    }
}

fn fan_triangulate(vertices: &[Vec4], color: Option<u32>) -> Vec<Triangle> {
    (1..vertices.len().saturating_sub(1))
        .map(|i| {
            let mut tri = Triangle::new(vertices[0], vertices[i], vertices[i + 1]);
            tri.color = color;
            tri
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Keep everything with z >= 1.
    fn near_plane() -> Plane {
        Plane::new(Vec4::direction(0.0, 0.0, 1.0), -1.0)
    }

    fn area(tri: &Triangle) -> f32 {
        (tri.p[1] - tri.p[0]).cross(tri.p[2] - tri.p[0]).length() / 2.0
    }

    #[test]
    fn signed_distance_is_zero_on_plane() {
        assert_relative_eq!(near_plane().signed_distance(Vec4::point(3.0, -2.0, 1.0)), 0.0);
    }

    #[test]
    fn fully_inside_triangle_is_unchanged() {
        let tri = Triangle::new(
            Vec4::point(0.0, 0.0, 5.0),
            Vec4::point(1.0, 0.0, 5.0),
            Vec4::point(0.0, 1.0, 5.0),
        );
        let out = clip_to_plane(&tri, &near_plane());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].p, tri.p);
    }

    #[test]
    fn fully_outside_triangle_is_discarded() {
        let tri = Triangle::new(
            Vec4::point(0.0, 0.0, 0.0),
            Vec4::point(1.0, 0.0, 0.5),
            Vec4::point(0.0, 1.0, -2.0),
        );
        assert!(clip_to_plane(&tri, &near_plane()).is_empty());
    }

    #[test]
    fn one_vertex_inside_yields_one_triangle() {
        let tri = Triangle::new(
            Vec4::point(0.0, 0.0, 3.0),
            Vec4::point(1.0, 0.0, 0.0),
            Vec4::point(-1.0, 0.0, 0.0),
        );
        let out = clip_to_plane(&tri, &near_plane());
        assert_eq!(out.len(), 1);
        // Both new vertices sit on the plane.
        let plane = near_plane();
        assert_relative_eq!(plane.signed_distance(out[0].p[1]), 0.0, epsilon = 1e-6);
        assert_relative_eq!(plane.signed_distance(out[0].p[2]), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn two_vertices_inside_yield_two_triangles() {
        let tri = Triangle::new(
            Vec4::point(0.0, 0.0, 0.0),
            Vec4::point(1.0, 0.0, 2.0),
            Vec4::point(-1.0, 0.0, 2.0),
        );
        let out = clip_to_plane(&tri, &near_plane());
        assert_eq!(out.len(), 2);

        // The two triangles tile the clipped quad: the area above z=1 is
        // 3/4 of the original (similar-triangle ratio (1/2)^2 cut away).
        let original = area(&tri);
        let clipped: f32 = out.iter().map(area).sum();
        assert_relative_eq!(clipped, original * 0.75, epsilon = 1e-5);
    }

    #[test]
    fn on_plane_vertex_between_outside_vertices_yields_nothing() {
        // The middle vertex touches the plane exactly; the edge walk sees it
        // both as an intersection and as an inside vertex, which must not
        // become a zero-area triangle.
        let tri = Triangle::new(
            Vec4::point(1.0, 0.0, 0.0),
            Vec4::point(0.0, 0.0, 1.0),
            Vec4::point(-1.0, 0.0, 0.0),
        );
        assert!(clip_to_plane(&tri, &near_plane()).is_empty());
    }

    #[test]
    fn on_plane_vertex_with_one_outside_collapses_duplicates() {
        let tri = Triangle::new(
            Vec4::point(0.0, 0.0, 0.0),
            Vec4::point(0.0, 1.0, 1.0),
            Vec4::point(0.5, 0.0, 2.0),
        );
        let out = clip_to_plane(&tri, &near_plane());
        assert_eq!(out.len(), 1);
        assert!(area(&out[0]) > 1e-6);
    }

    #[test]
    fn clipping_preserves_winding() {
        let tri = Triangle::new(
            Vec4::point(0.0, 1.0, 2.0),
            Vec4::point(1.0, -1.0, 2.0),
            Vec4::point(-1.0, -1.0, 0.0),
        );
        let n_before = tri.normal().unwrap();
        for out in clip_to_plane(&tri, &near_plane()) {
            let n_after = out.normal().unwrap();
            assert!(n_before.dot(n_after) > 0.99);
        }
    }

    #[test]
    fn clip_to_planes_chains() {
        let planes = [
            near_plane(),
            // Keep z <= 4.
            Plane::new(Vec4::direction(0.0, 0.0, -1.0), 4.0),
        ];
        let tri = Triangle::new(
            Vec4::point(0.0, 0.0, 0.0),
            Vec4::point(1.0, 0.0, 5.0),
            Vec4::point(-1.0, 0.0, 5.0),
        );
        let out = clip_to_planes(&tri, &planes);
        assert!(!out.is_empty());
        for tri in &out {
            for p in &tri.p {
                assert!(p.z >= 1.0 - 1e-5 && p.z <= 4.0 + 1e-5);
            }
        }
    }

    #[test]
    fn clip_carries_color() {
        let mut tri = Triangle::new(
            Vec4::point(0.0, 0.0, 0.0),
            Vec4::point(1.0, 0.0, 2.0),
            Vec4::point(-1.0, 0.0, 2.0),
        );
        tri.set_color(0xFF808080);
        for out in clip_to_plane(&tri, &near_plane()) {
            assert_eq!(out.color, Some(0xFF808080));
        }
    }
}
