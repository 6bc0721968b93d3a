//! Triangle value object.
//!
//! Vertices are stored in clockwise winding order as authored. Transform
//! operations return a new triangle; only [`Triangle::set_color`] and
//! [`Triangle::flip`] mutate in place.

use crate::math::mat4::Mat4;
use crate::math::vec4::Vec4;

/// Cross products shorter than this count as a degenerate (collinear) face.
const DEGENERATE_EPSILON: f32 = 1e-12;

#[derive(Clone, Debug, PartialEq)]
pub struct Triangle {
    pub p: [Vec4; 3],
    /// Solid packed-ARGB fill color; unset until lighting is computed.
    pub color: Option<u32>,
}

impl Triangle {
    pub fn new(p0: Vec4, p1: Vec4, p2: Vec4) -> Self {
        Self {
            p: [p0, p1, p2],
            color: None,
        }
    }

    /// Unit surface normal, or `None` when the points are collinear and the
    /// cross product has no usable direction.
    ///
    /// Clockwise winding yields a normal pointing toward the viewer for
    /// correctly wound front faces.
    pub fn normal(&self) -> Option<Vec4> {
        let edge1 = self.p[1] - self.p[0];
        let edge2 = self.p[2] - self.p[0];
        let n = edge1.cross(edge2);
        if n.length() < DEGENERATE_EPSILON {
            return None;
        }
        Some(n.normalize())
    }

    /// Arithmetic mean of the three vertices (w = 1).
    pub fn center(&self) -> Vec4 {
        Vec4::point(
            (self.p[0].x + self.p[1].x + self.p[2].x) / 3.0,
            (self.p[0].y + self.p[1].y + self.p[2].y) / 3.0,
            (self.p[0].z + self.p[1].z + self.p[2].z) / 3.0,
        )
    }

    /// Returns a new triangle with every vertex multiplied by `mat`.
    /// The color is carried over.
    pub fn transformed(&self, mat: Mat4) -> Self {
        Self {
            p: [self.p[0] * mat, self.p[1] * mat, self.p[2] * mat],
            color: self.color,
        }
    }

    /// Returns a new triangle with every vertex projected through `mat`
    /// (perspective divide on x and y where w is non-zero).
    pub fn projected(&self, mat: Mat4) -> Self {
        Self {
            p: [
                mat.project(self.p[0]),
                mat.project(self.p[1]),
                mat.project(self.p[2]),
            ],
            color: self.color,
        }
    }

    pub fn set_color(&mut self, color: u32) {
        self.color = Some(color);
    }

    /// Reverses the winding order, flipping the normal.
    pub fn flip(&mut self) {
        self.p.swap(1, 2);
    }
}
