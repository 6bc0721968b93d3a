//! Point light with a Lambertian per-triangle contribution.

use crate::math::vec4::Vec4;
use crate::triangle::Triangle;

/// A light source with a position, a facing direction and a brightness
/// scalar in [0, 1]. Immutable after construction.
pub struct Light {
    position: Vec4,
    direction: Vec4,
    brightness: f32,
}

impl Light {
    /// The direction is normalized on the way in.
    pub fn new(position: Vec4, direction: Vec4, brightness: f32) -> Self {
        Self {
            position,
            direction: direction.normalize(),
            brightness,
        }
    }

    pub fn position(&self) -> Vec4 {
        self.position
    }

    pub fn direction(&self) -> Vec4 {
        self.direction
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Lambertian contribution for one triangle: the cosine of the angle
    /// between the surface normal and the direction toward the light,
    /// scaled by brightness.
    ///
    /// May be negative when the light sits behind the face; the scene sums
    /// contributions across lights and only clamps the total. Degenerate
    /// triangles contribute nothing.
    pub fn luminosity(&self, triangle: &Triangle) -> f32 {
        let Some(normal) = triangle.normal() else {
            return 0.0;
        };
        let to_light = self.position - triangle.center();
        if to_light.length() == 0.0 {
            return 0.0;
        }
        normal.dot(to_light.normalize()) * self.brightness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn facing_origin() -> Triangle {
        Triangle::new(
            Vec4::point(0.0, 1.0, 5.0),
            Vec4::point(1.0, -1.0, 5.0),
            Vec4::point(-1.0, -1.0, 5.0),
        )
    }

    #[test]
    fn head_on_light_gives_full_brightness() {
        // Triangle normal is -z; a light straight down the axis at the
        // origin sees the face dead on.
        let light = Light::new(Vec4::point(0.0, 0.0, 0.0), Vec4::direction(0.0, 0.0, 1.0), 1.0);
        let tri = facing_origin();
        let expected = tri
            .normal()
            .unwrap()
            .dot((Vec4::point(0.0, 0.0, 0.0) - tri.center()).normalize());
        assert_relative_eq!(light.luminosity(&tri), expected, epsilon = 1e-6);
        assert!(light.luminosity(&tri) > 0.9);
    }

    #[test]
    fn brightness_scales_contribution() {
        let dim = Light::new(Vec4::point(0.0, 0.0, 0.0), Vec4::direction(0.0, 0.0, 1.0), 0.25);
        let full = Light::new(Vec4::point(0.0, 0.0, 0.0), Vec4::direction(0.0, 0.0, 1.0), 1.0);
        let tri = facing_origin();
        assert_relative_eq!(
            dim.luminosity(&tri),
            full.luminosity(&tri) * 0.25,
            epsilon = 1e-6
        );
    }

    #[test]
    fn light_behind_face_is_negative() {
        let behind = Light::new(
            Vec4::point(0.0, 0.0, 100.0),
            Vec4::direction(0.0, 0.0, -1.0),
            1.0,
        );
        assert!(behind.luminosity(&facing_origin()) < 0.0);
    }

    #[test]
    fn degenerate_triangle_contributes_nothing() {
        let light = Light::new(Vec4::point(0.0, 0.0, 0.0), Vec4::direction(0.0, 0.0, 1.0), 1.0);
        let flat = Triangle::new(
            Vec4::point(0.0, 0.0, 1.0),
            Vec4::point(0.0, 0.0, 2.0),
            Vec4::point(0.0, 0.0, 3.0),
        );
        assert_relative_eq!(light.luminosity(&flat), 0.0);
    }

    #[test]
    fn direction_is_normalized_on_construction() {
        let light = Light::new(Vec4::point(0.0, 0.0, 0.0), Vec4::direction(0.0, 0.0, 9.0), 1.0);
        assert_relative_eq!(light.direction().length(), 1.0, epsilon = 1e-6);
    }
}
