//! The 2D drawing side of the pipeline.
//!
//! The scene's only contract with this layer is [`PolygonFill`]: exactly 3
//! screen-space points per call, in the triangle's original winding order,
//! with a solid color. [`Renderer`] is the built-in implementation; tests
//! substitute recording fills.

mod renderer;

pub use renderer::Renderer;

use crate::math::vec2::Vec2;

/// Fills the polygon enclosed by an ordered point list with a solid color.
pub trait PolygonFill {
    fn fill_triangle(&mut self, points: [Vec2; 3], color: u32);
}
