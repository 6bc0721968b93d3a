//! A CPU-based painter's-algorithm 3D renderer.
//!
//! The core pipeline takes triangle meshes, a camera and light sources and
//! produces an ordered, lit, screen-space triangle list: world space to
//! view space to projection, backface culling, per-triangle Lambertian
//! lighting, and back-to-front depth sorting. SDL2 is used only for window
//! management and display; every pixel is produced on the CPU.
//!
//! # Quick Start
//!
//! ```ignore
//! use painterly::prelude::*;
//!
//! let mut scene = Scene::new(SceneConfig::default());
//! scene.add_mesh("cube", Mesh::cube().translate(0.0, 0.0, 40.0));
//! scene.add_light("key", Light::new(
//!     Vec4::point(0.0, 0.0, 0.0),
//!     Vec4::direction(0.0, 0.0, -1.0),
//!     0.6,
//! ));
//! let frame = scene.build_frame(); // back-to-front ScreenTriangles
//! ```

pub mod clipping;
pub mod colors;
pub mod light;
pub mod math;
pub mod mesh;
pub mod render;
pub mod scene;
pub mod triangle;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use light::Light;
pub use mesh::{LoadError, Mesh};
pub use scene::{Scene, SceneConfig, ScreenTriangle};
pub use triangle::Triangle;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use painterly::prelude::*;
/// ```
pub mod prelude {
    // Scene
    pub use crate::scene::{Scene, SceneConfig, ScreenTriangle};

    // Geometry
    pub use crate::light::Light;
    pub use crate::mesh::{LoadError, Mesh};
    pub use crate::triangle::Triangle;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec4::Vec4;

    // Clipping
    pub use crate::clipping::{clip_to_plane, clip_to_planes, Plane};

    // Rendering
    pub use crate::render::{PolygonFill, Renderer};

    // Window
    pub use crate::window::{FrameLimiter, Window, WindowEvent};
}
