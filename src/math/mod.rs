//! Fixed-size vector and matrix types for the transform chain.

pub mod mat4;
pub mod vec2;
pub mod vec4;
