//! Math value types.
//!
//! Vectors and matrices come from `glam`; colors are a plain RGBA struct.

pub use glam::{Mat4, Vec3};

/// Linear RGBA color with float channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}
