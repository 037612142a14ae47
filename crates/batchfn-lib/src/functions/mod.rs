//! Built-in multi-functions.
//!
//! Every function builds its `Signature` once in its constructor and touches
//! outputs only at masked indices.

mod compose;
mod context;
mod math;
mod noise;
mod object;
mod range;
mod switch;
mod text;

#[cfg(test)]
mod context_tests;
#[cfg(test)]
mod object_tests;
#[cfg(test)]
mod text_tests;

pub use compose::{CombineColor, CombineVector, SeparateColor, SeparateVector};
pub use context::{ContextCurrentFrame, ContextVertexPosition, ParticleAttribute};
pub use math::{AddFloat3s, AddFloats, Clamp, FloatArraySum, MapRange, VectorDistance};
pub use noise::{PerlinNoise1d, PerlinNoise3d};
pub use object::{ClosestPointOnObject, ObjectVertexPositions, ObjectWorldLocation};
pub use range::FloatRange;
pub use switch::{ListAppend, SwitchSingle, SwitchVector};
pub use text::TextLength;

/// `Default` for functions whose `new()` takes no arguments.
macro_rules! impl_default_via_new {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Default for $ty {
                fn default() -> Self {
                    Self::new()
                }
            }
        )*
    };
}

pub(crate) use impl_default_via_new;
