//! Context record types consumed by the built-in functions.
//!
//! Each is attached to a call's `ElementContexts` together with an index remap
//! from global element indices into its own data.

use batchfn_core::Vec3;

use crate::attributes::AttributeStore;

/// Vertex positions addressed through the record's remap.
#[derive(Clone, Debug, Default)]
pub struct VertexPositionArray {
    pub positions: Vec<Vec3>,
}

/// Current scene time, shared by every element.
#[derive(Clone, Copy, Debug, Default)]
pub struct SceneTimeContext {
    pub time: f32,
}

/// Per-particle attribute columns.
#[derive(Debug, Default)]
pub struct ParticleAttributesContext {
    pub attributes: AttributeStore,
}
