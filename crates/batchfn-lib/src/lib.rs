#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Built-in multi-functions for batchfn.
//!
//! - `functions`: arithmetic, color/vector composition, ranges, switches, object
//!   sampling, noise and context-sourced functions
//! - `scene`: the object, mesh and spatial-query collaborators those functions consume
//! - `contexts` / `attributes`: per-element context records
//! - `registry`: name → function lookup for front ends

pub mod attributes;
pub mod contexts;
pub mod functions;
pub mod noise;
pub mod registry;
pub mod scene;

#[cfg(test)]
mod registry_tests;
#[cfg(test)]
mod test_utils;

pub use attributes::AttributeStore;
pub use contexts::{ParticleAttributesContext, SceneTimeContext, VertexPositionArray};
pub use noise::{NoiseProvider, PerlinNoise};
pub use registry::{FunctionRegistry, RegistryError};
pub use scene::{
    Mesh, MeshAccess, NearestSurface, NearestVertex, Object, ObjectData, ObjectRef,
    ObjectSpatialIndex, SceneObject,
};
