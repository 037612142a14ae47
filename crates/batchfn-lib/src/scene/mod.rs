//! Scene collaborators: objects, meshes and spatial queries.
//!
//! Functions only read scene data through `SceneObject` and `MeshAccess`; the
//! concrete `Object` and `Mesh` types here are a minimal in-memory scene.

mod spatial;

#[cfg(test)]
mod spatial_tests;

use std::fmt;
use std::sync::Arc;

use batchfn_core::{Mat4, Vec3};

pub use spatial::{DEFAULT_MAX_DISTANCE_SQ, NearestSurface, NearestVertex, ObjectSpatialIndex};

/// Read access to mesh vertices in object-local coordinates.
pub trait MeshAccess: Send + Sync {
    fn vertex_count(&self) -> usize;

    fn vertex_position(&self, index: usize) -> Vec3;
}

/// An object placed in the scene.
pub trait SceneObject: Send + Sync {
    fn name(&self) -> &str;

    /// Object-to-world matrix.
    fn world_transform(&self) -> Mat4;

    /// Mesh data, or `None` when the object is not a mesh.
    fn mesh(&self) -> Option<&dyn MeshAccess>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
}

impl Mesh {
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self { positions }
    }
}

impl MeshAccess for Mesh {
    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    fn vertex_position(&self, index: usize) -> Vec3 {
        self.positions[index]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ObjectData {
    Mesh(Mesh),
    /// Transform only, no geometry.
    Empty,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    pub name: String,
    pub transform: Mat4,
    pub data: ObjectData,
}

impl Object {
    pub fn mesh(name: impl Into<String>, transform: Mat4, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            transform,
            data: ObjectData::Mesh(mesh),
        }
    }

    pub fn empty(name: impl Into<String>, transform: Mat4) -> Self {
        Self {
            name: name.into(),
            transform,
            data: ObjectData::Empty,
        }
    }
}

impl SceneObject for Object {
    fn name(&self) -> &str {
        &self.name
    }

    fn world_transform(&self) -> Mat4 {
        self.transform
    }

    fn mesh(&self) -> Option<&dyn MeshAccess> {
        match &self.data {
            ObjectData::Mesh(mesh) => Some(mesh),
            ObjectData::Empty => None,
        }
    }
}

/// Nullable shared reference to a scene object; the `object` data type.
#[derive(Clone, Default)]
pub struct ObjectRef(Option<Arc<dyn SceneObject>>);

impl ObjectRef {
    pub fn new(object: Arc<dyn SceneObject>) -> Self {
        Self(Some(object))
    }

    pub fn null() -> Self {
        Self(None)
    }

    pub fn get(&self) -> Option<&dyn SceneObject> {
        self.0.as_deref()
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(object) => f.debug_tuple("ObjectRef").field(&object.name()).finish(),
            None => f.write_str("ObjectRef(null)"),
        }
    }
}

batchfn_core::impl_data_type! {
    ObjectRef => "object",
}
