//! Nearest-surface queries.

use batchfn_core::{Mat4, Vec3};
use indexmap::IndexMap;

use super::{MeshAccess, SceneObject};

/// Squared search radius used when none is configured.
pub const DEFAULT_MAX_DISTANCE_SQ: f32 = 10_000_000.0;

/// Nearest-point provider for one object, in world space.
pub trait NearestSurface: Send + Sync {
    /// Nearest surface point to the world-space `point`, or `None` when nothing is in range.
    fn find_nearest(&self, point: Vec3) -> Option<Vec3>;
}

/// Brute-force nearest vertex search.
#[derive(Clone, Debug)]
pub struct NearestVertex {
    positions: Vec<Vec3>,
    max_distance_sq: f32,
}

impl NearestVertex {
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            max_distance_sq: DEFAULT_MAX_DISTANCE_SQ,
        }
    }

    /// Vertices of `mesh` moved by `transform`.
    pub fn from_mesh(mesh: &dyn MeshAccess, transform: Mat4) -> Self {
        Self::new(
            (0..mesh.vertex_count())
                .map(|i| transform.transform_point3(mesh.vertex_position(i)))
                .collect(),
        )
    }

    /// Only vertices strictly closer than `sqrt(distance_sq)` count as hits.
    pub fn with_max_distance_sq(mut self, distance_sq: f32) -> Self {
        self.max_distance_sq = distance_sq;
        self
    }
}

impl NearestSurface for NearestVertex {
    fn find_nearest(&self, point: Vec3) -> Option<Vec3> {
        let mut best = None;
        let mut best_distance_sq = self.max_distance_sq;
        for &position in &self.positions {
            let distance_sq = position.distance_squared(point);
            if distance_sq < best_distance_sq {
                best_distance_sq = distance_sq;
                best = Some(position);
            }
        }
        best
    }
}

/// Spatial providers keyed by object name. Attached as a context record.
#[derive(Default)]
pub struct ObjectSpatialIndex {
    providers: IndexMap<String, Box<dyn NearestSurface>>,
}

impl ObjectSpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// A `NearestVertex` provider over the world-space vertices of every mesh object.
    pub fn from_objects<'o>(objects: impl IntoIterator<Item = &'o dyn SceneObject>) -> Self {
        let mut index = Self::new();
        for object in objects {
            if let Some(mesh) = object.mesh() {
                let transform = object.world_transform();
                index.insert(object.name(), NearestVertex::from_mesh(mesh, transform));
            }
        }
        index
    }

    pub fn insert(&mut self, name: impl Into<String>, provider: impl NearestSurface + 'static) {
        self.providers.insert(name.into(), Box::new(provider));
    }

    pub fn get(&self, object: &dyn SceneObject) -> Option<&dyn NearestSurface> {
        self.providers.get(object.name()).map(|provider| provider.as_ref())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
