//! Functions sampling scene objects.
//!
//! A null reference, or an object without the needed data, gives the default
//! result for that index: an empty list or the zero vector.

use batchfn_core::{IndexMask, Signature, SignatureBuilder, Vec3};
use batchfn_vm::{Context, MultiFunction, Params};

use crate::scene::{ObjectRef, ObjectSpatialIndex};

use super::impl_default_via_new;

/// World-space vertex positions of mesh objects.
pub struct ObjectVertexPositions {
    signature: Signature,
}

impl ObjectVertexPositions {
    pub fn new() -> Self {
        Self {
            signature: SignatureBuilder::new("Object Vertex Positions")
                .single_input::<ObjectRef>("Object")
                .vector_output::<Vec3>("Positions")
                .build(),
        }
    }
}

impl MultiFunction for ObjectVertexPositions {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, _context: &Context<'_>) {
        let objects = params.readonly_single_input::<ObjectRef>(0, "Object");
        let mut positions = params.vector_output::<Vec3>(1, "Positions");

        for i in mask {
            let Some(object) = objects[i].get() else {
                continue;
            };
            let Some(mesh) = object.mesh() else {
                continue;
            };
            let transform = object.world_transform();
            let world_positions = (0..mesh.vertex_count())
                .map(|j| transform.transform_point3(mesh.vertex_position(j)));
            positions.extend(i, world_positions);
        }
    }
}

/// Translation of the object-to-world matrix.
pub struct ObjectWorldLocation {
    signature: Signature,
}

impl ObjectWorldLocation {
    pub fn new() -> Self {
        Self {
            signature: SignatureBuilder::new("Object Location")
                .single_input::<ObjectRef>("Object")
                .single_output::<Vec3>("Location")
                .build(),
        }
    }
}

impl MultiFunction for ObjectWorldLocation {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, _context: &Context<'_>) {
        let objects = params.readonly_single_input::<ObjectRef>(0, "Object");
        let locations = params.uninitialized_single_output::<Vec3>(1, "Location");

        for i in mask {
            locations[i] = match objects[i].get() {
                Some(object) => object.world_transform().w_axis.truncate(),
                None => Vec3::ZERO,
            };
        }
    }
}

/// Nearest surface point of an object, through the `ObjectSpatialIndex` context.
///
/// The provider gets the world-space position unchanged and answers in world space.
pub struct ClosestPointOnObject {
    signature: Signature,
}

impl ClosestPointOnObject {
    pub fn new() -> Self {
        Self {
            signature: SignatureBuilder::new("Closest Point on Object")
                .single_input::<ObjectRef>("Object")
                .single_input::<Vec3>("Position")
                .single_output::<Vec3>("Closest Point")
                .build(),
        }
    }
}

impl MultiFunction for ClosestPointOnObject {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, context: &Context<'_>) {
        let objects = params.readonly_single_input::<ObjectRef>(0, "Object");
        let positions = params.readonly_single_input::<Vec3>(1, "Position");
        let r_points = params.uninitialized_single_output::<Vec3>(2, "Closest Point");

        let Some(spatial) = context.find_first::<ObjectSpatialIndex>() else {
            context
                .tracer()
                .trace_fallback(&self.signature, "no spatial index context");
            for i in mask {
                r_points[i] = Vec3::ZERO;
            }
            return;
        };

        for i in mask {
            r_points[i] =
                closest_point(spatial.data(), &objects[i], positions[i]).unwrap_or(Vec3::ZERO);
        }
    }
}

fn closest_point(
    spatial: &ObjectSpatialIndex,
    object: &ObjectRef,
    position: Vec3,
) -> Option<Vec3> {
    let object = object.get()?;
    spatial.get(object)?.find_nearest(position)
}

impl_default_via_new!(ObjectVertexPositions, ObjectWorldLocation, ClosestPointOnObject);
