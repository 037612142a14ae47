use std::sync::{Arc, Mutex};

use batchfn_core::{GenericVectorArray, IndexMask, Mat4, TypeDesc, Vec3};
use batchfn_vm::{Context, ContextBuilder, IndexRemap, MultiFunction, ParamsBuilder, execute};

use super::*;
use crate::scene::{
    MeshAccess, NearestSurface, NearestVertex, Object, ObjectRef, ObjectSpatialIndex, SceneObject,
};
use crate::test_utils::{square_at, unit_square, with_traced_context};

#[test]
fn vertex_positions_in_world_space() {
    let function = ObjectVertexPositions::new();
    let objects = vec![
        square_at("Square", Vec3::new(0.0, 0.0, 2.0)),
        ObjectRef::null(),
        ObjectRef::new(Arc::new(Object::empty("Empty", Mat4::IDENTITY))),
    ];
    let mut positions = GenericVectorArray::new(TypeDesc::of::<Vec3>(), 3);

    let mut builder = ParamsBuilder::new(function.signature(), 3);
    builder
        .add_single_input_vec(&objects)
        .add_vector_output(&mut positions);
    let mut params = builder.build();
    execute(&function, &IndexMask::range(3), &mut params, &Context::empty());
    drop(params);

    let positions = positions.into_lists::<Vec3>();
    assert_eq!(
        positions[0],
        vec![
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(1.0, 0.0, 2.0),
            Vec3::new(1.0, 1.0, 2.0),
            Vec3::new(0.0, 1.0, 2.0),
        ]
    );
    assert!(positions[1].is_empty());
    assert!(positions[2].is_empty());
}

#[test]
fn world_location_is_translation() {
    let function = ObjectWorldLocation::new();
    let objects = vec![square_at("Square", Vec3::new(1.0, -2.0, 3.0)), ObjectRef::null()];
    let mut locations = vec![Vec3::ONE; 2];

    let mut builder = ParamsBuilder::new(function.signature(), 2);
    builder
        .add_single_input_vec(&objects)
        .add_single_output_vec(&mut locations);
    let mut params = builder.build();
    execute(&function, &IndexMask::range(2), &mut params, &Context::empty());
    drop(params);

    assert_eq!(locations, vec![Vec3::new(1.0, -2.0, 3.0), Vec3::ZERO]);
}

fn closest_points(
    function: &ClosestPointOnObject,
    objects: &Vec<ObjectRef>,
    positions: &Vec<Vec3>,
    context: &Context<'_>,
) -> Vec<Vec3> {
    let mut points = vec![Vec3::splat(f32::NAN); positions.len()];
    let mut builder = ParamsBuilder::new(function.signature(), positions.len());
    builder
        .add_single_input_vec(objects)
        .add_single_input_vec(positions)
        .add_single_output_vec(&mut points);
    let mut params = builder.build();
    execute(
        function,
        &IndexMask::range(positions.len()),
        &mut params,
        context,
    );
    drop(params);
    points
}

#[test]
fn closest_point_through_spatial_index() {
    let function = ClosestPointOnObject::new();
    let square = square_at("Square", Vec3::new(10.0, 0.0, 0.0));
    let stranger = ObjectRef::new(Arc::new(Object::mesh("Stranger", Mat4::IDENTITY, unit_square())));
    let spatial = ObjectSpatialIndex::from_objects(square.get());

    let objects = vec![square.clone(), square, stranger, ObjectRef::null()];
    let positions = vec![
        Vec3::new(10.9, 0.8, 0.0),
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
    ];
    let context = ContextBuilder::new()
        .element_context(&spatial, IndexRemap::Identity)
        .build();

    let points = closest_points(&function, &objects, &positions, &context);
    assert_eq!(
        points,
        vec![
            Vec3::new(11.0, 1.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::ZERO,
        ]
    );
}

#[test]
fn provider_sees_world_space_position() {
    struct Recording {
        seen: Arc<Mutex<Vec<Vec3>>>,
    }

    impl NearestSurface for Recording {
        fn find_nearest(&self, point: Vec3) -> Option<Vec3> {
            self.seen.lock().unwrap().push(point);
            Some(point + Vec3::Z)
        }
    }

    let function = ClosestPointOnObject::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut spatial = ObjectSpatialIndex::new();
    spatial.insert("Square", Recording { seen: seen.clone() });
    let context = ContextBuilder::new()
        .element_context(&spatial, IndexRemap::Identity)
        .build();

    let objects = vec![square_at("Square", Vec3::new(10.0, 0.0, 0.0))];
    let positions = vec![Vec3::new(10.5, 0.5, 0.0)];
    let points = closest_points(&function, &objects, &positions, &context);

    assert_eq!(*seen.lock().unwrap(), vec![Vec3::new(10.5, 0.5, 0.0)]);
    assert_eq!(points, vec![Vec3::new(10.5, 0.5, 1.0)]);
}

#[test]
fn closest_point_miss_zeroes_only_that_index() {
    let function = ClosestPointOnObject::new();
    let mut spatial = ObjectSpatialIndex::new();
    spatial.insert(
        "Square",
        NearestVertex::new(vec![Vec3::new(10.0, 0.0, 0.0)]).with_max_distance_sq(1.0),
    );
    let context = ContextBuilder::new()
        .element_context(&spatial, IndexRemap::Identity)
        .build();

    let square = square_at("Square", Vec3::new(10.0, 0.0, 0.0));
    let objects = vec![square.clone(), square];
    let positions = vec![Vec3::new(10.5, 0.0, 0.0), Vec3::new(20.0, 0.0, 0.0)];
    let points = closest_points(&function, &objects, &positions, &context);

    assert_eq!(points, vec![Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO]);
}

#[test]
fn closest_point_without_spatial_index_falls_back() {
    let function = ClosestPointOnObject::new();
    let objects = vec![square_at("Square", Vec3::ZERO)];
    let positions = vec![Vec3::ONE];

    let (points, trace) =
        with_traced_context(|context| closest_points(&function, &objects, &positions, context));

    assert_eq!(points, vec![Vec3::ZERO]);
    insta::assert_snapshot!(trace, @r"
    Closest Point on Object mask=1/1
      fallback no spatial index context
    ");
}

#[test]
fn scene_object_trait_is_enough() {
    struct Marker;

    impl SceneObject for Marker {
        fn name(&self) -> &str {
            "Marker"
        }

        fn world_transform(&self) -> Mat4 {
            Mat4::from_translation(Vec3::new(0.0, 5.0, 0.0))
        }

        fn mesh(&self) -> Option<&dyn MeshAccess> {
            None
        }
    }

    let function = ObjectWorldLocation::new();
    let objects = vec![ObjectRef::new(Arc::new(Marker))];
    let mut locations = vec![Vec3::ZERO];

    let mut builder = ParamsBuilder::new(function.signature(), 1);
    builder
        .add_single_input_vec(&objects)
        .add_single_output_vec(&mut locations);
    let mut params = builder.build();
    execute(&function, &IndexMask::range(1), &mut params, &Context::empty());
    drop(params);

    assert_eq!(locations, vec![Vec3::new(0.0, 5.0, 0.0)]);
}
