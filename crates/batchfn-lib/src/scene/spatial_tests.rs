use batchfn_core::{Mat4, Vec3};

use super::*;

#[test]
fn nearest_vertex_picks_closest() {
    let search = NearestVertex::new(vec![Vec3::ZERO, Vec3::X * 4.0, Vec3::Y * 2.0]);
    assert_eq!(search.find_nearest(Vec3::new(3.0, 0.0, 0.0)), Some(Vec3::X * 4.0));
    assert_eq!(search.find_nearest(Vec3::new(0.1, 1.5, 0.0)), Some(Vec3::Y * 2.0));
}

#[test]
fn nearest_vertex_respects_radius() {
    let search = NearestVertex::new(vec![Vec3::X]).with_max_distance_sq(1.0);
    // Exactly on the radius is a miss.
    assert_eq!(search.find_nearest(Vec3::new(2.0, 0.0, 0.0)), None);
    assert_eq!(search.find_nearest(Vec3::new(1.5, 0.0, 0.0)), Some(Vec3::X));
}

#[test]
fn nearest_vertex_of_empty_mesh() {
    let search = NearestVertex::from_mesh(&Mesh::default(), Mat4::IDENTITY);
    assert_eq!(search.find_nearest(Vec3::ZERO), None);
}

#[test]
fn default_radius_excludes_far_points() {
    let search = NearestVertex::new(vec![Vec3::ZERO]);
    assert_eq!(search.find_nearest(Vec3::new(5000.0, 0.0, 0.0)), None);
    assert_eq!(search.find_nearest(Vec3::new(3000.0, 0.0, 0.0)), Some(Vec3::ZERO));
}

#[test]
fn index_covers_mesh_objects_only() {
    let square = Object::mesh("Square", Mat4::IDENTITY, Mesh::new(vec![Vec3::ONE]));
    let empty = Object::empty("Empty", Mat4::IDENTITY);
    let objects: [&dyn SceneObject; 2] = [&square, &empty];

    let index = ObjectSpatialIndex::from_objects(objects);

    assert_eq!(index.len(), 1);
    assert!(index.get(&empty).is_none());
    let provider = index.get(&square).expect("square is indexed");
    assert_eq!(provider.find_nearest(Vec3::ZERO), Some(Vec3::ONE));
}

#[test]
fn index_moves_vertices_to_world_space() {
    let transform = Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0));
    let square = Object::mesh("Square", transform, Mesh::new(vec![Vec3::ZERO, Vec3::Y]));
    let objects: [&dyn SceneObject; 1] = [&square];

    let index = ObjectSpatialIndex::from_objects(objects);

    let provider = index.get(&square).expect("square is indexed");
    let hit = provider.find_nearest(Vec3::new(9.0, 0.2, 0.0));
    assert_eq!(hit, Some(Vec3::new(10.0, 0.0, 0.0)));
    let hit = provider.find_nearest(Vec3::new(10.0, 0.9, 0.0));
    assert_eq!(hit, Some(Vec3::new(10.0, 1.0, 0.0)));
}
