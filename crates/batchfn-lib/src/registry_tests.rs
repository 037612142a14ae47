use batchfn_core::{TypeDesc, Vec3};

use super::*;
use crate::registry::edit_distance;

#[test]
fn builtins_cover_every_function() {
    let registry = FunctionRegistry::builtins();
    for key in [
        "add_floats",
        "add_float3s",
        "vector_distance",
        "float_array_sum",
        "map_range",
        "clamp",
        "combine_color",
        "separate_color",
        "combine_vector",
        "separate_vector",
        "float_range",
        "text_length",
        "object_vertex_positions",
        "object_world_location",
        "closest_point_on_object",
        "perlin_noise_3d_to_1d",
        "perlin_noise_3d_to_3d",
        "vertex_position",
        "current_frame",
    ] {
        assert!(registry.get(key).is_some(), "missing `{key}`");
    }
}

#[test]
fn generic_functions_per_type() {
    let registry = FunctionRegistry::builtins();
    let switch = registry.try_get("switch.float3").unwrap();
    assert_eq!(switch.name(), "Switch");
    assert_eq!(switch.signature().param_type(3).type_desc(), TypeDesc::of::<Vec3>());

    assert!(registry.get("switch_list.object").is_some());
    assert!(registry.get("list_append.string").is_some());
    // 19 fixed functions, 3 generic ones for 8 types.
    assert_eq!(registry.len(), 19 + 3 * 8);
}

#[test]
fn unknown_function_suggests_close_key() {
    let registry = FunctionRegistry::builtins();
    let Err(err) = registry.try_get("add_flaots") else {
        panic!("expected an error");
    };
    insta::assert_snapshot!(err.to_string(), @"unknown function `add_flaots`, did you mean `add_floats`?");

    let Err(err) = registry.try_get("frobnicate") else {
        panic!("expected an error");
    };
    insta::assert_snapshot!(err.to_string(), @"unknown function `frobnicate`");
}

#[test]
fn suggestion_covers_typed_keys() {
    let registry = FunctionRegistry::builtins();
    assert_eq!(registry.suggest("SWITCH.FLAOT").as_deref(), Some("switch.float"));
    assert_eq!(registry.suggest("list_apend.int").as_deref(), Some("list_append.int"));
    assert_eq!(registry.suggest("switch.quaternion"), None);
}

#[test]
fn edit_distance_counts_single_edits() {
    assert_eq!(edit_distance("", "clamp"), 5);
    assert_eq!(edit_distance("clamp", ""), 5);
    assert_eq!(edit_distance("clamp", "clamp"), 0);
    assert_eq!(edit_distance("clmp", "clamp"), 1);
    assert_eq!(edit_distance("clamps", "clamp"), 1);
    assert_eq!(edit_distance("clamq", "clamp"), 1);
    assert_eq!(edit_distance("kitten", "sitting"), 3);
}

#[test]
fn resolve_builds_attribute_readers() {
    let registry = FunctionRegistry::builtins();
    let function = registry.resolve("attribute.float.Size").unwrap();
    assert_eq!(function.name(), "Particle Attribute");
    assert_eq!(function.signature().param_name(0), "Size");

    // Dots after the type belong to the attribute name.
    let function = registry.resolve("attribute.int.a.b").unwrap();
    assert_eq!(function.signature().param_name(0), "a.b");

    assert!(registry.resolve("clamp").is_ok());
}

#[test]
fn resolve_rejects_bad_attribute_keys() {
    let registry = FunctionRegistry::builtins();
    let errors: Vec<String> = ["attribute.float", "attribute.float.", "attribute.quat.Size"]
        .into_iter()
        .map(|key| match registry.resolve(key) {
            Ok(_) => panic!("`{key}` resolved"),
            Err(err) => err.to_string(),
        })
        .collect();
    insta::assert_snapshot!(errors.join("\n"), @r"
    malformed attribute key `attribute.float`, expected `attribute.<type>.<name>`
    malformed attribute key `attribute.float.`, expected `attribute.<type>.<name>`
    unknown data type `quat`
    ");
}

#[test]
fn object_type_is_registered() {
    let registry = FunctionRegistry::builtins();
    assert!(registry.types().contains("object"));
    assert_eq!(registry.types().len(), 8);
}
