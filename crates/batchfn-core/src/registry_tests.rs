use super::*;

#[test]
fn builtins_in_registration_order() {
    let registry = TypeRegistry::with_builtins();
    let names: Vec<_> = registry.iter().map(|t| t.name()).collect();
    assert_eq!(
        names,
        vec!["float", "int", "bool", "string", "float3", "float4x4", "rgba"]
    );
}

#[test]
fn lookup_by_name() {
    let registry = TypeRegistry::with_builtins();
    assert_eq!(registry.get("int").unwrap(), TypeDesc::of::<i32>());
    assert!(registry.contains("rgba"));
}

#[test]
fn unknown_type() {
    let registry = TypeRegistry::with_builtins();
    let err = registry.get("double").unwrap_err();
    insta::assert_snapshot!(err, @"unknown data type `double`");
}
