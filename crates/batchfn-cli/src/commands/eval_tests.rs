use batchfn_core::Colors;
use batchfn_vm::{NoopTracer, PrintTracer, Verbosity};
use indoc::indoc;

use super::batch::BatchError;
use super::eval::*;

fn eval(key: &str, batch: &str) -> Result<String, BatchError> {
    eval_with(key, batch, &[], None)
}

fn eval_with(
    key: &str,
    batch: &str,
    vectorize: &[&str],
    mask: Option<&[usize]>,
) -> Result<String, BatchError> {
    let vectorize: Vec<String> = vectorize.iter().map(|name| name.to_string()).collect();
    let source = BatchSource::Inline(batch.to_string());
    let outputs = evaluate_key(key, Some(&source), &vectorize, mask, &NoopTracer)?;
    Ok(serde_json::to_string(&outputs).unwrap())
}

fn trace(key: &str, batch: &str, vectorize: &[&str], verbosity: Verbosity) -> String {
    let vectorize: Vec<String> = vectorize.iter().map(|name| name.to_string()).collect();
    let source = BatchSource::Inline(batch.to_string());
    let tracer = PrintTracer::new(verbosity, Colors::OFF);
    evaluate_key(key, Some(&source), &vectorize, None, &tracer).unwrap();
    tracer.render()
}

#[test]
fn add_floats_broadcast() {
    let out = eval("add_floats", r#"{"size": 3, "inputs": {"A": [1, 2, 3], "B": 10}}"#).unwrap();

    insta::assert_snapshot!(out, @r#"{"Result":[11.0,12.0,13.0]}"#);
}

#[test]
fn masked_elements_are_null() {
    let out = eval_with(
        "add_floats",
        r#"{"size": 3, "inputs": {"A": [1, 2, 3], "B": 10}}"#,
        &[],
        Some(&[0, 2]),
    )
    .unwrap();

    insta::assert_snapshot!(out, @r#"{"Result":[11.0,null,13.0]}"#);
}

#[test]
fn empty_mask_outputs_nulls() {
    let out = eval_with(
        "add_floats",
        r#"{"size": 2, "inputs": {"A": 1, "B": 2}}"#,
        &[],
        Some(&[]),
    )
    .unwrap();

    insta::assert_snapshot!(out, @r#"{"Result":[null,null]}"#);
}

#[test]
fn vectorized_add_floats() {
    let out = eval_with(
        "add_floats",
        r#"{"size": 1, "inputs": {"A": [1, 2, 3], "B": 10}}"#,
        &["A"],
        None,
    )
    .unwrap();

    insta::assert_snapshot!(out, @r#"{"Result (List)":[[11.0,12.0,13.0]]}"#);
}

#[test]
fn vectorized_inputs_replay_cyclically() {
    let out = eval_with(
        "add_floats",
        r#"{"size": 2, "inputs": {"A (List)": [[1, 2, 3, 4], [5]], "B (List)": [[10, 20], []]}}"#,
        &["A", "B"],
        None,
    )
    .unwrap();

    insta::assert_snapshot!(out, @r#"{"Result (List)":[[11.0,22.0,13.0,24.0],[]]}"#);
}

#[test]
fn float_range_lists() {
    let out = eval(
        "float_range",
        r#"{"size": 2, "inputs": {"Amount": [3, 0], "Start": 1, "Step": 0.5}}"#,
    )
    .unwrap();

    insta::assert_snapshot!(out, @r#"{"Range":[[1.0,1.5,2.0],[]]}"#);
}

#[test]
fn list_append_defaults_to_empty_lists() {
    let out = eval("list_append.float", r#"{"size": 2, "inputs": {"Value": [1, 2]}}"#).unwrap();

    insta::assert_snapshot!(out, @r#"{"List":[[1.0],[2.0]]}"#);
}

#[test]
fn list_append_extends_given_lists() {
    let out = eval_with(
        "list_append.int",
        r#"{"size": 2, "inputs": {"List": [[5], [6, 7]], "Value": 0}}"#,
        &[],
        Some(&[1]),
    )
    .unwrap();

    insta::assert_snapshot!(out, @r#"{"List":[null,[6,7,0]]}"#);
}

#[test]
fn switch_float3() {
    let out = eval(
        "switch.float3",
        r#"{"size": 2, "inputs": {"Condition": [true, false], "True": [1, 2, 3], "False": [0, 0, 0]}}"#,
    )
    .unwrap();

    insta::assert_snapshot!(out, @r#"{"Result":[[1.0,2.0,3.0],[0.0,0.0,0.0]]}"#);
}

#[test]
fn text_length_counts_bytes() {
    let out = eval("text_length", r#"{"size": 2, "inputs": {"Text": ["héllo", ""]}}"#).unwrap();

    insta::assert_snapshot!(out, @r#"{"Length":[6,0]}"#);
}

#[test]
fn object_world_location() {
    let batch = indoc! {r#"
        {
          "size": 2,
          "inputs": { "Object": ["Cube", null] },
          "objects": {
            "Cube": { "transform": [1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 1, 2, 3, 1] }
          }
        }
    "#};

    let out = eval("object_world_location", batch).unwrap();

    insta::assert_snapshot!(out, @r#"{"Location":[[1.0,2.0,3.0],[0.0,0.0,0.0]]}"#);
}

#[test]
fn closest_point_through_spatial_index() {
    let batch = indoc! {r#"
        {
          "size": 2,
          "inputs": { "Object": "Plane", "Position": [[12, 2, 0], [0, 0, 0]] },
          "objects": {
            "Plane": {
              "transform": [1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 10, 0, 0, 1],
              "mesh": [[0, 0, 0], [1, 1, 0]]
            }
          },
          "context": { "spatial": true }
        }
    "#};

    let out = eval("closest_point_on_object", batch).unwrap();

    insta::assert_snapshot!(out, @r#"{"Closest Point":[[11.0,1.0,0.0],[10.0,0.0,0.0]]}"#);
}

#[test]
fn current_frame_from_context() {
    let out = eval("current_frame", r#"{"size": 2, "context": {"frame": 24}}"#).unwrap();

    insta::assert_snapshot!(out, @r#"{"Frame":[24.0,24.0]}"#);
}

#[test]
fn vertex_position_through_remap() {
    let batch = indoc! {r#"
        {
          "size": 3,
          "context": {
            "vertex_positions": { "positions": [[1, 0, 0], [0, 2, 0]], "remap": [1, null, 0] }
          }
        }
    "#};

    let out = eval("vertex_position", batch).unwrap();

    insta::assert_snapshot!(out, @r#"{"Position":[[0.0,2.0,0.0],[0.0,0.0,0.0],[1.0,0.0,0.0]]}"#);
}

#[test]
fn particle_attribute_key() {
    let batch = indoc! {r#"
        {
          "size": 3,
          "context": {
            "attributes": {
              "remap": [1, null, 0],
              "columns": { "Size": { "type": "float", "values": [2.5, 0.5] } }
            }
          }
        }
    "#};

    let out = eval("attribute.float.Size", batch).unwrap();

    insta::assert_snapshot!(out, @r#"{"Size":[0.5,0.0,2.5]}"#);
}

#[test]
fn missing_input() {
    let err = eval("add_floats", r#"{"size": 1, "inputs": {"A": 1}}"#).unwrap_err();

    insta::assert_snapshot!(err, @"missing input `B` for `Add Floats`");
}

#[test]
fn unknown_input() {
    let err = eval(
        "add_floats",
        r#"{"size": 1, "inputs": {"A": 1, "B": 2, "Result": 3}}"#,
    )
    .unwrap_err();

    insta::assert_snapshot!(err, @"`Add Floats` has no input named `Result`");
}

#[test]
fn input_length_mismatch() {
    let err = eval("add_floats", r#"{"size": 3, "inputs": {"A": [1, 2], "B": 0}}"#).unwrap_err();

    insta::assert_snapshot!(err, @"`A` holds 2 values, the batch size is 3");
}

#[test]
fn unknown_function_suggests() {
    let err = eval("add_flaots", r#"{"size": 1}"#).unwrap_err();

    insta::assert_snapshot!(err, @"unknown function `add_flaots`, did you mean `add_floats`?");
}

#[test]
fn vectorize_unknown_parameter() {
    let err = eval_with("add_floats", r#"{"size": 1}"#, &["C"], None).unwrap_err();

    insta::assert_snapshot!(err, @"`Add Floats` has no parameter named `C`");
}

#[test]
fn vectorize_output_is_rejected() {
    let err = eval_with("add_floats", r#"{"size": 1}"#, &["Result"], None).unwrap_err();

    insta::assert_snapshot!(err, @"cannot vectorize `Add Floats`: parameter `Result` is an output");
}

#[test]
fn missing_batch() {
    let err = evaluate_key("add_floats", None, &[], None, &NoopTracer).unwrap_err();

    insta::assert_snapshot!(err, @"batch is required: use --batch or --batch-json");
}

#[test]
fn trace_fallback() {
    let out = trace("current_frame", r#"{"size": 2}"#, &[], Verbosity::Default);

    insta::assert_snapshot!(out, @r"
    Current Frame mask=2/2
      fallback no scene time context
    ");
}

#[test]
fn trace_vectorized_sub_calls() {
    let out = trace(
        "add_floats",
        r#"{"size": 1, "inputs": {"A": [1, 2], "B": 10}}"#,
        &["A"],
        Verbosity::Verbose,
    );

    insta::assert_snapshot!(out, @r"
    Add Floats (Vectorized) mask=1/1
      vectorize index=0 length=2
      Add Floats mask=2/2
    ");
}
