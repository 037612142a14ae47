use std::borrow::Cow;

use batchfn_core::{Colors, GenericArray, IndexMask, TypeDesc, Vec3};
use batchfn_vm::{
    Context, ContextBuilder, IndexRemap, MultiFunction, ParamsBuilder, PrintTracer, Verbosity,
    execute,
};

use super::*;
use crate::attributes::AttributeStore;
use crate::contexts::{ParticleAttributesContext, SceneTimeContext, VertexPositionArray};
use crate::test_utils::with_traced_context;

fn vertex_positions(len: usize, context: &Context<'_>) -> Vec<Vec3> {
    let function = ContextVertexPosition::new();
    let mut positions = vec![Vec3::splat(f32::NAN); len];
    let mut builder = ParamsBuilder::new(function.signature(), len);
    builder.add_single_output_vec(&mut positions);
    let mut params = builder.build();
    execute(&function, &IndexMask::range(len), &mut params, context);
    drop(params);
    positions
}

#[test]
fn vertex_position_follows_remap() {
    let vertices = VertexPositionArray {
        positions: vec![Vec3::X, Vec3::Y, Vec3::Z],
    };
    let remap = IndexRemap::Table(Cow::Owned(vec![Some(2), Some(0), None, Some(7)]));
    let context = ContextBuilder::new()
        .element_context(&vertices, remap)
        .build();

    let positions = vertex_positions(4, &context);

    assert_eq!(positions, vec![Vec3::Z, Vec3::X, Vec3::ZERO, Vec3::ZERO]);
}

#[test]
fn vertex_position_constant_remap() {
    let vertices = VertexPositionArray {
        positions: vec![Vec3::X, Vec3::Y],
    };
    let context = ContextBuilder::new()
        .element_context(&vertices, IndexRemap::Constant(1))
        .build();

    assert_eq!(vertex_positions(3, &context), vec![Vec3::Y; 3]);
}

#[test]
fn vertex_position_without_context_is_zero() {
    let (positions, trace) = with_traced_context(|context| vertex_positions(2, context));

    assert_eq!(positions, vec![Vec3::ZERO; 2]);
    insta::assert_snapshot!(trace, @r"
    Vertex Position mask=2/2
      fallback no vertex position context
    ");
}

fn current_frames(len: usize, context: &Context<'_>) -> Vec<f32> {
    let function = ContextCurrentFrame::new();
    let mut frames = vec![f32::NAN; len];
    let mut builder = ParamsBuilder::new(function.signature(), len);
    builder.add_single_output_vec(&mut frames);
    let mut params = builder.build();
    execute(&function, &IndexMask::range(len), &mut params, context);
    drop(params);
    frames
}

#[test]
fn current_frame_is_shared() {
    let context = ContextBuilder::new()
        .owned_element_context(SceneTimeContext { time: 42.5 }, IndexRemap::Identity)
        .build();

    assert_eq!(current_frames(3, &context), vec![42.5; 3]);
}

#[test]
fn current_frame_defaults_to_zero() {
    let (frames, trace) = with_traced_context(|context| current_frames(1, context));

    assert_eq!(frames, vec![0.0]);
    insta::assert_snapshot!(trace, @r"
    Current Frame mask=1/1
      fallback no scene time context
    ");
}

fn particle_store() -> ParticleAttributesContext {
    let mut attributes = AttributeStore::new();
    attributes.insert("Size", GenericArray::from_vec(vec![0.5_f32, 1.5, 2.5]));
    attributes.insert("Id", GenericArray::from_vec(vec![7_i32, 8, 9]));
    ParticleAttributesContext { attributes }
}

#[test]
fn particle_attribute_reads_column() {
    let function = ParticleAttribute::new("Size", TypeDesc::of::<f32>());
    let store = particle_store();
    let remap = IndexRemap::Table(Cow::Owned(vec![Some(2), None, Some(0)]));
    let context = ContextBuilder::new().element_context(&store, remap).build();
    let mut sizes = vec![-1.0_f32; 3];

    let mut builder = ParamsBuilder::new(function.signature(), 3);
    builder.add_single_output_vec(&mut sizes);
    let mut params = builder.build();
    execute(&function, &IndexMask::range(3), &mut params, &context);
    drop(params);

    assert_eq!(function.signature().param_name(0), "Size");
    assert_eq!(sizes, vec![2.5, 0.0, 0.5]);
}

#[test]
fn particle_attribute_type_mismatch_gives_defaults() {
    let function = ParticleAttribute::new("Id", TypeDesc::of::<f32>());
    let store = particle_store();
    let tracer = PrintTracer::new(Verbosity::Default, Colors::OFF);
    let context = ContextBuilder::new()
        .element_context(&store, IndexRemap::Identity)
        .tracer(&tracer)
        .build();
    let mut ids = vec![-1.0_f32; 3];

    let mut builder = ParamsBuilder::new(function.signature(), 3);
    builder.add_single_output_vec(&mut ids);
    let mut params = builder.build();
    execute(
        &function,
        &IndexMask::from_indices(vec![0, 2]),
        &mut params,
        &context,
    );
    drop(params);

    assert_eq!(ids, vec![0.0, -1.0, 0.0]);
    insta::assert_snapshot!(tracer.render(), @r"
    Particle Attribute mask=2/3
      fallback attribute `Id` of type `float` not found
    ");
}

#[test]
fn particle_attribute_missing_name_gives_defaults() {
    let function = ParticleAttribute::new("Color", TypeDesc::of::<String>());
    let store = particle_store();
    let context = ContextBuilder::new()
        .element_context(&store, IndexRemap::Identity)
        .build();
    let mut values = vec!["stale".to_string(); 2];

    let mut builder = ParamsBuilder::new(function.signature(), 2);
    builder.add_single_output_vec(&mut values);
    let mut params = builder.build();
    execute(&function, &IndexMask::range(2), &mut params, &context);
    drop(params);

    assert_eq!(values, vec![String::new(), String::new()]);
}
