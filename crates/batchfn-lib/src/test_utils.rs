use std::sync::Arc;

use batchfn_core::{Colors, Mat4, Vec3};
use batchfn_vm::{Context, ContextBuilder, PrintTracer, Verbosity};

use crate::scene::{Mesh, Object, ObjectRef};

/// Run `f` with a context whose tracer records fallbacks; returns the rendered trace.
pub(crate) fn with_traced_context<R>(f: impl FnOnce(&Context<'_>) -> R) -> (R, String) {
    let tracer = PrintTracer::new(Verbosity::Default, Colors::OFF);
    let context = ContextBuilder::new().tracer(&tracer).build();
    let result = f(&context);
    drop(context);
    (result, tracer.render())
}

/// Corners of the unit square in the XY plane.
pub(crate) fn unit_square() -> Mesh {
    Mesh::new(vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ])
}

pub(crate) fn square_at(name: &str, translation: Vec3) -> ObjectRef {
    let object = Object::mesh(name, Mat4::from_translation(translation), unit_square());
    ObjectRef::new(Arc::new(object))
}

pub(crate) fn floats_close(actual: &[f32], expected: &[f32]) -> bool {
    actual.len() == expected.len()
        && actual
            .iter()
            .zip(expected)
            .all(|(a, b)| (a - b).abs() < 1e-5)
}
