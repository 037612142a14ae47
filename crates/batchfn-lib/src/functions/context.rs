//! Functions reading per-element context records.
//!
//! A missing record gives the default value at every masked index, never a
//! partial result.

use batchfn_core::{IndexMask, Signature, SignatureBuilder, TypeDesc, Vec3};
use batchfn_vm::{Context, MultiFunction, Params};

use crate::contexts::{ParticleAttributesContext, SceneTimeContext, VertexPositionArray};

use super::impl_default_via_new;

/// Position of the element's vertex, from a `VertexPositionArray` record.
pub struct ContextVertexPosition {
    signature: Signature,
}

impl ContextVertexPosition {
    pub fn new() -> Self {
        Self {
            signature: SignatureBuilder::new("Vertex Position")
                .single_output::<Vec3>("Position")
                .build(),
        }
    }
}

impl MultiFunction for ContextVertexPosition {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, context: &Context<'_>) {
        let positions = params.uninitialized_single_output::<Vec3>(0, "Position");

        let Some(vertices) = context.find_first::<VertexPositionArray>() else {
            context
                .tracer()
                .trace_fallback(&self.signature, "no vertex position context");
            for i in mask {
                positions[i] = Vec3::ZERO;
            }
            return;
        };

        let data = &vertices.data().positions;
        for i in mask {
            positions[i] = vertices
                .local(i)
                .and_then(|local| data.get(local).copied())
                .unwrap_or(Vec3::ZERO);
        }
    }
}

/// Current frame from a `SceneTimeContext` record, identical for every index.
pub struct ContextCurrentFrame {
    signature: Signature,
}

impl ContextCurrentFrame {
    pub fn new() -> Self {
        Self {
            signature: SignatureBuilder::new("Current Frame")
                .single_output::<f32>("Frame")
                .build(),
        }
    }
}

impl MultiFunction for ContextCurrentFrame {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, context: &Context<'_>) {
        let frames = params.uninitialized_single_output::<f32>(0, "Frame");

        let current_frame = match context.find_first::<SceneTimeContext>() {
            Some(time) => time.data().time,
            None => {
                context
                    .tracer()
                    .trace_fallback(&self.signature, "no scene time context");
                0.0
            }
        };
        for i in mask {
            frames[i] = current_frame;
        }
    }
}

/// Named attribute column from a `ParticleAttributesContext` record.
///
/// An absent column, or one of another type, gives the default value at every
/// masked index. An element without a remap entry gets the default value.
pub struct ParticleAttribute {
    name: String,
    ty: TypeDesc,
    signature: Signature,
}

impl ParticleAttribute {
    pub fn new(name: impl Into<String>, ty: TypeDesc) -> Self {
        let name = name.into();
        let signature = SignatureBuilder::new("Particle Attribute")
            .single_output_of(name.clone(), ty)
            .build();
        Self {
            name,
            ty,
            signature,
        }
    }

    pub fn attribute_name(&self) -> &str {
        &self.name
    }

    pub fn type_desc(&self) -> TypeDesc {
        self.ty
    }
}

impl MultiFunction for ParticleAttribute {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, context: &Context<'_>) {
        let mut output = params.single_output_generic(0, &self.name);

        let record = context.find_first::<ParticleAttributesContext>();
        let column = record.and_then(|record| {
            let column = record.data().attributes.try_get(&self.name, self.ty)?;
            Some((record, column))
        });

        let Some((record, column)) = column else {
            context.tracer().trace_fallback(
                &self.signature,
                &format!("attribute `{}` of type `{}` not found", self.name, self.ty),
            );
            for i in mask {
                output.construct_default(i);
            }
            return;
        };

        for i in mask {
            match record.local(i).filter(|&local| local < column.len()) {
                Some(local) => output.copy_in(i, column.element(local)),
                None => output.construct_default(i),
            }
        }
    }
}

impl_default_via_new!(ContextVertexPosition, ContextCurrentFrame);
