use batchfn_core::{IndexMask, Rgba, Signature, SignatureBuilder, Vec3};
use batchfn_vm::{Context, MultiFunction, Params};

use super::impl_default_via_new;

pub struct CombineColor {
    signature: Signature,
}

impl CombineColor {
    pub fn new() -> Self {
        Self {
            signature: SignatureBuilder::new("Combine Color")
                .single_input::<f32>("R")
                .single_input::<f32>("G")
                .single_input::<f32>("B")
                .single_input::<f32>("A")
                .single_output::<Rgba>("Color")
                .build(),
        }
    }
}

impl MultiFunction for CombineColor {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, _context: &Context<'_>) {
        let r = params.readonly_single_input::<f32>(0, "R");
        let g = params.readonly_single_input::<f32>(1, "G");
        let b = params.readonly_single_input::<f32>(2, "B");
        let a = params.readonly_single_input::<f32>(3, "A");
        let color = params.uninitialized_single_output::<Rgba>(4, "Color");

        for i in mask {
            color[i] = Rgba::new(r[i], g[i], b[i], a[i]);
        }
    }
}

pub struct SeparateColor {
    signature: Signature,
}

impl SeparateColor {
    pub fn new() -> Self {
        Self {
            signature: SignatureBuilder::new("Separate Color")
                .single_input::<Rgba>("Color")
                .single_output::<f32>("R")
                .single_output::<f32>("G")
                .single_output::<f32>("B")
                .single_output::<f32>("A")
                .build(),
        }
    }
}

impl MultiFunction for SeparateColor {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, _context: &Context<'_>) {
        let color = params.readonly_single_input::<Rgba>(0, "Color");
        let r = params.uninitialized_single_output::<f32>(1, "R");
        let g = params.uninitialized_single_output::<f32>(2, "G");
        let b = params.uninitialized_single_output::<f32>(3, "B");
        let a = params.uninitialized_single_output::<f32>(4, "A");

        for i in mask {
            let v = color[i];
            r[i] = v.r;
            g[i] = v.g;
            b[i] = v.b;
            a[i] = v.a;
        }
    }
}

pub struct CombineVector {
    signature: Signature,
}

impl CombineVector {
    pub fn new() -> Self {
        Self {
            signature: SignatureBuilder::new("Combine Vector")
                .single_input::<f32>("X")
                .single_input::<f32>("Y")
                .single_input::<f32>("Z")
                .single_output::<Vec3>("Vector")
                .build(),
        }
    }
}

impl MultiFunction for CombineVector {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, _context: &Context<'_>) {
        let x = params.readonly_single_input::<f32>(0, "X");
        let y = params.readonly_single_input::<f32>(1, "Y");
        let z = params.readonly_single_input::<f32>(2, "Z");
        let vector = params.uninitialized_single_output::<Vec3>(3, "Vector");

        for i in mask {
            vector[i] = Vec3::new(x[i], y[i], z[i]);
        }
    }
}

pub struct SeparateVector {
    signature: Signature,
}

impl SeparateVector {
    pub fn new() -> Self {
        Self {
            signature: SignatureBuilder::new("Separate Vector")
                .single_input::<Vec3>("Vector")
                .single_output::<f32>("X")
                .single_output::<f32>("Y")
                .single_output::<f32>("Z")
                .build(),
        }
    }
}

impl MultiFunction for SeparateVector {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, _context: &Context<'_>) {
        let vector = params.readonly_single_input::<Vec3>(0, "Vector");
        let x = params.uninitialized_single_output::<f32>(1, "X");
        let y = params.uninitialized_single_output::<f32>(2, "Y");
        let z = params.uninitialized_single_output::<f32>(3, "Z");

        for i in mask {
            let v = vector[i];
            x[i] = v.x;
            y[i] = v.y;
            z[i] = v.z;
        }
    }
}

impl_default_via_new!(CombineColor, SeparateColor, CombineVector, SeparateVector);
