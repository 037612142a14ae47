use batchfn_core::{IndexMask, Signature, SignatureBuilder, Vec3};
use batchfn_vm::{Context, MultiFunction, Params};

use super::impl_default_via_new;

pub struct AddFloats {
    signature: Signature,
}

impl AddFloats {
    pub fn new() -> Self {
        Self {
            signature: SignatureBuilder::new("Add Floats")
                .single_input::<f32>("A")
                .single_input::<f32>("B")
                .single_output::<f32>("Result")
                .build(),
        }
    }
}

impl MultiFunction for AddFloats {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, _context: &Context<'_>) {
        let a = params.readonly_single_input::<f32>(0, "A");
        let b = params.readonly_single_input::<f32>(1, "B");
        let result = params.uninitialized_single_output::<f32>(2, "Result");

        for i in mask {
            result[i] = a[i] + b[i];
        }
    }
}

pub struct AddFloat3s {
    signature: Signature,
}

impl AddFloat3s {
    pub fn new() -> Self {
        Self {
            signature: SignatureBuilder::new("Add Float3s")
                .single_input::<Vec3>("A")
                .single_input::<Vec3>("B")
                .single_output::<Vec3>("Result")
                .build(),
        }
    }
}

impl MultiFunction for AddFloat3s {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, _context: &Context<'_>) {
        let a = params.readonly_single_input::<Vec3>(0, "A");
        let b = params.readonly_single_input::<Vec3>(1, "B");
        let result = params.uninitialized_single_output::<Vec3>(2, "Result");

        for i in mask {
            result[i] = a[i] + b[i];
        }
    }
}

/// Euclidean distance between two points.
pub struct VectorDistance {
    signature: Signature,
}

impl VectorDistance {
    pub fn new() -> Self {
        Self {
            signature: SignatureBuilder::new("Vector Distance")
                .single_input::<Vec3>("A")
                .single_input::<Vec3>("B")
                .single_output::<f32>("Distances")
                .build(),
        }
    }
}

impl MultiFunction for VectorDistance {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, _context: &Context<'_>) {
        let a = params.readonly_single_input::<Vec3>(0, "A");
        let b = params.readonly_single_input::<Vec3>(1, "B");
        let distances = params.uninitialized_single_output::<f32>(2, "Distances");

        for i in mask {
            distances[i] = a[i].distance(b[i]);
        }
    }
}

/// Sum of each per-index list.
pub struct FloatArraySum {
    signature: Signature,
}

impl FloatArraySum {
    pub fn new() -> Self {
        Self {
            signature: SignatureBuilder::new("Float Array Sum")
                .vector_input::<f32>("Array")
                .single_output::<f32>("Sum")
                .build(),
        }
    }
}

impl MultiFunction for FloatArraySum {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, _context: &Context<'_>) {
        let arrays = params.readonly_vector_input::<f32>(0, "Array");
        let sums = params.uninitialized_single_output::<f32>(1, "Sum");

        for i in mask {
            sums[i] = arrays.get(i).iter().sum();
        }
    }
}

/// Linear remap from `[From Min, From Max]` to `[To Min, To Max]`.
///
/// A zero-width source range yields `To Min`.
pub struct MapRange {
    signature: Signature,
}

impl MapRange {
    pub fn new() -> Self {
        Self {
            signature: SignatureBuilder::new("Map Range")
                .single_input::<f32>("Value")
                .single_input::<f32>("From Min")
                .single_input::<f32>("From Max")
                .single_input::<f32>("To Min")
                .single_input::<f32>("To Max")
                .single_output::<f32>("Value")
                .build(),
        }
    }
}

impl MultiFunction for MapRange {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, _context: &Context<'_>) {
        let values = params.readonly_single_input::<f32>(0, "Value");
        let from_min = params.readonly_single_input::<f32>(1, "From Min");
        let from_max = params.readonly_single_input::<f32>(2, "From Max");
        let to_min = params.readonly_single_input::<f32>(3, "To Min");
        let to_max = params.readonly_single_input::<f32>(4, "To Max");
        let r_values = params.uninitialized_single_output::<f32>(5, "Value");

        for i in mask {
            let diff = from_max[i] - from_min[i];
            r_values[i] = if diff != 0.0 {
                (values[i] - from_min[i]) / diff * (to_max[i] - to_min[i]) + to_min[i]
            } else {
                to_min[i]
            };
        }
    }
}

/// `min(max(Value, Min), Max)`: with `Min > Max` the result is `Max`.
pub struct Clamp {
    signature: Signature,
}

impl Clamp {
    pub fn new() -> Self {
        Self {
            signature: SignatureBuilder::new("Clamp")
                .single_input::<f32>("Value")
                .single_input::<f32>("Min")
                .single_input::<f32>("Max")
                .single_output::<f32>("Value")
                .build(),
        }
    }
}

impl MultiFunction for Clamp {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, _context: &Context<'_>) {
        let values = params.readonly_single_input::<f32>(0, "Value");
        let min_values = params.readonly_single_input::<f32>(1, "Min");
        let max_values = params.readonly_single_input::<f32>(2, "Max");
        let r_values = params.uninitialized_single_output::<f32>(3, "Value");

        for i in mask {
            // Not `f32::clamp`, which panics when min > max.
            r_values[i] = values[i].max(min_values[i]).min(max_values[i]);
        }
    }
}

impl_default_via_new!(AddFloats, AddFloat3s, VectorDistance, FloatArraySum, MapRange, Clamp);
