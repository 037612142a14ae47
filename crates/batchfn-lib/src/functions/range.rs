use batchfn_core::{IndexMask, Signature, SignatureBuilder};
use batchfn_vm::{Context, MultiFunction, Params};

/// `Amount` values `Start + j * Step` per index. A non-positive amount gives an
/// empty list.
pub struct FloatRange {
    signature: Signature,
}

impl FloatRange {
    pub fn new() -> Self {
        Self {
            signature: SignatureBuilder::new("Float Range")
                .single_input::<i32>("Amount")
                .single_input::<f32>("Start")
                .single_input::<f32>("Step")
                .vector_output::<f32>("Range")
                .build(),
        }
    }
}

impl Default for FloatRange {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiFunction for FloatRange {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, _context: &Context<'_>) {
        let amounts = params.readonly_single_input::<i32>(0, "Amount");
        let starts = params.readonly_single_input::<f32>(1, "Start");
        let steps = params.readonly_single_input::<f32>(2, "Step");
        let mut lists = params.vector_output::<f32>(3, "Range");

        for i in mask {
            let (start, step) = (starts[i], steps[i]);
            lists.extend(i, (0..amounts[i]).map(|j| start + j as f32 * step));
        }
    }
}
