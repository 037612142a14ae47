use batchfn_core::{IndexMask, Signature, SignatureBuilder};
use batchfn_vm::{Context, MultiFunction, Params};

/// Length of a string in bytes.
pub struct TextLength {
    signature: Signature,
}

impl TextLength {
    pub fn new() -> Self {
        Self {
            signature: SignatureBuilder::new("Text Length")
                .single_input::<String>("Text")
                .single_output::<i32>("Length")
                .build(),
        }
    }
}

impl Default for TextLength {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiFunction for TextLength {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, _context: &Context<'_>) {
        let texts = params.readonly_single_input::<String>(0, "Text");
        let lengths = params.uninitialized_single_output::<i32>(1, "Length");

        for i in mask {
            lengths[i] = i32::try_from(texts[i].len()).unwrap_or(i32::MAX);
        }
    }
}
