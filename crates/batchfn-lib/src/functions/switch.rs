//! Type-generic functions: the element type is chosen at construction.

use batchfn_core::{IndexMask, Signature, SignatureBuilder, TypeDesc};
use batchfn_vm::{Context, MultiFunction, Params};

/// Per index, copy `True` or `False` depending on `Condition`.
pub struct SwitchSingle {
    ty: TypeDesc,
    signature: Signature,
}

impl SwitchSingle {
    pub fn new(ty: TypeDesc) -> Self {
        Self {
            ty,
            signature: SignatureBuilder::new("Switch")
                .single_input::<bool>("Condition")
                .single_input_of("True", ty)
                .single_input_of("False", ty)
                .single_output_of("Result", ty)
                .build(),
        }
    }

    pub fn type_desc(&self) -> TypeDesc {
        self.ty
    }
}

impl MultiFunction for SwitchSingle {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, _context: &Context<'_>) {
        let conditions = params.readonly_single_input::<bool>(0, "Condition");
        let if_true = params.readonly_single_input_generic(1, "True");
        let if_false = params.readonly_single_input_generic(2, "False");
        let mut results = params.single_output_generic(3, "Result");

        for i in mask {
            let chosen = if conditions[i] { &if_true } else { &if_false };
            results.copy_in(i, chosen.get(i));
        }
    }
}

/// Per index, extend `Result` with a copy of the `True` or `False` list.
pub struct SwitchVector {
    ty: TypeDesc,
    signature: Signature,
}

impl SwitchVector {
    pub fn new(ty: TypeDesc) -> Self {
        Self {
            ty,
            signature: SignatureBuilder::new("Switch")
                .single_input::<bool>("Condition")
                .vector_input_of("True", ty)
                .vector_input_of("False", ty)
                .vector_output_of("Result", ty)
                .build(),
        }
    }

    pub fn type_desc(&self) -> TypeDesc {
        self.ty
    }
}

impl MultiFunction for SwitchVector {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, _context: &Context<'_>) {
        let conditions = params.readonly_single_input::<bool>(0, "Condition");
        let if_true = params.readonly_vector_input_generic(1, "True");
        let if_false = params.readonly_vector_input_generic(2, "False");
        let results = params.vector_output_generic(3, "Result");

        for i in mask {
            let chosen = if conditions[i] { &if_true } else { &if_false };
            results.extend_copy(i, chosen.get(i));
        }
    }
}

/// Per index, append `Value` to the existing `List`.
pub struct ListAppend {
    ty: TypeDesc,
    signature: Signature,
}

impl ListAppend {
    pub fn new(ty: TypeDesc) -> Self {
        Self {
            ty,
            signature: SignatureBuilder::new("List Append")
                .mutable_vector_of("List", ty)
                .single_input_of("Value", ty)
                .build(),
        }
    }

    pub fn type_desc(&self) -> TypeDesc {
        self.ty
    }
}

impl MultiFunction for ListAppend {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, _context: &Context<'_>) {
        let values = params.readonly_single_input_generic(1, "Value");
        let lists = params.mutable_vector_generic(0, "List");

        for i in mask {
            lists.append(i, values.get(i));
        }
    }
}
