//! Adapter that accepts per-index lists where a function expects single values.
//!
//! For every masked index the wrapped function runs once over `0..length`, where
//! `length` is the longest vectorized input list at that index. Vectorized lists
//! are replayed cyclically up to `length`, non-vectorized inputs are broadcast,
//! and each output is written into a freshly allocated list of `length` values.

use std::sync::Arc;

use batchfn_core::{
    GenericVirtualList, GenericVirtualListList, IndexMask, ParamCategory, Signature,
    SignatureBuilder,
};

use super::context::Context;
use super::error::VectorizeError;
use super::function::{MultiFunction, execute};
use super::params::{Params, ParamsBuilder};

pub struct SimpleVectorize {
    function: Arc<dyn MultiFunction>,
    /// One flag per parameter of the wrapped function.
    input_is_vectorized: Vec<bool>,
    vectorized_inputs: Vec<usize>,
    signature: Signature,
}

/// Where a wrapped parameter's per-index values come from.
#[derive(Clone, Copy)]
enum Source<'p> {
    Vectorized(GenericVirtualListList<'p>),
    Broadcast(GenericVirtualList<'p>),
    Output,
}

impl SimpleVectorize {
    /// Wrap `function`. `input_is_vectorized` holds one flag per parameter; only
    /// single inputs may be flagged and at least one must be.
    pub fn try_new(
        function: Arc<dyn MultiFunction>,
        input_is_vectorized: &[bool],
    ) -> Result<Self, VectorizeError> {
        let inner = function.signature();
        let function_name = || inner.name().to_string();

        if input_is_vectorized.len() != inner.len() {
            return Err(VectorizeError::FlagCountMismatch {
                function: function_name(),
                expected: inner.len(),
                actual: input_is_vectorized.len(),
            });
        }
        if !input_is_vectorized.contains(&true) {
            return Err(VectorizeError::NoVectorizedInput {
                function: function_name(),
            });
        }

        let mut builder = SignatureBuilder::new(format!("{} (Vectorized)", inner.name()));
        let mut vectorized_inputs = Vec::new();
        for (index, param) in inner.iter().enumerate() {
            let ty = param.param_type.type_desc();
            builder = match param.param_type.category() {
                ParamCategory::ReadonlySingleInput if input_is_vectorized[index] => {
                    vectorized_inputs.push(index);
                    builder.vector_input_of(format!("{} (List)", param.name), ty)
                }
                ParamCategory::ReadonlySingleInput => builder.single_input_of(&param.name, ty),
                ParamCategory::SingleOutput if input_is_vectorized[index] => {
                    return Err(VectorizeError::VectorizedOutput {
                        function: function_name(),
                        name: param.name.clone(),
                    });
                }
                ParamCategory::SingleOutput => {
                    builder.vector_output_of(format!("{} (List)", param.name), ty)
                }
                category @ (ParamCategory::ReadonlyVectorInput
                | ParamCategory::VectorOutput
                | ParamCategory::MutableVector) => {
                    return Err(VectorizeError::UnsupportedCategory {
                        function: function_name(),
                        name: param.name.clone(),
                        category,
                    });
                }
            };
        }

        let signature = builder.build();
        Ok(Self {
            function,
            input_is_vectorized: input_is_vectorized.to_vec(),
            vectorized_inputs,
            signature,
        })
    }

    /// Like `try_new`, panicking when `function` cannot be vectorized this way.
    pub fn new(function: Arc<dyn MultiFunction>, input_is_vectorized: &[bool]) -> Self {
        match Self::try_new(function, input_is_vectorized) {
            Ok(vectorized) => vectorized,
            Err(err) => panic!("{err}"),
        }
    }

    /// Per-index virtual length. Unmasked indices stay `None`.
    ///
    /// An index whose vectorized lists include an empty one has length 0: there is
    /// nothing to replay for that input.
    fn lengths(&self, mask: &IndexMask<'_>, params: &Params<'_>) -> Vec<Option<usize>> {
        let mut lengths = vec![None; mask.min_array_size()];
        let lists: Vec<GenericVirtualListList<'_>> = self
            .vectorized_inputs
            .iter()
            .map(|&i| params.readonly_vector_input_generic(i, self.signature.param_name(i)))
            .collect();
        for index in mask.iter() {
            let mut length = 0;
            for list in &lists {
                let list_len = list.list_len(index);
                if list_len == 0 {
                    length = 0;
                    break;
                }
                length = length.max(list_len);
            }
            lengths[index] = Some(length);
        }
        lengths
    }
}

impl MultiFunction for SimpleVectorize {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, context: &Context<'_>) {
        if mask.is_empty() {
            return;
        }

        let lengths = self.lengths(mask, params);
        let sources: Vec<Source<'_>> = self
            .signature
            .iter()
            .enumerate()
            .map(|(i, param)| match param.param_type.category() {
                ParamCategory::ReadonlyVectorInput => {
                    Source::Vectorized(params.readonly_vector_input_generic(i, &param.name))
                }
                ParamCategory::ReadonlySingleInput => {
                    Source::Broadcast(params.readonly_single_input_generic(i, &param.name))
                }
                _ => Source::Output,
            })
            .collect();
        let mut outputs: Vec<_> = self
            .signature
            .iter()
            .enumerate()
            .filter(|(_, param)| param.param_type.category() == ParamCategory::VectorOutput)
            .map(|(i, param)| params.vector_output_generic(i, &param.name))
            .collect();

        let max_length = lengths.iter().flatten().copied().max().unwrap_or(0);
        let full_range: Vec<usize> = (0..max_length).collect();
        let inner_signature = self.function.signature();
        let tracer = context.tracer();

        for index in mask.iter() {
            let Some(length) = lengths[index] else {
                continue;
            };
            tracer.trace_vectorize(&self.signature, index, length);

            let mut builder = ParamsBuilder::new(inner_signature, length);
            let mut output_iter = outputs.iter_mut();
            for (param_index, source) in sources.iter().enumerate() {
                match *source {
                    Source::Vectorized(lists) => {
                        debug_assert!(self.input_is_vectorized[param_index]);
                        builder.add_readonly_single_input(lists.repeated_sublist(index, length));
                    }
                    Source::Broadcast(values) => {
                        builder.add_readonly_single_input(values.repeated_element(index, length));
                    }
                    Source::Output => {
                        let output = output_iter
                            .next()
                            .expect("one output container per output parameter");
                        builder.add_single_output(output.allocate(index, length));
                    }
                }
            }

            let mut sub_params = builder.build();
            let sub_mask = IndexMask::from_slice(&full_range[..length]);
            // The sub-call sees the outer context as is; records are not sliced per index.
            execute(self.function.as_ref(), &sub_mask, &mut sub_params, context);
        }
    }
}
