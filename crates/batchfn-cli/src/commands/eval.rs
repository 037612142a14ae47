//! Evaluate a function over a batch and output JSON.

use std::path::PathBuf;

use batchfn_core::{
    GenericArray, GenericVectorArray, GenericVirtualList, ParamCategory, ParamDef, Signature,
    TypeRegistry,
};
use batchfn_lib::FunctionRegistry;
use batchfn_vm::{ContextBuilder, MultiFunction, NoopTracer, ParamsBuilder, Tracer, execute};
use indexmap::IndexMap;
use serde_json::Value;

use super::batch::{BatchError, BatchFile};
use super::resolve::resolve_function;
use super::values::{self, ObjectTable, SingleValues};

/// Suffix `SimpleVectorize` appends to the parameters it turns into lists.
const LIST_SUFFIX: &str = " (List)";

pub enum BatchSource {
    Path(PathBuf),
    Inline(String),
}

impl BatchSource {
    pub fn load(&self) -> Result<BatchFile, BatchError> {
        match self {
            Self::Path(path) => BatchFile::load(path),
            Self::Inline(text) => BatchFile::parse(text),
        }
    }
}

pub struct EvalArgs {
    pub function: String,
    pub batch: Option<BatchSource>,
    pub vectorize: Vec<String>,
    pub mask: Option<Vec<usize>>,
    pub pretty: bool,
}

pub fn run(args: EvalArgs) {
    let outputs = evaluate_key(
        &args.function,
        args.batch.as_ref(),
        &args.vectorize,
        args.mask.as_deref(),
        &NoopTracer,
    )
    .unwrap_or_else(|e| fail(e));

    match values::to_json(&outputs, args.pretty) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(e),
    }
}

pub(crate) fn fail(e: BatchError) -> ! {
    eprintln!("error: {}", e);
    std::process::exit(1);
}

/// Resolve `key` against the built-in registry and evaluate it over the batch.
pub fn evaluate_key(
    key: &str,
    batch: Option<&BatchSource>,
    vectorize: &[String],
    mask: Option<&[usize]>,
    tracer: &dyn Tracer,
) -> Result<IndexMap<String, Value>, BatchError> {
    let batch = batch.ok_or(BatchError::MissingBatch)?.load()?;
    let registry = FunctionRegistry::builtins();
    let function = resolve_function(&registry, key, vectorize)?;
    evaluate(function.as_ref(), &batch, mask, registry.types(), tracer)
}

/// Storage bound to one parameter for the duration of a call.
enum Bound {
    Single(SingleValues),
    Lists(GenericVectorArray),
    Output(GenericArray),
    VectorOutput(GenericVectorArray),
    Mutable(GenericVectorArray),
}

/// Evaluate `function` over `batch`, returning each output by parameter name.
///
/// Outputs hold one JSON value per element, `null` at indices outside the mask.
pub fn evaluate(
    function: &dyn MultiFunction,
    batch: &BatchFile,
    mask: Option<&[usize]>,
    types: &TypeRegistry,
    tracer: &dyn Tracer,
) -> Result<IndexMap<String, Value>, BatchError> {
    let signature = function.signature();
    let size = batch.size;
    let mask = batch.mask(mask)?;
    let objects = batch.object_table();
    check_input_names(signature, &batch.inputs)?;

    let mut bound = signature
        .iter()
        .map(|param| bind(signature, param, batch, &objects))
        .collect::<Result<Vec<_>, _>>()?;

    {
        let mut builder = ParamsBuilder::new(signature, size);
        for slot in bound.iter_mut() {
            match slot {
                Bound::Single(SingleValues::PerElement(array)) => {
                    builder.add_readonly_single_input(array.as_virtual_list())
                }
                Bound::Single(SingleValues::Broadcast(array)) => builder.add_readonly_single_input(
                    GenericVirtualList::single(array.type_desc(), array.element(0), size),
                ),
                Bound::Lists(lists) => builder.add_vector_input(lists.as_virtual_list_list()),
                Bound::Output(array) => builder.add_single_output(array.as_mutable()),
                Bound::VectorOutput(lists) => builder.add_vector_output(lists),
                Bound::Mutable(lists) => builder.add_mutable_vector(lists),
            };
        }
        let mut params = builder.try_build()?;
        let context = batch
            .attach_context(ContextBuilder::new().tracer(tracer), &objects, types)?
            .build();
        execute(function, &mask, &mut params, &context);
    }

    let mut outputs = IndexMap::new();
    for (param, slot) in signature.iter().zip(&bound) {
        let value = match slot {
            Bound::Output(array) => values::encode_single(&param.name, array, &mask)?,
            Bound::VectorOutput(lists) | Bound::Mutable(lists) => {
                values::encode_lists(&param.name, lists, &mask)?
            }
            Bound::Single(_) | Bound::Lists(_) => continue,
        };
        outputs.insert(param.name.clone(), value);
    }
    Ok(outputs)
}

/// Every batch input must name an input parameter.
fn check_input_names(signature: &Signature, inputs: &IndexMap<String, Value>) -> Result<(), BatchError> {
    for name in inputs.keys() {
        let known = signature.iter().any(|param| {
            param.param_type.category().is_input()
                && (param.name == *name || param.name.strip_suffix(LIST_SUFFIX) == Some(name.as_str()))
        });
        if !known {
            return Err(BatchError::UnknownInput {
                function: signature.name().to_string(),
                name: name.clone(),
            });
        }
    }
    Ok(())
}

/// The batch value for an input, also accepted without the list suffix.
fn input_value<'b>(inputs: &'b IndexMap<String, Value>, name: &str) -> Option<&'b Value> {
    inputs.get(name).or_else(|| {
        name.strip_suffix(LIST_SUFFIX)
            .and_then(|base| inputs.get(base))
    })
}

fn bind(
    signature: &Signature,
    param: &ParamDef,
    batch: &BatchFile,
    objects: &ObjectTable,
) -> Result<Bound, BatchError> {
    let ty = param.param_type.type_desc();
    let name = param.name.as_str();
    let size = batch.size;
    let value = input_value(&batch.inputs, name);
    let missing = || BatchError::MissingInput {
        function: signature.name().to_string(),
        name: name.to_string(),
    };

    let bound = match param.param_type.category() {
        ParamCategory::ReadonlySingleInput => {
            let value = value.ok_or_else(missing)?;
            Bound::Single(values::decode_single(ty, name, value, size, objects)?)
        }
        ParamCategory::ReadonlyVectorInput => {
            let value = value.ok_or_else(missing)?;
            Bound::Lists(values::decode_lists(ty, name, value, size, objects)?)
        }
        // Omitted mutable lists start out empty.
        ParamCategory::MutableVector => match value {
            Some(value) => Bound::Mutable(values::decode_lists(ty, name, value, size, objects)?),
            None => Bound::Mutable(GenericVectorArray::new(ty, size)),
        },
        ParamCategory::SingleOutput => Bound::Output(GenericArray::new(ty, size)),
        ParamCategory::VectorOutput => Bound::VectorOutput(GenericVectorArray::new(ty, size)),
    };
    Ok(bound)
}
