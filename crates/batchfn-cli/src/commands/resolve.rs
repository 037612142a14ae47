//! Function lookup with optional vectorization.

use std::sync::Arc;

use batchfn_lib::FunctionRegistry;
use batchfn_vm::{MultiFunction, SimpleVectorize};

use super::batch::BatchError;

/// Resolve `key`, vectorizing the named single inputs when any are given.
pub fn resolve_function(
    registry: &FunctionRegistry,
    key: &str,
    vectorize: &[String],
) -> Result<Arc<dyn MultiFunction>, BatchError> {
    let function = registry.resolve(key)?;
    if vectorize.is_empty() {
        return Ok(function);
    }

    let signature = function.signature();
    let mut flags = vec![false; signature.len()];
    for name in vectorize {
        let Some(index) = signature.find(name) else {
            return Err(BatchError::UnknownParameter {
                function: signature.name().to_string(),
                name: name.clone(),
            });
        };
        flags[index] = true;
    }

    let vectorized = SimpleVectorize::try_new(function, &flags)?;
    Ok(Arc::new(vectorized))
}
