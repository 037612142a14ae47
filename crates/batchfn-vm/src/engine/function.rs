//! The multi-function contract and its dispatch entry point.

use batchfn_core::{IndexMask, Signature};

use super::context::Context;
use super::params::Params;
use super::verify::verify_params;

/// A function evaluated over many elements at once.
///
/// `call` reads inputs and writes outputs only at indices in the mask, and must
/// define every output at every masked index before returning. It must accept an
/// empty mask and masks that are sparse or do not start at zero.
pub trait MultiFunction: Send + Sync {
    fn signature(&self) -> &Signature;

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, context: &Context<'_>);

    fn name(&self) -> &str {
        self.signature().name()
    }
}

/// Verify the binding, then call `function` over `mask`.
///
/// A binding that does not fit the signature, or containers too small for the
/// mask, abort the call: they are integration bugs, not runtime conditions.
pub fn execute<F: MultiFunction + ?Sized>(
    function: &F,
    mask: &IndexMask<'_>,
    params: &mut Params<'_>,
    context: &Context<'_>,
) {
    let signature = function.signature();
    if let Err(err) = verify_params(signature, params, mask) {
        panic!("{err}");
    }

    let tracer = context.tracer();
    tracer.trace_call(signature, mask);
    function.call(mask, params, context);
    tracer.trace_return(signature);
}
