//! Trace function dispatch for debugging.

use batchfn_core::Colors;
use batchfn_vm::{PrintTracer, Verbosity};

use super::eval::{BatchSource, evaluate_key, fail};
use super::values;

pub struct TraceArgs {
    pub function: String,
    pub batch: Option<BatchSource>,
    pub vectorize: Vec<String>,
    pub mask: Option<Vec<usize>>,
    pub verbosity: Verbosity,
    pub no_result: bool,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
    let colors = Colors::new(args.color);
    let tracer = PrintTracer::new(args.verbosity, colors);

    let result = evaluate_key(
        &args.function,
        args.batch.as_ref(),
        &args.vectorize,
        args.mask.as_deref(),
        &tracer,
    );
    // Whatever was traced before a failure is still shown.
    print!("{}", tracer.render());
    let outputs = result.unwrap_or_else(|e| fail(e));

    if args.no_result {
        return;
    }

    println!("{}---{}", colors.dim, colors.reset);
    match values::to_json(&outputs, true) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(e),
    }
}
