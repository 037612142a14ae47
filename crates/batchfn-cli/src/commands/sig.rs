//! Show the signature of a function.

use batchfn_core::{Colors, dump_signature};
use batchfn_lib::FunctionRegistry;

use super::eval::fail;
use super::resolve::resolve_function;

pub struct SigArgs {
    pub function: String,
    pub vectorize: Vec<String>,
    pub color: bool,
}

pub fn run(args: SigArgs) {
    let registry = FunctionRegistry::builtins();
    let function =
        resolve_function(&registry, &args.function, &args.vectorize).unwrap_or_else(|e| fail(e));
    print!("{}", dump_signature(function.signature(), Colors::new(args.color)));
}
