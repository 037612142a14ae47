#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Multi-function engine for batchfn.
//!
//! This crate binds argument containers to function signatures, dispatches calls
//! over index masks, resolves per-element context records, and adapts scalar
//! functions to per-index lists (vectorization).

pub mod engine;

// Re-export commonly used items at crate root
pub use engine::{
    BindError, Context, ContextBuilder, ContextRef, ElementContexts, IndexRemap, MultiFunction,
    NoopTracer, Params, ParamsBuilder, PrintTracer, SimpleVectorize, Tracer, VectorizeError,
    Verbosity, execute, verify_params,
};
