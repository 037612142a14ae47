//! Dispatch engine for multi-functions.
//!
//! A caller builds an `IndexMask`, binds containers into `Params` following the
//! callee's `Signature`, and runs the function through `execute`, which verifies
//! the binding before calling.

mod context;
mod error;
mod function;
mod invariants;
mod params;
mod trace;
mod vectorize;
mod verify;

#[cfg(test)]
mod context_tests;

pub use context::{Context, ContextBuilder, ContextRef, ElementContexts, IndexRemap};
pub use error::{BindError, VectorizeError};
pub use function::{MultiFunction, execute};
pub use params::{Params, ParamsBuilder};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
pub use vectorize::SimpleVectorize;
pub use verify::verify_params;
