pub mod batch;
pub mod eval;
pub mod list;
pub mod resolve;
pub mod sig;
pub mod trace;
pub mod values;

#[cfg(test)]
mod eval_tests;
