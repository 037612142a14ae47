//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use batchfn_core::{ParamCategory, Signature};

use super::params::ParamSlot;

/// Abort on a slot accessed with the wrong category.
pub(crate) fn slot_mismatch(
    signature: &Signature,
    index: usize,
    expected: ParamCategory,
    found: &ParamSlot<'_>,
) -> ! {
    match found.category() {
        Some(actual) => panic!(
            "`{}` parameter {index} `{}`: accessed as {expected}, bound as {actual}",
            signature.name(),
            signature.param_name(index)
        ),
        None => panic!(
            "`{}` parameter {index} `{}`: output was already taken",
            signature.name(),
            signature.param_name(index)
        ),
    }
}

/// Debug-only check that an accessor names the parameter it reads.
#[inline]
pub(crate) fn debug_ensure_name(signature: &Signature, index: usize, name: &str) {
    debug_assert!(
        signature.param_name(index) == name,
        "`{}` parameter {index} is `{}`, accessed as `{name}`",
        signature.name(),
        signature.param_name(index)
    );
}
