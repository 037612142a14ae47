//! Invariant checks excluded from coverage reports.
//!
//! Every check here guards a caller contract. A failure is an integration bug,
//! so it panics instead of returning an error.

#![cfg_attr(coverage_nightly, coverage(off))]

use std::any::Any;

use crate::types::{DataType, TypeDesc};

/// Downcast an erased value, panicking on a type mismatch.
pub(crate) fn ensure_value<T: DataType>(value: &dyn Any) -> &T {
    value.downcast_ref::<T>().unwrap_or_else(|| {
        panic!(
            "type mismatch: expected a value of type `{}`",
            T::NAME
        )
    })
}

/// Check that a container of type `actual` is being read as `T`.
pub(crate) fn ensure_type<T: DataType>(actual: TypeDesc, what: &str) {
    if !actual.is::<T>() {
        panic!(
            "type mismatch: {what} holds `{}`, accessed as `{}`",
            actual.name(),
            T::NAME
        );
    }
}

/// Check that two erased containers share an element type.
pub(crate) fn ensure_same_type(expected: TypeDesc, actual: TypeDesc, what: &str) {
    if expected != actual {
        panic!(
            "type mismatch: {what} expects `{}`, got `{}`",
            expected.name(),
            actual.name()
        );
    }
}

/// Check that a per-index list may still grow.
pub(crate) fn ensure_unsealed(sealed: bool, index: usize) {
    if sealed {
        panic!("list at index {index} was allocated with a fixed size and cannot grow");
    }
}

/// Check that `allocate` targets an untouched list.
pub(crate) fn ensure_allocatable(len: usize, sealed: bool, index: usize) {
    if sealed || len != 0 {
        panic!(
            "list at index {index} already holds {len} values and cannot be allocated again"
        );
    }
}

/// Check that a repeated view has something to repeat.
pub(crate) fn ensure_repeatable(source_len: usize, len: usize, index: usize) {
    if source_len == 0 && len > 0 {
        panic!("cannot repeat the empty list at index {index} to length {len}");
    }
}

/// Downcast erased storage to its concrete `Vec<T>`.
pub(crate) fn ensure_vec<T: DataType>(storage: &dyn Any) -> &Vec<T> {
    storage
        .downcast_ref::<Vec<T>>()
        .unwrap_or_else(|| panic!("type mismatch: storage is not an array of `{}`", T::NAME))
}

pub(crate) fn ensure_vec_mut<T: DataType>(storage: &mut dyn Any) -> &mut Vec<T> {
    storage
        .downcast_mut::<Vec<T>>()
        .unwrap_or_else(|| panic!("type mismatch: storage is not an array of `{}`", T::NAME))
}

/// Downcast erased per-index list storage to its concrete `Vec<Vec<T>>`.
pub(crate) fn ensure_lists<T: DataType>(storage: &dyn Any) -> &Vec<Vec<T>> {
    storage
        .downcast_ref::<Vec<Vec<T>>>()
        .unwrap_or_else(|| panic!("type mismatch: storage is not a list array of `{}`", T::NAME))
}

pub(crate) fn ensure_lists_mut<T: DataType>(storage: &mut dyn Any) -> &mut Vec<Vec<T>> {
    storage
        .downcast_mut::<Vec<Vec<T>>>()
        .unwrap_or_else(|| panic!("type mismatch: storage is not a list array of `{}`", T::NAME))
}
