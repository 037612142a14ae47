//! Object-safe storage traits behind the generic containers.
//!
//! `AnyArray` is implemented for `Vec<T>` and `AnyLists` for `Vec<Vec<T>>`, for every
//! `T: DataType`. Method names avoid the inherent `Vec`/slice names (`len`, `get`, ...)
//! so that calls on concrete vectors never resolve to these traits by accident.

use std::any::Any;

use crate::invariants::ensure_value;
use crate::types::{DataType, TypeDesc};

/// Type-erased `Vec<T>`.
pub trait AnyArray: Send + Sync {
    fn type_desc(&self) -> TypeDesc;

    /// Number of stored values.
    fn size(&self) -> usize;

    fn element(&self, index: usize) -> &dyn Any;

    /// Overwrite the value at `index` with a clone of `value`.
    fn copy_in(&mut self, index: usize, value: &dyn Any);

    /// Overwrite the value at `index` with the default value.
    fn construct_default(&mut self, index: usize);

    /// Append a clone of `value`.
    fn append_copy(&mut self, value: &dyn Any);

    /// Truncate or grow with default values.
    fn resize_default(&mut self, len: usize);

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: DataType> AnyArray for Vec<T> {
    fn type_desc(&self) -> TypeDesc {
        TypeDesc::of::<T>()
    }

    #[inline]
    fn size(&self) -> usize {
        self.len()
    }

    #[inline]
    fn element(&self, index: usize) -> &dyn Any {
        &self[index]
    }

    fn copy_in(&mut self, index: usize, value: &dyn Any) {
        self[index] = ensure_value::<T>(value).clone();
    }

    fn construct_default(&mut self, index: usize) {
        self[index] = T::default();
    }

    fn append_copy(&mut self, value: &dyn Any) {
        self.push(ensure_value::<T>(value).clone());
    }

    fn resize_default(&mut self, len: usize) {
        self.resize(len, T::default());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Type-erased `Vec<Vec<T>>`: one growable buffer per index.
pub trait AnyLists: Send + Sync {
    fn type_desc(&self) -> TypeDesc;

    /// Number of per-index lists.
    fn size(&self) -> usize;

    fn list(&self, index: usize) -> &dyn AnyArray;
    fn list_mut(&mut self, index: usize) -> &mut dyn AnyArray;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: DataType> AnyLists for Vec<Vec<T>> {
    fn type_desc(&self) -> TypeDesc {
        TypeDesc::of::<T>()
    }

    #[inline]
    fn size(&self) -> usize {
        self.len()
    }

    fn list(&self, index: usize) -> &dyn AnyArray {
        &self[index]
    }

    fn list_mut(&mut self, index: usize) -> &mut dyn AnyArray {
        &mut self[index]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
