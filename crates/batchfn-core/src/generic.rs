//! Type-erased containers bound to function parameters.
//!
//! Ownership split:
//! - `GenericArray` and `GenericVectorArray` own their storage (the caller keeps them).
//! - `GenericVirtualList`, `GenericVirtualListList` and `GenericMutableArray` borrow it
//!   for the duration of one call.

use std::any::Any;
use std::fmt;

use crate::array::{AnyArray, AnyLists};
use crate::invariants::{
    ensure_allocatable, ensure_lists, ensure_lists_mut, ensure_repeatable, ensure_same_type,
    ensure_type, ensure_unsealed, ensure_value, ensure_vec, ensure_vec_mut,
};
use crate::types::{DataType, TypeDesc};
use crate::virtual_list::{VirtualList, VirtualListList};

/// Owned, erased `Vec<T>`.
pub struct GenericArray {
    ty: TypeDesc,
    data: Box<dyn AnyArray>,
}

impl GenericArray {
    /// `len` default-constructed values of type `ty`.
    pub fn new(ty: TypeDesc, len: usize) -> Self {
        Self {
            ty,
            data: ty.allocate_array(len),
        }
    }

    pub fn from_vec<T: DataType>(values: Vec<T>) -> Self {
        Self {
            ty: TypeDesc::of::<T>(),
            data: Box::new(values),
        }
    }

    pub fn type_desc(&self) -> TypeDesc {
        self.ty
    }

    pub fn len(&self) -> usize {
        self.data.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn element(&self, index: usize) -> &dyn Any {
        self.data.element(index)
    }

    pub fn typed<T: DataType>(&self) -> &[T] {
        ensure_type::<T>(self.ty, "array");
        ensure_vec::<T>(self.data.as_any())
    }

    pub fn typed_mut<T: DataType>(&mut self) -> &mut [T] {
        ensure_type::<T>(self.ty, "array");
        ensure_vec_mut::<T>(self.data.as_any_mut())
    }

    pub fn into_vec<T: DataType>(self) -> Vec<T> {
        ensure_type::<T>(self.ty, "array");
        match self.data.into_any().downcast::<Vec<T>>() {
            Ok(values) => *values,
            Err(_) => unreachable!("descriptor and storage disagree"),
        }
    }

    pub fn as_virtual_list(&self) -> GenericVirtualList<'_> {
        GenericVirtualList::from_array(self.data.as_ref())
    }

    pub fn as_mutable(&mut self) -> GenericMutableArray<'_> {
        GenericMutableArray::new(self.data.as_mut())
    }
}

impl fmt::Debug for GenericArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericArray")
            .field("type", &self.ty)
            .field("len", &self.len())
            .finish()
    }
}

#[derive(Clone, Copy)]
enum ListRepr<'a> {
    Single(&'a dyn Any),
    Full(&'a dyn AnyArray),
    Repeated(&'a dyn AnyArray),
}

/// Erased read-only view of one value per index.
#[derive(Clone, Copy)]
pub struct GenericVirtualList<'a> {
    ty: TypeDesc,
    len: usize,
    repr: ListRepr<'a>,
}

impl<'a> GenericVirtualList<'a> {
    pub fn from_array(array: &'a dyn AnyArray) -> Self {
        Self {
            ty: array.type_desc(),
            len: array.size(),
            repr: ListRepr::Full(array),
        }
    }

    #[allow(clippy::ptr_arg)]
    pub fn from_vec<T: DataType>(values: &'a Vec<T>) -> Self {
        Self::from_array(values)
    }

    /// `value` broadcast to `len` indices. `value` must be of type `ty`.
    pub fn single(ty: TypeDesc, value: &'a dyn Any, len: usize) -> Self {
        assert!(
            value.type_id() == ty.id(),
            "type mismatch: broadcast value is not a `{}`",
            ty.name()
        );
        Self {
            ty,
            len,
            repr: ListRepr::Single(value),
        }
    }

    pub fn single_typed<T: DataType>(value: &'a T, len: usize) -> Self {
        Self::single(TypeDesc::of::<T>(), value, len)
    }

    pub fn type_desc(&self) -> TypeDesc {
        self.ty
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_single(&self) -> bool {
        matches!(self.repr, ListRepr::Single(_))
    }

    /// Value at `index`, erased.
    pub fn get(&self, index: usize) -> &'a dyn Any {
        assert!(
            index < self.len,
            "index {index} out of range for virtual list of length {}",
            self.len
        );
        match self.repr {
            ListRepr::Single(value) => value,
            ListRepr::Full(array) => array.element(index),
            ListRepr::Repeated(array) => array.element(index % array.size()),
        }
    }

    /// Typed view of the same values.
    pub fn typed<T: DataType>(&self) -> VirtualList<'a, T> {
        ensure_type::<T>(self.ty, "virtual list");
        match self.repr {
            ListRepr::Single(value) => VirtualList::single(ensure_value::<T>(value), self.len),
            ListRepr::Full(array) => VirtualList::from_slice(ensure_vec::<T>(array.as_any())),
            ListRepr::Repeated(array) => {
                VirtualList::repeated(ensure_vec::<T>(array.as_any()), self.len)
            }
        }
    }

    /// The value at `index` broadcast to `len` indices.
    pub fn repeated_element(&self, index: usize, len: usize) -> GenericVirtualList<'a> {
        GenericVirtualList {
            ty: self.ty,
            len,
            repr: ListRepr::Single(self.get(index)),
        }
    }

    /// Copy the values into an owned array.
    pub fn to_array(&self) -> GenericArray {
        let mut array = GenericArray::new(self.ty, self.len);
        for i in 0..self.len {
            array.data.copy_in(i, self.get(i));
        }
        array
    }
}

impl fmt::Debug for GenericVirtualList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.repr {
            ListRepr::Single(_) => "single",
            ListRepr::Full(_) => "full",
            ListRepr::Repeated(_) => "repeated",
        };
        f.debug_struct("GenericVirtualList")
            .field("type", &self.ty)
            .field("len", &self.len)
            .field("kind", &kind)
            .finish()
    }
}

#[derive(Clone, Copy)]
enum ListListRepr<'a> {
    Single(&'a dyn AnyArray),
    Full(&'a dyn AnyLists),
}

/// Erased read-only view of one list per index.
#[derive(Clone, Copy)]
pub struct GenericVirtualListList<'a> {
    ty: TypeDesc,
    len: usize,
    repr: ListListRepr<'a>,
}

impl<'a> GenericVirtualListList<'a> {
    pub fn from_lists(lists: &'a dyn AnyLists) -> Self {
        Self {
            ty: lists.type_desc(),
            len: lists.size(),
            repr: ListListRepr::Full(lists),
        }
    }

    pub fn from_vector_array(array: &'a GenericVectorArray) -> Self {
        Self::from_lists(array.lists.as_ref())
    }

    /// `list` broadcast to `len` indices.
    pub fn single_list(list: &'a dyn AnyArray, len: usize) -> Self {
        Self {
            ty: list.type_desc(),
            len,
            repr: ListListRepr::Single(list),
        }
    }

    pub fn type_desc(&self) -> TypeDesc {
        self.ty
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn list(&self, index: usize) -> &'a dyn AnyArray {
        assert!(
            index < self.len,
            "index {index} out of range for list of lists of length {}",
            self.len
        );
        match self.repr {
            ListListRepr::Single(list) => list,
            ListListRepr::Full(lists) => lists.list(index),
        }
    }

    /// Length of the list at `index`.
    pub fn list_len(&self, index: usize) -> usize {
        self.list(index).size()
    }

    /// The list at `index`.
    pub fn get(&self, index: usize) -> GenericVirtualList<'a> {
        GenericVirtualList::from_array(self.list(index))
    }

    /// The list at `index` replayed cyclically up to `len` values.
    pub fn repeated_sublist(&self, index: usize, len: usize) -> GenericVirtualList<'a> {
        let list = self.list(index);
        ensure_repeatable(list.size(), len, index);
        GenericVirtualList {
            ty: self.ty,
            len,
            repr: ListRepr::Repeated(list),
        }
    }

    pub fn typed<T: DataType>(&self) -> VirtualListList<'a, T> {
        ensure_type::<T>(self.ty, "list of lists");
        match self.repr {
            ListListRepr::Single(list) => {
                VirtualListList::single(ensure_vec::<T>(list.as_any()), self.len)
            }
            ListListRepr::Full(lists) => {
                VirtualListList::from_lists(ensure_lists::<T>(lists.as_any()))
            }
        }
    }
}

impl fmt::Debug for GenericVirtualListList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericVirtualListList")
            .field("type", &self.ty)
            .field("len", &self.len)
            .finish()
    }
}

/// Erased mutable view of one value per index, borrowed from caller storage.
pub struct GenericMutableArray<'a> {
    ty: TypeDesc,
    array: &'a mut dyn AnyArray,
}

impl<'a> GenericMutableArray<'a> {
    pub fn new(array: &'a mut dyn AnyArray) -> Self {
        Self {
            ty: array.type_desc(),
            array,
        }
    }

    #[allow(clippy::ptr_arg)]
    pub fn from_vec<T: DataType>(values: &'a mut Vec<T>) -> Self {
        Self::new(values)
    }

    pub fn type_desc(&self) -> TypeDesc {
        self.ty
    }

    pub fn len(&self) -> usize {
        self.array.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn element(&self, index: usize) -> &dyn Any {
        self.array.element(index)
    }

    /// Copy-construct `value` into `index`.
    pub fn copy_in(&mut self, index: usize, value: &dyn Any) {
        self.array.copy_in(index, value);
    }

    pub fn construct_default(&mut self, index: usize) {
        self.array.construct_default(index);
    }

    pub fn into_typed<T: DataType>(self) -> &'a mut [T] {
        ensure_type::<T>(self.ty, "output array");
        ensure_vec_mut::<T>(self.array.as_any_mut())
    }
}

impl fmt::Debug for GenericMutableArray<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericMutableArray")
            .field("type", &self.ty)
            .field("len", &self.len())
            .finish()
    }
}

/// Owned, erased `Vec<Vec<T>>`: one growable buffer per index.
///
/// An index grows through `append` / `extend` until `allocate` fixes its size;
/// after that the index is sealed for the rest of the call.
pub struct GenericVectorArray {
    ty: TypeDesc,
    lists: Box<dyn AnyLists>,
    sealed: Vec<bool>,
}

impl GenericVectorArray {
    /// `len` empty lists of type `ty`.
    pub fn new(ty: TypeDesc, len: usize) -> Self {
        Self {
            ty,
            lists: ty.allocate_lists(len),
            sealed: vec![false; len],
        }
    }

    pub fn from_lists<T: DataType>(lists: Vec<Vec<T>>) -> Self {
        let sealed = vec![false; lists.len()];
        Self {
            ty: TypeDesc::of::<T>(),
            lists: Box::new(lists),
            sealed,
        }
    }

    pub fn type_desc(&self) -> TypeDesc {
        self.ty
    }

    pub fn len(&self) -> usize {
        self.lists.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn list_len(&self, index: usize) -> usize {
        self.lists.list(index).size()
    }

    pub fn is_sealed(&self, index: usize) -> bool {
        self.sealed[index]
    }

    /// Append a copy of `value` to the list at `index`.
    pub fn append(&mut self, index: usize, value: &dyn Any) {
        ensure_unsealed(self.sealed[index], index);
        self.lists.list_mut(index).append_copy(value);
    }

    /// Append copies of every value in `values` to the list at `index`.
    pub fn extend_copy(&mut self, index: usize, values: GenericVirtualList<'_>) {
        ensure_unsealed(self.sealed[index], index);
        ensure_same_type(self.ty, values.type_desc(), "list array");
        let list = self.lists.list_mut(index);
        for i in 0..values.len() {
            list.append_copy(values.get(i));
        }
    }

    /// Give the list at `index` exactly `len` default values and seal it.
    pub fn allocate(&mut self, index: usize, len: usize) -> GenericMutableArray<'_> {
        let list = self.lists.list_mut(index);
        ensure_allocatable(list.size(), self.sealed[index], index);
        self.sealed[index] = true;
        list.resize_default(len);
        GenericMutableArray::new(list)
    }

    /// The list at `index`.
    pub fn get(&self, index: usize) -> GenericVirtualList<'_> {
        GenericVirtualList::from_array(self.lists.list(index))
    }

    pub fn as_virtual_list_list(&self) -> GenericVirtualListList<'_> {
        GenericVirtualListList::from_vector_array(self)
    }

    pub fn typed<T: DataType>(&self) -> &[Vec<T>] {
        ensure_type::<T>(self.ty, "list array");
        ensure_lists::<T>(self.lists.as_any())
    }

    pub fn typed_mut<T: DataType>(&mut self) -> VectorArrayMut<'_, T> {
        ensure_type::<T>(self.ty, "list array");
        VectorArrayMut {
            lists: ensure_lists_mut::<T>(self.lists.as_any_mut()),
            sealed: &mut self.sealed,
        }
    }

    pub fn into_lists<T: DataType>(self) -> Vec<Vec<T>> {
        ensure_type::<T>(self.ty, "list array");
        match self.lists.into_any().downcast::<Vec<Vec<T>>>() {
            Ok(lists) => *lists,
            Err(_) => unreachable!("descriptor and storage disagree"),
        }
    }
}

impl fmt::Debug for GenericVectorArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericVectorArray")
            .field("type", &self.ty)
            .field("len", &self.len())
            .finish()
    }
}

/// Typed mutable access to a `GenericVectorArray`, honoring sealed indices.
pub struct VectorArrayMut<'a, T> {
    lists: &'a mut Vec<Vec<T>>,
    sealed: &'a mut [bool],
}

impl<T: DataType> VectorArrayMut<'_, T> {
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn get(&self, index: usize) -> &[T] {
        &self.lists[index]
    }

    pub fn append(&mut self, index: usize, value: T) {
        ensure_unsealed(self.sealed[index], index);
        self.lists[index].push(value);
    }

    pub fn extend(&mut self, index: usize, values: impl IntoIterator<Item = T>) {
        ensure_unsealed(self.sealed[index], index);
        self.lists[index].extend(values);
    }

    /// Give the list at `index` exactly `len` default values and seal it.
    pub fn allocate(&mut self, index: usize, len: usize) -> &mut [T] {
        let list = &mut self.lists[index];
        ensure_allocatable(list.len(), self.sealed[index], index);
        self.sealed[index] = true;
        list.resize(len, T::default());
        list
    }
}
