//! Parameter bundles: one bound container per signature position.
//!
//! Inputs are handed out as `Copy` views and can be read any number of times.
//! Outputs are moved out of their slot, so each output is taken at most once
//! per call.

use std::any::Any;

use batchfn_core::{
    DataType, GenericMutableArray, GenericVectorArray, GenericVirtualList, GenericVirtualListList,
    ParamCategory, Signature, TypeDesc, VectorArrayMut, VirtualList, VirtualListList,
};

use super::error::BindError;
use super::invariants::{debug_ensure_name, slot_mismatch};
use super::verify::check_slot;

pub(crate) enum ParamSlot<'a> {
    SingleInput(GenericVirtualList<'a>),
    SingleOutput(GenericMutableArray<'a>),
    VectorInput(GenericVirtualListList<'a>),
    VectorOutput(&'a mut GenericVectorArray),
    MutableVector(&'a mut GenericVectorArray),
    /// Output already moved out by the callee.
    Taken,
}

impl ParamSlot<'_> {
    pub(crate) fn category(&self) -> Option<ParamCategory> {
        Some(match self {
            Self::SingleInput(_) => ParamCategory::ReadonlySingleInput,
            Self::SingleOutput(_) => ParamCategory::SingleOutput,
            Self::VectorInput(_) => ParamCategory::ReadonlyVectorInput,
            Self::VectorOutput(_) => ParamCategory::VectorOutput,
            Self::MutableVector(_) => ParamCategory::MutableVector,
            Self::Taken => return None,
        })
    }

    pub(crate) fn type_desc(&self) -> Option<TypeDesc> {
        Some(match self {
            Self::SingleInput(list) => list.type_desc(),
            Self::SingleOutput(array) => array.type_desc(),
            Self::VectorInput(lists) => lists.type_desc(),
            Self::VectorOutput(array) | Self::MutableVector(array) => array.type_desc(),
            Self::Taken => return None,
        })
    }

    /// Number of addressable indices.
    pub(crate) fn len(&self) -> usize {
        match self {
            Self::SingleInput(list) => list.len(),
            Self::SingleOutput(array) => array.len(),
            Self::VectorInput(lists) => lists.len(),
            Self::VectorOutput(array) | Self::MutableVector(array) => array.len(),
            Self::Taken => 0,
        }
    }
}

/// Containers bound to a function's parameters for one call.
pub struct Params<'a> {
    signature: &'a Signature,
    slots: Vec<ParamSlot<'a>>,
}

impl<'a> Params<'a> {
    pub fn signature(&self) -> &'a Signature {
        self.signature
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn slots(&self) -> &[ParamSlot<'a>] {
        &self.slots
    }

    pub fn readonly_single_input<T: DataType>(&self, index: usize, name: &str) -> VirtualList<'a, T> {
        self.readonly_single_input_generic(index, name).typed::<T>()
    }

    pub fn readonly_single_input_generic(&self, index: usize, name: &str) -> GenericVirtualList<'a> {
        debug_ensure_name(self.signature, index, name);
        match &self.slots[index] {
            ParamSlot::SingleInput(list) => *list,
            other => slot_mismatch(
                self.signature,
                index,
                ParamCategory::ReadonlySingleInput,
                other,
            ),
        }
    }

    pub fn readonly_vector_input<T: DataType>(
        &self,
        index: usize,
        name: &str,
    ) -> VirtualListList<'a, T> {
        self.readonly_vector_input_generic(index, name).typed::<T>()
    }

    pub fn readonly_vector_input_generic(
        &self,
        index: usize,
        name: &str,
    ) -> GenericVirtualListList<'a> {
        debug_ensure_name(self.signature, index, name);
        match &self.slots[index] {
            ParamSlot::VectorInput(lists) => *lists,
            other => slot_mismatch(
                self.signature,
                index,
                ParamCategory::ReadonlyVectorInput,
                other,
            ),
        }
    }

    /// Output values for every index. Values at masked indices must all be written.
    pub fn uninitialized_single_output<T: DataType>(
        &mut self,
        index: usize,
        name: &str,
    ) -> &'a mut [T] {
        self.single_output_generic(index, name).into_typed::<T>()
    }

    pub fn single_output_generic(&mut self, index: usize, name: &str) -> GenericMutableArray<'a> {
        match self.take(index, name, ParamCategory::SingleOutput) {
            ParamSlot::SingleOutput(array) => array,
            _ => unreachable!("take checks the category"),
        }
    }

    pub fn vector_output<T: DataType>(&mut self, index: usize, name: &str) -> VectorArrayMut<'a, T> {
        self.vector_output_generic(index, name).typed_mut::<T>()
    }

    pub fn vector_output_generic(&mut self, index: usize, name: &str) -> &'a mut GenericVectorArray {
        match self.take(index, name, ParamCategory::VectorOutput) {
            ParamSlot::VectorOutput(array) => array,
            _ => unreachable!("take checks the category"),
        }
    }

    pub fn mutable_vector<T: DataType>(&mut self, index: usize, name: &str) -> VectorArrayMut<'a, T> {
        self.mutable_vector_generic(index, name).typed_mut::<T>()
    }

    pub fn mutable_vector_generic(&mut self, index: usize, name: &str) -> &'a mut GenericVectorArray {
        match self.take(index, name, ParamCategory::MutableVector) {
            ParamSlot::MutableVector(array) => array,
            _ => unreachable!("take checks the category"),
        }
    }

    fn take(&mut self, index: usize, name: &str, expected: ParamCategory) -> ParamSlot<'a> {
        debug_ensure_name(self.signature, index, name);
        let slot = &mut self.slots[index];
        if slot.category() != Some(expected) {
            slot_mismatch(self.signature, index, expected, slot);
        }
        std::mem::replace(slot, ParamSlot::Taken)
    }
}

/// Binds containers to a signature, one parameter at a time and in order.
///
/// `min_array_size` is the length given to broadcast single values.
pub struct ParamsBuilder<'a> {
    signature: &'a Signature,
    min_array_size: usize,
    slots: Vec<ParamSlot<'a>>,
}

impl<'a> ParamsBuilder<'a> {
    pub fn new(signature: &'a Signature, min_array_size: usize) -> Self {
        Self {
            signature,
            min_array_size,
            slots: Vec::with_capacity(signature.len()),
        }
    }

    pub fn add_readonly_single_input(&mut self, values: GenericVirtualList<'a>) -> &mut Self {
        self.slots.push(ParamSlot::SingleInput(values));
        self
    }

    #[allow(clippy::ptr_arg)]
    pub fn add_single_input_vec<T: DataType>(&mut self, values: &'a Vec<T>) -> &mut Self {
        self.add_readonly_single_input(GenericVirtualList::from_vec(values))
    }

    /// Broadcast `value` to every index.
    pub fn add_single_input_value<T: DataType>(&mut self, value: &'a T) -> &mut Self {
        let len = self.min_array_size;
        self.add_readonly_single_input(GenericVirtualList::single_typed(value, len))
    }

    /// Broadcast an erased `value` of type `ty` to every index.
    pub fn add_single_input_value_of(&mut self, ty: TypeDesc, value: &'a dyn Any) -> &mut Self {
        let len = self.min_array_size;
        self.add_readonly_single_input(GenericVirtualList::single(ty, value, len))
    }

    pub fn add_single_output(&mut self, array: GenericMutableArray<'a>) -> &mut Self {
        self.slots.push(ParamSlot::SingleOutput(array));
        self
    }

    #[allow(clippy::ptr_arg)]
    pub fn add_single_output_vec<T: DataType>(&mut self, values: &'a mut Vec<T>) -> &mut Self {
        self.add_single_output(GenericMutableArray::from_vec(values))
    }

    pub fn add_vector_input(&mut self, lists: GenericVirtualListList<'a>) -> &mut Self {
        self.slots.push(ParamSlot::VectorInput(lists));
        self
    }

    pub fn add_vector_output(&mut self, array: &'a mut GenericVectorArray) -> &mut Self {
        self.slots.push(ParamSlot::VectorOutput(array));
        self
    }

    pub fn add_mutable_vector(&mut self, array: &'a mut GenericVectorArray) -> &mut Self {
        self.slots.push(ParamSlot::MutableVector(array));
        self
    }

    /// Check arity, categories and types against the signature.
    pub fn try_build(self) -> Result<Params<'a>, BindError> {
        if self.slots.len() != self.signature.len() {
            return Err(BindError::ArityMismatch {
                function: self.signature.name().to_string(),
                expected: self.signature.len(),
                actual: self.slots.len(),
            });
        }
        for (index, slot) in self.slots.iter().enumerate() {
            check_slot(self.signature, index, slot)?;
        }
        Ok(Params {
            signature: self.signature,
            slots: self.slots,
        })
    }

    /// Like `try_build`, panicking on a binding that does not fit the signature.
    pub fn build(self) -> Params<'a> {
        match self.try_build() {
            Ok(params) => params,
            Err(err) => panic!("{err}"),
        }
    }
}
