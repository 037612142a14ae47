#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for batch function evaluation.
//!
//! Three layers:
//! - **Types**: runtime type descriptors (`TypeDesc`) for values stored behind erased containers
//! - **Signatures**: ordered, typed, categorized parameter lists
//! - **Containers**: masks, virtual list views, and owned erased arrays / per-index lists
//!
//! All erased storage is backed by `Vec<T>` (single values per index) or `Vec<Vec<T>>`
//! (one growable buffer per index). Views over that storage are cheap `Copy` values.

pub mod array;
pub mod colors;
pub mod dump;
pub mod generic;
mod invariants;
pub mod mask;
pub mod math;
pub mod registry;
pub mod signature;
pub mod types;
pub mod virtual_list;

#[cfg(test)]
mod generic_tests;
#[cfg(test)]
mod registry_tests;

pub use array::{AnyArray, AnyLists};
pub use colors::Colors;
pub use dump::dump_signature;
pub use generic::{
    GenericArray, GenericMutableArray, GenericVectorArray, GenericVirtualList,
    GenericVirtualListList, VectorArrayMut,
};
pub use mask::{IndexMask, MaskError};
pub use math::{Mat4, Rgba, Vec3};
pub use registry::{TypeError, TypeRegistry};
pub use signature::{ParamCategory, ParamDef, ParamType, Signature, SignatureBuilder};
pub use types::{DataType, TypeDesc};
pub use virtual_list::{VirtualList, VirtualListList};
