//! Runtime type descriptors.
//!
//! A `TypeDesc` is the runtime identity of a value type stored in erased containers.
//! Two descriptors compare equal iff they describe the same Rust type.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::array::{AnyArray, AnyLists};
use crate::math::{Mat4, Rgba, Vec3};

/// A value type that can flow through function parameters.
///
/// `Clone` is the copy-construct operation, `Default` the default-construct
/// operation, and `Drop` the destroy operation. Implementing this trait is the
/// only step required to make a new type usable in signatures.
pub trait DataType: Any + Clone + Default + fmt::Debug + Send + Sync {
    /// Display name used in signatures, dumps and registries.
    const NAME: &'static str;
}

/// Implements `DataType` for a list of `type => "name"` pairs.
#[macro_export]
macro_rules! impl_data_type {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl $crate::types::DataType for $ty {
                const NAME: &'static str = $name;
            }
        )*
    };
}

impl_data_type! {
    f32 => "float",
    i32 => "int",
    bool => "bool",
    String => "string",
    Vec3 => "float3",
    Mat4 => "float4x4",
    Rgba => "rgba",
}

/// Runtime descriptor of a `DataType`.
///
/// Cheap to copy. Carries the allocation entry points for erased storage so that
/// generic code (switch, attribute lookup, vectorization) can create containers
/// for types it does not know at compile time.
#[derive(Clone, Copy)]
pub struct TypeDesc {
    name: &'static str,
    id: TypeId,
    size: usize,
    new_array: fn(usize) -> Box<dyn AnyArray>,
    new_lists: fn(usize) -> Box<dyn AnyLists>,
}

impl TypeDesc {
    /// Descriptor for `T`.
    pub fn of<T: DataType>() -> Self {
        Self {
            name: T::NAME,
            id: TypeId::of::<T>(),
            size: std::mem::size_of::<T>(),
            new_array: new_array::<T>,
            new_lists: new_lists::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Size of one value in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether this descriptor describes `T`.
    #[inline]
    pub fn is<T: DataType>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Allocate `len` default-constructed values.
    pub fn allocate_array(&self, len: usize) -> Box<dyn AnyArray> {
        (self.new_array)(len)
    }

    /// Allocate `len` empty per-index lists.
    pub fn allocate_lists(&self, len: usize) -> Box<dyn AnyLists> {
        (self.new_lists)(len)
    }
}

fn new_array<T: DataType>(len: usize) -> Box<dyn AnyArray> {
    Box::new(vec![T::default(); len])
}

fn new_lists<T: DataType>(len: usize) -> Box<dyn AnyLists> {
    let lists: Vec<Vec<T>> = (0..len).map(|_| Vec::new()).collect();
    Box::new(lists)
}

impl PartialEq for TypeDesc {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDesc {}

impl Hash for TypeDesc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeDesc").field(&self.name).finish()
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
