//! Name → type descriptor lookup for front ends.

use indexmap::IndexMap;

use crate::math::{Mat4, Rgba, Vec3};
use crate::types::{DataType, TypeDesc};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("unknown data type `{0}`")]
    UnknownType(String),
}

/// Registered data types, in registration order.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    types: IndexMap<&'static str, TypeDesc>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in data type.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register::<f32>();
        registry.register::<i32>();
        registry.register::<bool>();
        registry.register::<String>();
        registry.register::<Vec3>();
        registry.register::<Mat4>();
        registry.register::<Rgba>();
        registry
    }

    /// Register `T` under `T::NAME`. Re-registering a name replaces the entry.
    pub fn register<T: DataType>(&mut self) -> TypeDesc {
        let desc = TypeDesc::of::<T>();
        self.types.insert(T::NAME, desc);
        desc
    }

    pub fn get(&self, name: &str) -> Result<TypeDesc, TypeError> {
        self.types
            .get(name)
            .copied()
            .ok_or_else(|| TypeError::UnknownType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TypeDesc> + '_ {
        self.types.values().copied()
    }
}
