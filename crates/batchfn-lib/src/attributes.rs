//! Named, typed per-element columns.

use batchfn_core::{GenericArray, TypeDesc};
use indexmap::IndexMap;

/// Attribute columns by name, in insertion order.
#[derive(Debug, Default)]
pub struct AttributeStore {
    columns: IndexMap<String, GenericArray>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the column `name`.
    pub fn insert(&mut self, name: impl Into<String>, column: GenericArray) {
        self.columns.insert(name.into(), column);
    }

    pub fn get(&self, name: &str) -> Option<&GenericArray> {
        self.columns.get(name)
    }

    /// The column `name` if it holds values of type `ty`.
    pub fn try_get(&self, name: &str, ty: TypeDesc) -> Option<&GenericArray> {
        self.get(name).filter(|column| column.type_desc() == ty)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
