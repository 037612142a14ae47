//! Call context: per-element context records and the tracer.
//!
//! Records are kept in a short ordered list and looked up by type with a linear
//! scan; only the first record of a type is ever returned.

use std::any::{Any, TypeId};
use std::borrow::Cow;

use super::trace::{NoopTracer, Tracer};

/// Maps a global element index to an index into a context record's data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum IndexRemap<'a> {
    /// Global and local indices coincide.
    #[default]
    Identity,
    /// Every element maps to the same local index.
    Constant(usize),
    /// Explicit table. `None`, or an index past the end, means the element has no entry.
    Table(Cow<'a, [Option<usize>]>),
}

impl IndexRemap<'_> {
    pub fn local(&self, global: usize) -> Option<usize> {
        match self {
            Self::Identity => Some(global),
            Self::Constant(local) => Some(*local),
            Self::Table(table) => table.get(global).copied().flatten(),
        }
    }
}

enum ContextData<'a> {
    Borrowed(&'a (dyn Any + Send + Sync)),
    Owned(Box<dyn Any + Send + Sync>),
}

impl ContextData<'_> {
    fn as_any(&self) -> &(dyn Any + Send + Sync) {
        match self {
            Self::Borrowed(data) => *data,
            Self::Owned(data) => data.as_ref(),
        }
    }
}

struct ContextRecord<'a> {
    type_id: TypeId,
    data: ContextData<'a>,
    remap: IndexRemap<'a>,
}

/// A context record resolved by type.
#[derive(Debug)]
pub struct ContextRef<'c, T> {
    data: &'c T,
    remap: &'c IndexRemap<'c>,
}

impl<T> Clone for ContextRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ContextRef<'_, T> {}

impl<'c, T> ContextRef<'c, T> {
    pub fn data(&self) -> &'c T {
        self.data
    }

    pub fn remap(&self) -> &'c IndexRemap<'c> {
        self.remap
    }

    /// Local index of a global element, or `None` when it has no entry.
    pub fn local(&self, global: usize) -> Option<usize> {
        self.remap.local(global)
    }
}

/// Ordered registry of context records.
#[derive(Default)]
pub struct ElementContexts<'a> {
    records: Vec<ContextRecord<'a>>,
}

impl<'a> ElementContexts<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach caller-owned data.
    pub fn add<T: Any + Send + Sync>(&mut self, data: &'a T, remap: IndexRemap<'a>) {
        self.records.push(ContextRecord {
            type_id: TypeId::of::<T>(),
            data: ContextData::Borrowed(data),
            remap,
        });
    }

    /// Attach data owned by the registry.
    pub fn add_owned<T: Any + Send + Sync>(&mut self, data: T, remap: IndexRemap<'a>) {
        self.records.push(ContextRecord {
            type_id: TypeId::of::<T>(),
            data: ContextData::Owned(Box::new(data)),
            remap,
        });
    }

    /// The first record holding a `T`.
    pub fn find_first<T: Any>(&self) -> Option<ContextRef<'_, T>> {
        let wanted = TypeId::of::<T>();
        self.records
            .iter()
            .find(|record| record.type_id == wanted)
            .and_then(|record| {
                let data = record.data.as_any().downcast_ref::<T>()?;
                Some(ContextRef {
                    data,
                    remap: &record.remap,
                })
            })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

static NOOP_TRACER: NoopTracer = NoopTracer;

/// Everything a function may consult besides its parameters.
pub struct Context<'a> {
    element_contexts: ElementContexts<'a>,
    tracer: &'a dyn Tracer,
}

impl Context<'static> {
    /// No context records, no tracing.
    pub fn empty() -> Self {
        Self {
            element_contexts: ElementContexts::new(),
            tracer: &NOOP_TRACER,
        }
    }
}

impl<'a> Context<'a> {
    pub fn element_contexts(&self) -> &ElementContexts<'a> {
        &self.element_contexts
    }

    pub fn tracer(&self) -> &'a dyn Tracer {
        self.tracer
    }

    /// Shorthand for `element_contexts().find_first::<T>()`.
    pub fn find_first<T: Any>(&self) -> Option<ContextRef<'_, T>> {
        self.element_contexts.find_first::<T>()
    }
}

/// Builds a `Context`.
pub struct ContextBuilder<'a> {
    element_contexts: ElementContexts<'a>,
    tracer: &'a dyn Tracer,
}

impl Default for ContextBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ContextBuilder<'a> {
    pub fn new() -> Self {
        Self {
            element_contexts: ElementContexts::new(),
            tracer: &NOOP_TRACER,
        }
    }

    pub fn element_context<T: Any + Send + Sync>(mut self, data: &'a T, remap: IndexRemap<'a>) -> Self {
        self.element_contexts.add(data, remap);
        self
    }

    pub fn owned_element_context<T: Any + Send + Sync>(
        mut self,
        data: T,
        remap: IndexRemap<'a>,
    ) -> Self {
        self.element_contexts.add_owned(data, remap);
        self
    }

    pub fn tracer(mut self, tracer: &'a dyn Tracer) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn build(self) -> Context<'a> {
        Context {
            element_contexts: self.element_contexts,
            tracer: self.tracer,
        }
    }
}
