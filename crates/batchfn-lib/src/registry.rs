//! Name → function lookup for front ends.
//!
//! Keys are snake_case. Type-generic functions are registered once per data
//! type under `<kind>.<type>`, e.g. `switch.float3`. Particle attribute readers
//! are built on demand from `attribute.<type>.<name>` keys.

use std::sync::Arc;

use batchfn_core::{TypeDesc, TypeError, TypeRegistry};
use batchfn_vm::MultiFunction;
use indexmap::IndexMap;

use crate::functions::{
    AddFloat3s, AddFloats, Clamp, ClosestPointOnObject, CombineColor, CombineVector,
    ContextCurrentFrame, ContextVertexPosition, FloatArraySum, FloatRange, ListAppend, MapRange,
    ObjectVertexPositions, ObjectWorldLocation, ParticleAttribute, PerlinNoise1d, PerlinNoise3d,
    SeparateColor, SeparateVector, SwitchSingle, SwitchVector, TextLength, VectorDistance,
};
use crate::scene::ObjectRef;

const ATTRIBUTE_PREFIX: &str = "attribute.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown function `{name}`{}", suggestion_hint(.suggestion))]
    UnknownFunction {
        name: String,
        suggestion: Option<String>,
    },

    #[error(transparent)]
    UnknownType(#[from] TypeError),

    #[error("malformed attribute key `{0}`, expected `attribute.<type>.<name>`")]
    MalformedAttributeKey(String),
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(", did you mean `{name}`?"),
        None => String::new(),
    }
}

/// Registered functions by key, in registration order.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    types: TypeRegistry,
    functions: IndexMap<String, Arc<dyn MultiFunction>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in function, generic ones instantiated for every data type.
    pub fn builtins() -> Self {
        let mut types = TypeRegistry::with_builtins();
        types.register::<ObjectRef>();

        let mut registry = Self {
            types,
            functions: IndexMap::new(),
        };
        registry.register("add_floats", AddFloats::new());
        registry.register("add_float3s", AddFloat3s::new());
        registry.register("vector_distance", VectorDistance::new());
        registry.register("float_array_sum", FloatArraySum::new());
        registry.register("map_range", MapRange::new());
        registry.register("clamp", Clamp::new());
        registry.register("combine_color", CombineColor::new());
        registry.register("separate_color", SeparateColor::new());
        registry.register("combine_vector", CombineVector::new());
        registry.register("separate_vector", SeparateVector::new());
        registry.register("float_range", FloatRange::new());
        registry.register("text_length", TextLength::new());
        registry.register("object_vertex_positions", ObjectVertexPositions::new());
        registry.register("object_world_location", ObjectWorldLocation::new());
        registry.register("closest_point_on_object", ClosestPointOnObject::new());
        registry.register("perlin_noise_3d_to_1d", PerlinNoise1d::new());
        registry.register("perlin_noise_3d_to_3d", PerlinNoise3d::new());
        registry.register("vertex_position", ContextVertexPosition::new());
        registry.register("current_frame", ContextCurrentFrame::new());

        let types: Vec<TypeDesc> = registry.types.iter().collect();
        for ty in types {
            registry.register(format!("switch.{ty}"), SwitchSingle::new(ty));
            registry.register(format!("switch_list.{ty}"), SwitchVector::new(ty));
            registry.register(format!("list_append.{ty}"), ListAppend::new(ty));
        }
        registry
    }

    /// Register `function` under `key`. Re-registering a key replaces the entry.
    pub fn register(&mut self, key: impl Into<String>, function: impl MultiFunction + 'static) {
        self.functions.insert(key.into(), Arc::new(function));
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn get(&self, key: &str) -> Option<&Arc<dyn MultiFunction>> {
        self.functions.get(key)
    }

    /// Registered function for `key`, or an error carrying the closest key.
    pub fn try_get(&self, key: &str) -> Result<Arc<dyn MultiFunction>, RegistryError> {
        self.get(key)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownFunction {
                name: key.to_string(),
                suggestion: self.suggest(key),
            })
    }

    /// Like `try_get`, also building `attribute.<type>.<name>` readers.
    pub fn resolve(&self, key: &str) -> Result<Arc<dyn MultiFunction>, RegistryError> {
        let Some(rest) = key.strip_prefix(ATTRIBUTE_PREFIX) else {
            return self.try_get(key);
        };
        let Some((type_name, attribute)) = rest.split_once('.') else {
            return Err(RegistryError::MalformedAttributeKey(key.to_string()));
        };
        if attribute.is_empty() {
            return Err(RegistryError::MalformedAttributeKey(key.to_string()));
        }
        let ty = self.types.get(type_name)?;
        Ok(Arc::new(ParticleAttribute::new(attribute, ty)))
    }

    /// Closest registered key within edit distance 2.
    pub fn suggest(&self, key: &str) -> Option<String> {
        let key = key.to_lowercase();
        self.functions
            .keys()
            .map(|candidate| (edit_distance(&key, candidate), candidate))
            .filter(|(distance, _)| *distance <= 2)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, candidate)| candidate.clone())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn MultiFunction>)> {
        self.functions.iter().map(|(key, function)| (key.as_str(), function))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Edit distance between two registry keys, keeping a single row of the table.
pub(crate) fn edit_distance(key: &str, candidate: &str) -> usize {
    let candidate: Vec<char> = candidate.chars().collect();
    let mut row: Vec<usize> = (0..=candidate.len()).collect();
    for (i, k) in key.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &c) in candidate.iter().enumerate() {
            let substitute = diagonal + usize::from(k != c);
            diagonal = row[j + 1];
            row[j + 1] = substitute.min(row[j] + 1).min(diagonal + 1);
        }
    }
    row[candidate.len()]
}
