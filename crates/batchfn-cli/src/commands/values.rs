//! JSON ⇄ typed element values.
//!
//! Numeric and vector types go through their serde representations: `float3`
//! is `[x, y, z]`, `float4x4` sixteen column-major floats, `rgba`
//! `{"r", "g", "b", "a"}`. Objects are referenced by name, `null` being the
//! null reference.

use std::any::Any;
use std::marker::PhantomData;

use batchfn_core::{
    DataType, GenericArray, GenericVectorArray, IndexMask, Mat4, Rgba, TypeDesc, Vec3,
};
use batchfn_lib::ObjectRef;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::batch::BatchError;

/// Objects of a batch by name.
pub type ObjectTable = IndexMap<String, ObjectRef>;

/// JSON form of one element type.
trait JsonElement: DataType {
    fn decode(value: &Value, objects: &ObjectTable) -> Result<Self, String>;

    fn encode(&self) -> Value;
}

macro_rules! impl_serde_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl JsonElement for $ty {
                fn decode(value: &Value, _objects: &ObjectTable) -> Result<Self, String> {
                    <$ty>::deserialize(value).map_err(|e| e.to_string())
                }

                fn encode(&self) -> Value {
                    serde_json::to_value(self).unwrap_or(Value::Null)
                }
            }
        )*
    };
}

impl_serde_element!(f32, i32, bool, String, Vec3, Mat4, Rgba);

impl JsonElement for ObjectRef {
    fn decode(value: &Value, objects: &ObjectTable) -> Result<Self, String> {
        match value {
            Value::Null => Ok(ObjectRef::null()),
            Value::String(name) => objects
                .get(name)
                .cloned()
                .ok_or_else(|| format!("unknown object `{name}`")),
            other => Err(format!("expected an object name or null, got `{other}`")),
        }
    }

    fn encode(&self) -> Value {
        match self.get() {
            Some(object) => Value::String(object.name().to_string()),
            None => Value::Null,
        }
    }
}

/// Erased codec for one element type.
trait Codec {
    fn decode_array(&self, values: &[&Value], objects: &ObjectTable) -> Result<GenericArray, String>;

    fn decode_lists(
        &self,
        lists: &[Vec<&Value>],
        objects: &ObjectTable,
    ) -> Result<GenericVectorArray, String>;

    fn encode(&self, value: &dyn Any) -> Value;
}

struct TypedCodec<T>(PhantomData<T>);

impl<T: JsonElement> Codec for TypedCodec<T> {
    fn decode_array(&self, values: &[&Value], objects: &ObjectTable) -> Result<GenericArray, String> {
        let values = values
            .iter()
            .map(|value| T::decode(value, objects))
            .collect::<Result<Vec<T>, _>>()?;
        Ok(GenericArray::from_vec(values))
    }

    fn decode_lists(
        &self,
        lists: &[Vec<&Value>],
        objects: &ObjectTable,
    ) -> Result<GenericVectorArray, String> {
        let lists = lists
            .iter()
            .map(|list| {
                list.iter()
                    .map(|value| T::decode(value, objects))
                    .collect::<Result<Vec<T>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GenericVectorArray::from_lists(lists))
    }

    fn encode(&self, value: &dyn Any) -> Value {
        value.downcast_ref::<T>().map_or(Value::Null, T::encode)
    }
}

fn typed<T: JsonElement>() -> Box<dyn Codec> {
    Box::new(TypedCodec::<T>(PhantomData))
}

fn codec(ty: TypeDesc, name: &str) -> Result<Box<dyn Codec>, BatchError> {
    let codec = if ty.is::<f32>() {
        typed::<f32>()
    } else if ty.is::<i32>() {
        typed::<i32>()
    } else if ty.is::<bool>() {
        typed::<bool>()
    } else if ty.is::<String>() {
        typed::<String>()
    } else if ty.is::<Vec3>() {
        typed::<Vec3>()
    } else if ty.is::<Mat4>() {
        typed::<Mat4>()
    } else if ty.is::<Rgba>() {
        typed::<Rgba>()
    } else if ty.is::<ObjectRef>() {
        typed::<ObjectRef>()
    } else {
        return Err(BatchError::UnsupportedType {
            name: name.to_string(),
            ty: ty.name().to_string(),
        });
    };
    Ok(codec)
}

/// Values bound to a single-value input.
#[derive(Debug)]
pub enum SingleValues {
    /// One value per element.
    PerElement(GenericArray),
    /// One value for every element.
    Broadcast(GenericArray),
}

/// Decode a single-value input: an array of `size` values, or one value for all.
pub fn decode_single(
    ty: TypeDesc,
    name: &str,
    value: &Value,
    size: usize,
    objects: &ObjectTable,
) -> Result<SingleValues, BatchError> {
    let codec = codec(ty, name)?;
    let invalid = |message| BatchError::InvalidValue {
        name: name.to_string(),
        message,
    };

    let mut per_element_error = None;
    if let Value::Array(items) = value
        && items.len() == size
    {
        let items: Vec<&Value> = items.iter().collect();
        match codec.decode_array(&items, objects) {
            Ok(array) => return Ok(SingleValues::PerElement(array)),
            Err(message) => per_element_error = Some(message),
        }
    }

    match codec.decode_array(&[value], objects) {
        Ok(array) => Ok(SingleValues::Broadcast(array)),
        Err(message) => match (value, per_element_error) {
            (_, Some(per_element)) => Err(invalid(per_element)),
            (Value::Array(items), None) if items.len() != size => Err(BatchError::LengthMismatch {
                name: name.to_string(),
                expected: size,
                actual: items.len(),
            }),
            _ => Err(invalid(message)),
        },
    }
}

/// Decode a list input: an array of `size` lists, or one list for all.
pub fn decode_lists(
    ty: TypeDesc,
    name: &str,
    value: &Value,
    size: usize,
    objects: &ObjectTable,
) -> Result<GenericVectorArray, BatchError> {
    let codec = codec(ty, name)?;
    let invalid = |message| BatchError::InvalidValue {
        name: name.to_string(),
        message,
    };
    let Value::Array(items) = value else {
        return Err(invalid(format!("expected an array, got `{value}`")));
    };

    let mut per_element_error = None;
    if items.len() == size && items.iter().all(Value::is_array) {
        let lists: Vec<Vec<&Value>> = items
            .iter()
            .filter_map(Value::as_array)
            .map(|list| list.iter().collect())
            .collect();
        match codec.decode_lists(&lists, objects) {
            Ok(lists) => return Ok(lists),
            Err(message) => per_element_error = Some(message),
        }
    }

    let list: Vec<&Value> = items.iter().collect();
    let lists = vec![list; size];
    match (codec.decode_lists(&lists, objects), per_element_error) {
        (Ok(lists), _) => Ok(lists),
        (Err(_), Some(per_element)) => Err(invalid(per_element)),
        (Err(_), None) if items.len() != size && items.iter().all(Value::is_array) => {
            Err(BatchError::LengthMismatch {
                name: name.to_string(),
                expected: size,
                actual: items.len(),
            })
        }
        (Err(message), None) => Err(invalid(message)),
    }
}

/// Decode an attribute column: exactly one value per entry.
pub fn decode_column(
    ty: TypeDesc,
    name: &str,
    values: &[Value],
    objects: &ObjectTable,
) -> Result<GenericArray, BatchError> {
    let values: Vec<&Value> = values.iter().collect();
    codec(ty, name)?
        .decode_array(&values, objects)
        .map_err(|message| BatchError::InvalidValue {
            name: name.to_string(),
            message,
        })
}

/// One JSON value per element; `null` outside the mask.
pub fn encode_single(name: &str, array: &GenericArray, mask: &IndexMask<'_>) -> Result<Value, BatchError> {
    let codec = codec(array.type_desc(), name)?;
    let mut out = vec![Value::Null; array.len()];
    for i in mask {
        out[i] = codec.encode(array.element(i));
    }
    Ok(Value::Array(out))
}

/// One JSON list per element; `null` outside the mask.
pub fn encode_lists(
    name: &str,
    lists: &GenericVectorArray,
    mask: &IndexMask<'_>,
) -> Result<Value, BatchError> {
    let codec = codec(lists.type_desc(), name)?;
    let mut out = vec![Value::Null; lists.len()];
    for i in mask {
        let list = lists.get(i);
        out[i] = Value::Array((0..list.len()).map(|j| codec.encode(list.get(j))).collect());
    }
    Ok(Value::Array(out))
}

/// Serialize `outputs` as pretty or compact JSON.
pub fn to_json<T: Serialize>(outputs: &T, pretty: bool) -> Result<String, BatchError> {
    let json = if pretty {
        serde_json::to_string_pretty(outputs)
    } else {
        serde_json::to_string(outputs)
    };
    json.map_err(|e| BatchError::Json(e.to_string()))
}
