//! Batch files: element count, inputs, objects and context records as JSON.
//!
//! ```json
//! {
//!   "size": 3,
//!   "inputs": { "A": [1, 2, 3], "B": 10 },
//!   "objects": { "Plane": { "transform": [..16 floats..], "mesh": [[0, 0, 0], [1, 0, 0]] } },
//!   "context": { "frame": 24, "spatial": true }
//! }
//! ```

use std::borrow::Cow;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use batchfn_core::{IndexMask, MaskError, Mat4, TypeError, TypeRegistry, Vec3};
use batchfn_lib::{
    AttributeStore, Mesh, Object, ObjectRef, ObjectSpatialIndex, ParticleAttributesContext,
    RegistryError, SceneTimeContext, VertexPositionArray,
};
use batchfn_vm::{BindError, ContextBuilder, IndexRemap, VectorizeError};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use super::values::{ObjectTable, decode_column};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    #[error("batch is required: use --batch or --batch-json")]
    MissingBatch,

    #[error("failed to read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("invalid batch JSON: {0}")]
    Json(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Vectorize(#[from] VectorizeError),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error(transparent)]
    Mask(#[from] MaskError),

    #[error("mask index {index} is out of range for batch size {size}")]
    MaskOutOfRange { index: usize, size: usize },

    #[error("`{function}` has no parameter named `{name}`")]
    UnknownParameter { function: String, name: String },

    #[error("`{function}` has no input named `{name}`")]
    UnknownInput { function: String, name: String },

    #[error("missing input `{name}` for `{function}`")]
    MissingInput { function: String, name: String },

    #[error("invalid value for `{name}`: {message}")]
    InvalidValue { name: String, message: String },

    #[error("`{name}` holds {actual} values, the batch size is {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("values of type `{ty}` cannot be read from JSON (`{name}`)")]
    UnsupportedType { name: String, ty: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchFile {
    pub size: usize,
    #[serde(default)]
    pub inputs: IndexMap<String, Value>,
    #[serde(default)]
    pub objects: IndexMap<String, ObjectSpec>,
    #[serde(default)]
    pub context: ContextSpec,
}

/// A scene object. Without `mesh` the object is an empty (transform only).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectSpec {
    /// Column-major object-to-world matrix; identity when absent.
    pub transform: Option<[f32; 16]>,
    pub mesh: Option<Vec<[f32; 3]>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContextSpec {
    pub frame: Option<f32>,
    pub vertex_positions: Option<VertexPositionsSpec>,
    pub attributes: Option<AttributesSpec>,
    /// Build a nearest-vertex index for every mesh object.
    #[serde(default)]
    pub spatial: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VertexPositionsSpec {
    pub positions: Vec<[f32; 3]>,
    pub remap: Option<Vec<Option<usize>>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributesSpec {
    pub remap: Option<Vec<Option<usize>>>,
    #[serde(default)]
    pub columns: IndexMap<String, ColumnSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSpec {
    #[serde(rename = "type")]
    pub ty: String,
    pub values: Vec<Value>,
}

impl BatchFile {
    pub fn parse(text: &str) -> Result<Self, BatchError> {
        serde_json::from_str(text).map_err(|e| BatchError::Json(e.to_string()))
    }

    /// Read a batch file, `-` meaning stdin.
    pub fn load(path: &Path) -> Result<Self, BatchError> {
        let io_error = |e: io::Error| BatchError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        let text = if path.as_os_str() == "-" {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).map_err(io_error)?;
            buf
        } else {
            fs::read_to_string(path).map_err(io_error)?
        };
        Self::parse(&text)
    }

    /// Named objects as shareable references.
    pub fn object_table(&self) -> ObjectTable {
        self.objects
            .iter()
            .map(|(name, spec)| (name.clone(), ObjectRef::new(Arc::new(spec.build(name)))))
            .collect()
    }

    /// The mask over the batch: every element, or the given ascending indices.
    pub fn mask(&self, indices: Option<&[usize]>) -> Result<IndexMask<'static>, BatchError> {
        let Some(indices) = indices else {
            return Ok(IndexMask::range(self.size));
        };
        if let Some(&index) = indices.iter().find(|&&index| index >= self.size) {
            return Err(BatchError::MaskOutOfRange {
                index,
                size: self.size,
            });
        }
        Ok(IndexMask::try_new(indices.to_vec())?)
    }

    /// Attach the batch's context records to `builder`.
    pub fn attach_context<'a>(
        &self,
        mut builder: ContextBuilder<'a>,
        objects: &ObjectTable,
        types: &TypeRegistry,
    ) -> Result<ContextBuilder<'a>, BatchError> {
        let spec = &self.context;
        if let Some(frame) = spec.frame {
            builder =
                builder.owned_element_context(SceneTimeContext { time: frame }, IndexRemap::Identity);
        }
        if let Some(vertices) = &spec.vertex_positions {
            let positions = vertices.positions.iter().copied().map(Vec3::from).collect();
            builder = builder.owned_element_context(
                VertexPositionArray { positions },
                remap_of(&vertices.remap),
            );
        }
        if let Some(attributes) = &spec.attributes {
            let mut store = AttributeStore::new();
            for (name, column) in &attributes.columns {
                let ty = types.get(&column.ty)?;
                store.insert(name.clone(), decode_column(ty, name, &column.values, objects)?);
            }
            builder = builder.owned_element_context(
                ParticleAttributesContext { attributes: store },
                remap_of(&attributes.remap),
            );
        }
        if spec.spatial {
            let index = ObjectSpatialIndex::from_objects(objects.values().filter_map(ObjectRef::get));
            builder = builder.owned_element_context(index, IndexRemap::Identity);
        }
        Ok(builder)
    }
}

impl ObjectSpec {
    fn build(&self, name: &str) -> Object {
        let transform = self
            .transform
            .map(|columns| Mat4::from_cols_array(&columns))
            .unwrap_or(Mat4::IDENTITY);
        match &self.mesh {
            Some(positions) => {
                let positions = positions.iter().copied().map(Vec3::from).collect();
                Object::mesh(name, transform, Mesh::new(positions))
            }
            None => Object::empty(name, transform),
        }
    }
}

fn remap_of(table: &Option<Vec<Option<usize>>>) -> IndexRemap<'static> {
    match table {
        Some(table) => IndexRemap::Table(Cow::Owned(table.clone())),
        None => IndexRemap::Identity,
    }
}
