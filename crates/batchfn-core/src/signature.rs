//! Function signatures: ordered, typed, categorized parameter lists.
//!
//! Position is the binding key; names are for diagnostics and dumps and need not
//! be unique.

use std::fmt;

use crate::types::{DataType, TypeDesc};

/// How a parameter is passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamCategory {
    /// One read-only value per index (possibly broadcast).
    ReadonlySingleInput,
    /// One value per index, written by the callee.
    SingleOutput,
    /// One read-only list per index.
    ReadonlyVectorInput,
    /// One growable list per index, written by the callee.
    VectorOutput,
    /// One list per index, read and extended by the callee.
    MutableVector,
}

impl ParamCategory {
    pub fn is_input(self) -> bool {
        matches!(
            self,
            Self::ReadonlySingleInput | Self::ReadonlyVectorInput | Self::MutableVector
        )
    }

    pub fn is_output(self) -> bool {
        matches!(
            self,
            Self::SingleOutput | Self::VectorOutput | Self::MutableVector
        )
    }

    /// Whether the parameter holds a list per index.
    pub fn is_vector(self) -> bool {
        matches!(
            self,
            Self::ReadonlyVectorInput | Self::VectorOutput | Self::MutableVector
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadonlySingleInput => "single_in",
            Self::SingleOutput => "single_out",
            Self::ReadonlyVectorInput => "vector_in",
            Self::VectorOutput => "vector_out",
            Self::MutableVector => "mutable",
        }
    }
}

impl fmt::Display for ParamCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category plus element type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParamType {
    category: ParamCategory,
    ty: TypeDesc,
}

impl ParamType {
    pub fn new(category: ParamCategory, ty: TypeDesc) -> Self {
        Self { category, ty }
    }

    pub fn category(&self) -> ParamCategory {
        self.category
    }

    pub fn type_desc(&self) -> TypeDesc {
        self.ty
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.category, self.ty)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamDef {
    pub name: String,
    pub param_type: ParamType,
}

/// Immutable parameter list of one function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    name: String,
    params: Vec<ParamDef>,
}

impl Signature {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn param(&self, index: usize) -> &ParamDef {
        &self.params[index]
    }

    pub fn param_type(&self, index: usize) -> ParamType {
        self.params[index].param_type
    }

    pub fn param_name(&self, index: usize) -> &str {
        &self.params[index].name
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParamDef> {
        self.params.iter()
    }

    /// Position of the first parameter named `name`.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }
}

/// Builds a `Signature` one parameter at a time.
#[derive(Clone, Debug)]
pub struct SignatureBuilder {
    name: String,
    params: Vec<ParamDef>,
}

impl SignatureBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, param_type: ParamType) -> Self {
        self.params.push(ParamDef {
            name: name.into(),
            param_type,
        });
        self
    }

    pub fn single_input<T: DataType>(self, name: impl Into<String>) -> Self {
        self.single_input_of(name, TypeDesc::of::<T>())
    }

    pub fn single_input_of(self, name: impl Into<String>, ty: TypeDesc) -> Self {
        self.param(name, ParamType::new(ParamCategory::ReadonlySingleInput, ty))
    }

    pub fn single_output<T: DataType>(self, name: impl Into<String>) -> Self {
        self.single_output_of(name, TypeDesc::of::<T>())
    }

    pub fn single_output_of(self, name: impl Into<String>, ty: TypeDesc) -> Self {
        self.param(name, ParamType::new(ParamCategory::SingleOutput, ty))
    }

    pub fn vector_input<T: DataType>(self, name: impl Into<String>) -> Self {
        self.vector_input_of(name, TypeDesc::of::<T>())
    }

    pub fn vector_input_of(self, name: impl Into<String>, ty: TypeDesc) -> Self {
        self.param(name, ParamType::new(ParamCategory::ReadonlyVectorInput, ty))
    }

    pub fn vector_output<T: DataType>(self, name: impl Into<String>) -> Self {
        self.vector_output_of(name, TypeDesc::of::<T>())
    }

    pub fn vector_output_of(self, name: impl Into<String>, ty: TypeDesc) -> Self {
        self.param(name, ParamType::new(ParamCategory::VectorOutput, ty))
    }

    pub fn mutable_vector<T: DataType>(self, name: impl Into<String>) -> Self {
        self.mutable_vector_of(name, TypeDesc::of::<T>())
    }

    pub fn mutable_vector_of(self, name: impl Into<String>, ty: TypeDesc) -> Self {
        self.param(name, ParamType::new(ParamCategory::MutableVector, ty))
    }

    pub fn build(self) -> Signature {
        Signature {
            name: self.name,
            params: self.params,
        }
    }
}
