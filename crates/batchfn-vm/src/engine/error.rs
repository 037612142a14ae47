//! Errors reported while binding or adapting functions.

use batchfn_core::{ParamCategory, TypeDesc};

/// A `Params` bundle that does not fit a signature.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("`{function}` takes {expected} parameters, {actual} were bound")]
    ArityMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("`{function}` parameter {index} `{name}` is {expected}, bound as {actual}")]
    CategoryMismatch {
        function: String,
        index: usize,
        name: String,
        expected: ParamCategory,
        actual: ParamCategory,
    },

    #[error("`{function}` parameter {index} `{name}` has type `{expected}`, bound as `{actual}`")]
    TypeMismatch {
        function: String,
        index: usize,
        name: String,
        expected: TypeDesc,
        actual: TypeDesc,
    },

    #[error(
        "`{function}` parameter {index} `{name}` holds {len} elements, the mask needs {required}"
    )]
    TooSmall {
        function: String,
        index: usize,
        name: String,
        len: usize,
        required: usize,
    },

    #[error("`{function}` parameter {index} `{name}` was already taken")]
    AlreadyTaken {
        function: String,
        index: usize,
        name: String,
    },
}

/// A function that cannot be wrapped by `SimpleVectorize`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VectorizeError {
    #[error("cannot vectorize `{function}`: no input is marked as vectorized")]
    NoVectorizedInput { function: String },

    #[error("cannot vectorize `{function}`: expected {expected} flags, got {actual}")]
    FlagCountMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("cannot vectorize `{function}`: parameter `{name}` is {category}")]
    UnsupportedCategory {
        function: String,
        name: String,
        category: ParamCategory,
    },

    #[error("cannot vectorize `{function}`: parameter `{name}` is an output")]
    VectorizedOutput { function: String, name: String },
}
