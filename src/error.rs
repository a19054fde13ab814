//! Error types and result definitions for FIT parsing and verification.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, FitError>;

/// A raw property value whose bytes do not have the shape its decoded
/// type requires.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropError {
    /// A u32 property must be exactly 4 bytes.
    #[error("expected exactly 4 bytes for a u32 value, found {0}")]
    U32Length(usize),

    /// A u32 array property must be a whole number of 4-byte cells.
    #[error("length {0} is not a multiple of 4")]
    U32ArrayLength(usize),
}

/// An image payload failing to validate against a hash record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HashError {
    /// The hash record names an algorithm outside the supported table.
    #[error("unsupported hash algorithm `{0}`")]
    UnsupportedAlgorithm(String),

    /// The recomputed digest does not equal the stored one.
    #[error("{algorithm} digest mismatch: expected {expected}, computed {computed}")]
    DigestMismatch {
        algorithm: &'static str,
        /// Hex rendering of the digest stored in the tree.
        expected: String,
        /// Hex rendering of the digest computed over the payload.
        computed: String,
    },
}

/// Top-level error for building a [`Fit`](crate::fit::Fit) model.
///
/// Every variant is terminal: the first error encountered aborts the whole
/// build and no partial model is ever returned.
#[derive(Debug, Error)]
pub enum FitError {
    /// A property exists but its raw bytes do not decode as the required type.
    #[error("malformed property `{name}` on node `{node}`: {source}")]
    MalformedProperty {
        node: String,
        name: String,
        source: PropError,
    },

    /// A required property is absent on a node.
    #[error("node `{node}` is missing required property `{name}`")]
    MissingProperty { node: String, name: String },

    /// A required named child or root-level property is absent.
    #[error("required node or property `{0}` is missing")]
    Structural(String),

    /// A configuration references an image name absent from the images table.
    #[error("configuration `{configuration}` references unknown image `{name}` via `{field}`")]
    UnknownImage {
        configuration: String,
        field: &'static str,
        name: String,
    },

    /// An image's data failed to validate against one of its hash records.
    #[error("image `{image}` failed integrity check at `{record}`: {source}")]
    Integrity {
        image: String,
        record: String,
        source: HashError,
    },

    /// The external device tree decoder rejected the raw blob.
    #[error("device tree decode failed: {0}")]
    Tree(String),
}
