//! FacePosetError: unified error type for face-poset public APIs
//!
//! All poset mutation methods propagate these synchronously to the caller;
//! there is no internal retry. The Morse matcher treats them as programmer
//! errors, since it only operates on keys it has just observed to exist.

use crate::poset::CellKey;
use thiserror::Error;

/// Unified error type for face-poset operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FacePosetError {
    /// The referenced dimension has no layer in the poset.
    #[error("could not find layer of dimension {dim}")]
    LayerNotFound { dim: u32 },
    /// The referenced `(dim, name)` key does not exist in its layer.
    #[error("could not find cell {key}")]
    CellNotFound { key: CellKey },
    /// Arc requested between same-dimension nodes, or nodes more than one
    /// dimension apart.
    #[error("cannot place arc between {a} and {b}: layers are not adjacent")]
    InvalidArc { a: CellKey, b: CellKey },
    /// A complex/dimension argument combination is structurally inconsistent.
    #[error("invalid construction: {0}")]
    InvalidConstruction(String),
    /// Mirrored adjacency between a parent and a child is broken. This is a
    /// fatal defect, not a recoverable condition.
    #[error("mirror invariant violated between parent {parent} and child {child}")]
    MirrorViolation { parent: CellKey, child: CellKey },
    /// A Morse `matched` link is not symmetric between the two cells.
    #[error("matched link between {a} and {b} is not symmetric")]
    MatchedAsymmetry { a: CellKey, b: CellKey },
}
