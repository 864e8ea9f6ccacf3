//! Face poset (Hasse diagram) types.
//!
//! This module provides the core types for representing the face poset of a
//! finite cell complex:
//! - [`CellKey`]: the composite `(dim, name)` identity of a cell
//! - [`PosetNode`]: one cell with its mirrored parent/child adjacency
//! - [`FacePoset`]: the dimension-graded node arena and its mutation operations
//! - [`validation`]: whole-poset invariant checks
//!
//! Most users will build a [`FacePoset`] from a [`Complex`](crate::complex::Complex),
//! strip multi-edges, and hand it to the Morse matcher.

pub mod face_poset;
pub mod key;
pub mod node;
pub mod validation;

pub use face_poset::FacePoset;
pub use key::CellKey;
pub use node::PosetNode;
