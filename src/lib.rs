//! # face-poset
//!
//! face-poset builds and manipulates the face poset (Hasse diagram) of a finite
//! simplicial/cell complex, and computes discrete Morse matchings on it via a
//! randomized greedy collapse. Nodes of the poset are the cells of the complex,
//! graded by dimension; covering arcs record which lower-dimensional cell bounds
//! which higher-dimensional cell, including multiple incidences from boundary
//! self-identifications.
//!
//! ## Features
//! - [`FacePoset`](poset::FacePoset): dimension-graded node arena with mirrored
//!   parent/child adjacency and fail-fast mutation
//! - Multi-edge separation ([`FacePoset::strip_multi_edges`](poset::FacePoset::strip_multi_edges))
//!   splitting regular from irregular (multiplicity ≥ 2) incidences
//! - A [`Complex`](complex::Complex) trait for external cell-complex providers,
//!   with [`InMemoryComplex`](complex::InMemoryComplex) for in-process use
//! - [`randomized_morse_matching`](morse::randomized_morse_matching): destructive
//!   greedy reduction producing matched pairs and critical cells
//!
//! ## Determinism
//!
//! Layers iterate in ascending name order and the matcher scans dimensions from
//! highest to lowest, so matched-pair and critical-cell sequences are reproducible.
//! All randomized decisions use `SmallRng` with explicitly supplied seeds; unit
//! tests fix seeds to check exact output sequences.
//!
//! ## Usage
//! ```rust
//! use face_poset::prelude::*;
//!
//! // A hollow triangle: three vertices, three edges.
//! let mut complex = InMemoryComplex::new(1);
//! for _ in 0..3 {
//!     complex.add_vertex().unwrap();
//! }
//! complex.add_cell(1, [0, 1]).unwrap();
//! complex.add_cell(1, [1, 2]).unwrap();
//! complex.add_cell(1, [0, 2]).unwrap();
//!
//! let mut poset = FacePoset::from_complex(&complex).unwrap();
//! poset.strip_multi_edges();
//! let matching = randomized_morse_matching(&mut poset);
//! assert_eq!(matching.cells_accounted(), 6);
//! ```

pub mod complex;
pub mod morse;
pub mod poset;
pub mod poset_error;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::complex::{CellHandle, Complex, InMemoryComplex};
    pub use crate::morse::{
        CriticalSelector, FirstInScan, MorseMatching, UniformRandom, randomized_morse_matching,
        randomized_morse_matching_with,
    };
    pub use crate::poset::validation::{PosetValidationOptions, validate_face_poset};
    pub use crate::poset::{CellKey, FacePoset, PosetNode};
    pub use crate::poset_error::FacePosetError;
}
