//! Cell-complex collaborator contract and poset construction.
//!
//! The poset core never builds a complex itself; it consumes one through the
//! [`Complex`] trait, which an external triangulation provider implements. The
//! core only needs three things from it: enumerate cells of a dimension in a
//! stable order, report the top dimension, and answer "what is the j-th
//! boundary face of this cell". Cell handles are opaque and support equality
//! comparison only.
//!
//! [`InMemoryComplex`] is the in-process implementation used when no external
//! provider is involved, and the standard way to build fixtures.

pub mod in_memory;

pub use in_memory::{CellHandle, InMemoryComplex};

use crate::poset::{CellKey, FacePoset};
use crate::poset_error::FacePosetError;
use std::fmt;

/// Contract an external cell-complex provider must satisfy.
pub trait Complex {
    /// Opaque handle to one geometric cell. The core never inspects it beyond
    /// equality comparison.
    type Cell: Clone + PartialEq + fmt::Debug;

    /// Dimension of the highest-dimensional cells in the complex.
    fn top_dimension(&self) -> u32;

    /// Cells of dimension `dim`, in a fixed, complex-defined order that is
    /// stable across calls.
    fn cells_of_dimension(&self, dim: u32) -> Vec<Self::Cell>;

    /// The `j`-th dimension-`face_dim` boundary face of `cell`, where `cell`
    /// has dimension `face_dim + 1` and `j` ranges over `0..=face_dim + 1`.
    fn boundary_face(
        &self,
        cell: &Self::Cell,
        face_dim: u32,
        j: u32,
    ) -> Result<Self::Cell, FacePosetError>;
}

impl<C: Clone + PartialEq + fmt::Debug> FacePoset<C> {
    /// Builds the face poset of `complex` up to its top dimension.
    ///
    /// # Errors
    /// [`FacePosetError::InvalidConstruction`] when a boundary face resolves to
    /// no enumerated cell, plus whatever the provider's
    /// [`boundary_face`](Complex::boundary_face) surfaces.
    pub fn from_complex<K>(complex: &K) -> Result<Self, FacePosetError>
    where
        K: Complex<Cell = C>,
    {
        Self::from_complex_with_dim(complex, complex.top_dimension())
    }

    /// Builds the face poset of `complex` up to dimension `dim`: one node per
    /// cell per dimension, named by enumeration index, then one covering arc
    /// per boundary face, resolved by cell-handle equality.
    ///
    /// # Errors
    /// [`FacePosetError::InvalidConstruction`] when `dim` exceeds the
    /// complex's top dimension or a boundary face resolves to no enumerated
    /// cell.
    pub fn from_complex_with_dim<K>(complex: &K, dim: u32) -> Result<Self, FacePosetError>
    where
        K: Complex<Cell = C>,
    {
        if dim > complex.top_dimension() {
            return Err(FacePosetError::InvalidConstruction(format!(
                "requested dimension {dim} exceeds complex top dimension {}",
                complex.top_dimension()
            )));
        }

        let mut poset = FacePoset::new();
        for d in 0..=dim {
            for (name, cell) in complex.cells_of_dimension(d).into_iter().enumerate() {
                poset.add_node(d, name as u32, cell);
            }
        }

        for d in (1..=dim).rev() {
            let names: Vec<u32> = poset.nodes_in_dim(d).map(|node| node.name()).collect();
            for name in names {
                let key = CellKey::new(d, name);
                let cell = poset.get_cell(key)?.clone();
                for j in 0..=d {
                    let face = complex.boundary_face(&cell, d - 1, j)?;
                    let face_key = poset.find_by_cell(d - 1, &face).ok_or_else(|| {
                        FacePosetError::InvalidConstruction(format!(
                            "boundary face {j} of cell {key} is not enumerated in dimension {}",
                            d - 1
                        ))
                    })?;
                    poset.add_arc(key, face_key)?;
                }
            }
        }

        log::debug!(
            "built face poset: {} cells across dimensions 0..={dim}",
            poset.node_count()
        );
        Ok(poset)
    }
}

#[cfg(test)]
mod construct_tests {
    use super::*;

    /// Hollow triangle: three vertices, three edges, no 2-cell.
    fn hollow_triangle() -> InMemoryComplex {
        let mut complex = InMemoryComplex::new(1);
        for _ in 0..3 {
            complex.add_vertex().unwrap();
        }
        complex.add_cell(1, [0, 1]).unwrap();
        complex.add_cell(1, [1, 2]).unwrap();
        complex.add_cell(1, [0, 2]).unwrap();
        complex
    }

    #[test]
    fn builds_nodes_and_arcs() {
        let fp = FacePoset::from_complex(&hollow_triangle()).unwrap();
        assert_eq!(fp.node_count(), 6);
        // every edge has two vertex children, every vertex two edge parents
        for edge in fp.nodes_in_dim(1) {
            assert_eq!(edge.children().len(), 2);
        }
        for vertex in fp.nodes_in_dim(0) {
            assert_eq!(vertex.parents().len(), 2);
        }
    }

    #[test]
    fn dim_truncation_and_bounds() {
        let complex = hollow_triangle();
        let fp = FacePoset::from_complex_with_dim(&complex, 0).unwrap();
        assert_eq!(fp.node_count(), 3);
        assert!(matches!(
            FacePoset::from_complex_with_dim(&complex, 2),
            Err(FacePosetError::InvalidConstruction(_))
        ));
    }

    #[test]
    fn double_incidence_becomes_parallel_arcs() {
        // one vertex, one loop edge glued to it at both ends
        let mut complex = InMemoryComplex::new(1);
        complex.add_vertex().unwrap();
        complex.add_cell(1, [0, 0]).unwrap();
        let mut fp = FacePoset::from_complex(&complex).unwrap();
        assert_eq!(
            fp.get_node(CellKey::new(1, 0)).unwrap().children(),
            &[CellKey::new(0, 0), CellKey::new(0, 0)]
        );
        fp.strip_multi_edges();
        let edge = fp.get_node(CellKey::new(1, 0)).unwrap();
        assert!(edge.children().is_empty());
        assert_eq!(edge.irregular_children(), &[CellKey::new(0, 0)]);
    }
}
