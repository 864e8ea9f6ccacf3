//! In-memory implementation of the [`Complex`] trait.
//!
//! [`InMemoryComplex`] stores explicit per-dimension cell tables with boundary
//! index lists, which is enough to describe any finite cell complex whose
//! d-cells each expose d + 1 boundary faces (simplices, possibly with
//! identifications: the same face index may appear more than once).

use crate::complex::Complex;
use crate::poset_error::FacePosetError;
use std::fmt;

/// Opaque handle to one cell of an [`InMemoryComplex`]: its dimension and its
/// index within that dimension's table.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct CellHandle {
    dim: u32,
    index: u32,
}

impl CellHandle {
    /// The cell's dimension.
    #[inline]
    pub const fn dim(self) -> u32 {
        self.dim
    }

    /// The cell's index within its dimension.
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }
}

impl fmt::Debug for CellHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CellHandle")
            .field(&self.dim)
            .field(&self.index)
            .finish()
    }
}

/// An in-memory cell complex built from explicit boundary index lists.
///
/// # Example
/// ```rust
/// use face_poset::complex::{Complex, InMemoryComplex};
/// let mut complex = InMemoryComplex::new(1);
/// let v0 = complex.add_vertex().unwrap();
/// let v1 = complex.add_vertex().unwrap();
/// let e0 = complex.add_cell(1, [0, 1]).unwrap();
/// assert_eq!(complex.boundary_face(&e0, 0, 0).unwrap(), v0);
/// assert_eq!(complex.boundary_face(&e0, 0, 1).unwrap(), v1);
/// ```
#[derive(Clone, Debug)]
pub struct InMemoryComplex {
    /// `boundaries[d][i]` lists the dimension-(d-1) indices of the boundary
    /// faces of cell `i` in dimension `d`; entries for dimension 0 are empty.
    boundaries: Vec<Vec<Vec<u32>>>,
}

impl InMemoryComplex {
    /// Creates an empty complex accepting cells of dimension `0..=top_dimension`.
    pub fn new(top_dimension: u32) -> Self {
        InMemoryComplex {
            boundaries: vec![Vec::new(); top_dimension as usize + 1],
        }
    }

    /// Adds a vertex (dimension-0 cell).
    pub fn add_vertex(&mut self) -> Result<CellHandle, FacePosetError> {
        self.add_cell(0, Vec::new())
    }

    /// Adds a cell of dimension `dim` whose boundary faces are the listed
    /// indices into the dimension-(dim-1) table. A `dim`-cell must list exactly
    /// `dim + 1` faces (for `dim > 0`); repeating an index identifies several
    /// boundary faces to the same lower cell.
    ///
    /// # Errors
    /// [`FacePosetError::InvalidConstruction`] when the dimension exceeds the
    /// complex's top dimension, the face count is wrong, or a face index does
    /// not refer to an existing lower cell.
    pub fn add_cell(
        &mut self,
        dim: u32,
        boundary: impl Into<Vec<u32>>,
    ) -> Result<CellHandle, FacePosetError> {
        let boundary = boundary.into();
        if dim as usize >= self.boundaries.len() {
            return Err(FacePosetError::InvalidConstruction(format!(
                "cell dimension {dim} exceeds complex top dimension {}",
                self.boundaries.len() - 1
            )));
        }
        let expected = if dim == 0 { 0 } else { dim as usize + 1 };
        if boundary.len() != expected {
            return Err(FacePosetError::InvalidConstruction(format!(
                "a dimension-{dim} cell must list {expected} boundary faces, got {}",
                boundary.len()
            )));
        }
        if dim > 0 {
            let lower = self.boundaries[dim as usize - 1].len() as u32;
            for &face in &boundary {
                if face >= lower {
                    return Err(FacePosetError::InvalidConstruction(format!(
                        "boundary face index {face} out of range for dimension {}",
                        dim - 1
                    )));
                }
            }
        }
        let table = &mut self.boundaries[dim as usize];
        let index = table.len() as u32;
        table.push(boundary);
        Ok(CellHandle { dim, index })
    }
}

impl Complex for InMemoryComplex {
    type Cell = CellHandle;

    fn top_dimension(&self) -> u32 {
        self.boundaries.len() as u32 - 1
    }

    fn cells_of_dimension(&self, dim: u32) -> Vec<CellHandle> {
        let count = self
            .boundaries
            .get(dim as usize)
            .map_or(0, |table| table.len()) as u32;
        (0..count).map(|index| CellHandle { dim, index }).collect()
    }

    fn boundary_face(
        &self,
        cell: &CellHandle,
        face_dim: u32,
        j: u32,
    ) -> Result<CellHandle, FacePosetError> {
        if cell.dim != face_dim + 1 {
            return Err(FacePosetError::InvalidConstruction(format!(
                "cell {cell:?} has no boundary faces of dimension {face_dim}"
            )));
        }
        let faces = self
            .boundaries
            .get(cell.dim as usize)
            .and_then(|table| table.get(cell.index as usize))
            .ok_or_else(|| {
                FacePosetError::InvalidConstruction(format!("unknown cell {cell:?}"))
            })?;
        let face = faces.get(j as usize).ok_or_else(|| {
            FacePosetError::InvalidConstruction(format!(
                "boundary face index {j} out of range for cell {cell:?}"
            ))
        })?;
        Ok(CellHandle {
            dim: face_dim,
            index: *face,
        })
    }
}

#[cfg(test)]
mod in_memory_tests {
    use super::*;

    #[test]
    fn enumeration_is_stable() {
        let mut complex = InMemoryComplex::new(1);
        complex.add_vertex().unwrap();
        complex.add_vertex().unwrap();
        complex.add_cell(1, [0, 1]).unwrap();
        assert_eq!(complex.top_dimension(), 1);
        let first = complex.cells_of_dimension(0);
        let second = complex.cells_of_dimension(0);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(complex.cells_of_dimension(1).len(), 1);
        assert!(complex.cells_of_dimension(5).is_empty());
    }

    #[test]
    fn add_cell_validates_inputs() {
        let mut complex = InMemoryComplex::new(1);
        complex.add_vertex().unwrap();
        assert!(matches!(
            complex.add_cell(2, [0, 0, 0]),
            Err(FacePosetError::InvalidConstruction(_))
        ));
        assert!(matches!(
            complex.add_cell(1, [0]),
            Err(FacePosetError::InvalidConstruction(_))
        ));
        assert!(matches!(
            complex.add_cell(1, [0, 3]),
            Err(FacePosetError::InvalidConstruction(_))
        ));
    }

    #[test]
    fn boundary_face_lookup() {
        let mut complex = InMemoryComplex::new(1);
        let v0 = complex.add_vertex().unwrap();
        let v1 = complex.add_vertex().unwrap();
        let e0 = complex.add_cell(1, [1, 0]).unwrap();
        assert_eq!(complex.boundary_face(&e0, 0, 0).unwrap(), v1);
        assert_eq!(complex.boundary_face(&e0, 0, 1).unwrap(), v0);
        assert!(complex.boundary_face(&e0, 0, 2).is_err());
        assert!(complex.boundary_face(&v0, 0, 0).is_err());
    }
}
