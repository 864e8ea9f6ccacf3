//! `CellKey`: a strong, zero-cost identity for poset cells
//!
//! Every cell in a face poset is identified by the pair `(dim, name)`: the
//! cell's dimension and its index within that dimension's enumeration. `CellKey`
//! makes that pair an explicit, immutable composite key usable directly in maps
//! and sets, with dimension-major ordering so sorted traversals walk layer by
//! layer.
//!
//! This module provides:
//! - A `repr(C)` `CellKey` newtype over two `u32` fields with predictable layout.
//! - Constructors and accessors.
//! - Implementations of common traits (`Debug`, `Display`, ordering, hashing,
//!   serde) so `CellKey` can be used in maps, printed, and serialized easily.

use std::fmt;

/// Identity of one cell in a [`FacePoset`](crate::poset::FacePoset): its
/// dimension and its name (enumeration index within that dimension).
///
/// Two nodes are equal iff their keys are equal; keys are unique within the
/// whole poset. The derived ordering is dimension-major, then name.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(C)]
pub struct CellKey {
    dim: u32,
    name: u32,
}

impl CellKey {
    /// Creates a key for the cell named `name` in dimension `dim`.
    #[inline]
    pub const fn new(dim: u32, name: u32) -> Self {
        CellKey { dim, name }
    }

    /// The cell's dimension.
    #[inline]
    pub const fn dim(self) -> u32 {
        self.dim
    }

    /// The cell's name, unique among cells of the same dimension.
    #[inline]
    pub const fn name(self) -> u32 {
        self.name
    }
}

/// Custom `Debug` implementation to display as `CellKey(dim, name)`.
impl fmt::Debug for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CellKey")
            .field(&self.dim)
            .field(&self.name)
            .finish()
    }
}

/// Custom `Display` implementation to print the tuple form `(dim, name)`.
impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dim, self.name)
    }
}
