//! `PosetNode`: one cell of the complex inside the face poset.
//!
//! Nodes carry their identity (`dim`, `name`), the opaque cell handle supplied
//! by the external complex, an optional Morse `matched` link, and four adjacency
//! lists of [`CellKey`]s: `parents`/`children` one dimension up/down, plus
//! `irregular_parents`/`irregular_children` holding the multiplicity ≥ 2
//! incidences after [`FacePoset::strip_multi_edges`](crate::poset::FacePoset::strip_multi_edges).
//!
//! Adjacency is stored as keys, never owning references: the
//! [`FacePoset`](crate::poset::FacePoset) is the sole owner of all nodes, so
//! there are no ownership cycles to break on removal.
//!
//! Before stripping, a neighbor may appear multiple times in an adjacency list
//! when the complex identifies several boundary faces to the same lower cell.
//! This is intended behaviour, not an error.

use crate::poset::key::CellKey;
use itertools::Itertools;

/// One cell of the complex inside the poset. See the module docs for the
/// adjacency layout.
#[derive(Clone, Debug, PartialEq)]
pub struct PosetNode<C> {
    dim: u32,
    name: u32,
    cell: C,
    parents: Vec<CellKey>,
    children: Vec<CellKey>,
    irregular_parents: Vec<CellKey>,
    irregular_children: Vec<CellKey>,
    matched: Option<CellKey>,
}

impl<C> PosetNode<C> {
    pub(crate) fn new(dim: u32, name: u32, cell: C) -> Self {
        PosetNode {
            dim,
            name,
            cell,
            parents: Vec::new(),
            children: Vec::new(),
            irregular_parents: Vec::new(),
            irregular_children: Vec::new(),
            matched: None,
        }
    }

    /// The node's identity key `(dim, name)`.
    #[inline]
    pub fn key(&self) -> CellKey {
        CellKey::new(self.dim, self.name)
    }

    /// The cell's dimension.
    #[inline]
    pub fn dim(&self) -> u32 {
        self.dim
    }

    /// The cell's name within its dimension.
    #[inline]
    pub fn name(&self) -> u32 {
        self.name
    }

    /// The opaque cell handle supplied by the external complex.
    #[inline]
    pub fn cell(&self) -> &C {
        &self.cell
    }

    /// The node this cell is Morse-paired with, if any.
    #[inline]
    pub fn matched(&self) -> Option<CellKey> {
        self.matched
    }

    /// Regular (multiplicity-1 after stripping) covering cells one dimension up.
    #[inline]
    pub fn parents(&self) -> &[CellKey] {
        &self.parents
    }

    /// Regular boundary faces one dimension down.
    #[inline]
    pub fn children(&self) -> &[CellKey] {
        &self.children
    }

    /// Covering cells incident with multiplicity ≥ 2, one representative each.
    /// Empty until multi-edges are stripped.
    #[inline]
    pub fn irregular_parents(&self) -> &[CellKey] {
        &self.irregular_parents
    }

    /// Boundary faces incident with multiplicity ≥ 2, one representative each.
    /// Empty until multi-edges are stripped.
    #[inline]
    pub fn irregular_children(&self) -> &[CellKey] {
        &self.irregular_children
    }

    /// Whether this node is a free face: exactly one regular parent and no
    /// irregular parents. Free faces are the only cells eligible for Morse
    /// pairing.
    #[inline]
    pub fn is_free_face(&self) -> bool {
        self.parents.len() == 1 && self.irregular_parents.is_empty()
    }

    pub(crate) fn add_parent(&mut self, key: CellKey) {
        self.parents.push(key);
    }

    pub(crate) fn add_child(&mut self, key: CellKey) {
        self.children.push(key);
    }

    /// Removes one occurrence of `key` from the irregular parent list and one
    /// from the regular parent list, whichever holds it. Returns whether `key`
    /// was found in either.
    pub(crate) fn remove_parent(&mut self, key: CellKey) -> bool {
        let mut found = remove_one(&mut self.irregular_parents, key);
        found |= remove_one(&mut self.parents, key);
        found
    }

    /// Mirror of [`remove_parent`](Self::remove_parent) for the child lists.
    pub(crate) fn remove_child(&mut self, key: CellKey) -> bool {
        let mut found = remove_one(&mut self.irregular_children, key);
        found |= remove_one(&mut self.children, key);
        found
    }

    pub(crate) fn set_matched(&mut self, key: Option<CellKey>) {
        self.matched = key;
    }

    /// Partitions both adjacency lists by multiplicity: entries occurring
    /// exactly once stay regular (in their original order), entries occurring
    /// two or more times move to the irregular list with a single
    /// representative (first-occurrence order).
    pub(crate) fn split_multi_edges(&mut self) {
        let (regular, irregular) = separate_duplicates(&self.parents);
        self.parents = regular;
        self.irregular_parents.extend(irregular);
        let (regular, irregular) = separate_duplicates(&self.children);
        self.children = regular;
        self.irregular_children.extend(irregular);
    }
}

fn remove_one(list: &mut Vec<CellKey>, key: CellKey) -> bool {
    if let Some(pos) = list.iter().position(|&k| k == key) {
        list.remove(pos);
        true
    } else {
        false
    }
}

fn separate_duplicates(entries: &[CellKey]) -> (Vec<CellKey>, Vec<CellKey>) {
    let counts = entries.iter().copied().counts();
    let mut regular = Vec::new();
    let mut irregular = Vec::new();
    for &key in entries {
        if counts[&key] == 1 {
            regular.push(key);
        } else if !irregular.contains(&key) {
            irregular.push(key);
        }
    }
    (regular, irregular)
}
