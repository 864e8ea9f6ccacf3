//! In-memory face poset (Hasse diagram) of a finite cell complex.
//!
//! [`FacePoset`] owns a dimension-graded collection of [`PosetNode`]s, keyed by
//! `(dim, name)`, with covering arcs mirrored in both directions: for every arc
//! between a node at dimension `d` and one at `d - 1`, the upper node holds the
//! lower in its child lists and the lower holds the upper in its parent lists.
//! Breaking this mirroring is a defect; every mutation here maintains it.
//!
//! Layers are `BTreeMap`s, so iteration within a dimension is ascending by name
//! and across dimensions ascending by dimension. The reference behaviour left
//! scan order unspecified; this crate pins it to that deterministic order, which
//! the Morse matcher's output sequences depend on.
//!
//! # Example
//! ```rust
//! use face_poset::poset::{CellKey, FacePoset};
//!
//! let mut fp = FacePoset::new();
//! fp.add_node(0, 0, "v0");
//! fp.add_node(0, 1, "v1");
//! fp.add_node(1, 0, "e0");
//! fp.add_arc(CellKey::new(1, 0), CellKey::new(0, 0)).unwrap();
//! fp.add_arc(CellKey::new(1, 0), CellKey::new(0, 1)).unwrap();
//! assert_eq!(fp.node_count(), 3);
//! ```

use crate::poset::key::CellKey;
use crate::poset::node::PosetNode;
use crate::poset_error::FacePosetError;
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt;

/// Dimension-graded mapping from dimension to (name → node).
///
/// The poset exclusively owns all its nodes; nodes reference each other only by
/// [`CellKey`]. Removing a node purges it from every neighbor's adjacency
/// before discarding it.
#[derive(Clone, Debug)]
pub struct FacePoset<C> {
    layers: BTreeMap<u32, BTreeMap<u32, PosetNode<C>>>,
}

impl<C> Default for FacePoset<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> FacePoset<C> {
    /// Creates an empty poset with no layers.
    pub fn new() -> Self {
        FacePoset {
            layers: BTreeMap::new(),
        }
    }

    /// Returns the node with the given key, if present.
    #[inline]
    pub fn node(&self, key: CellKey) -> Option<&PosetNode<C>> {
        self.layers.get(&key.dim())?.get(&key.name())
    }

    #[inline]
    fn node_mut(&mut self, key: CellKey) -> Option<&mut PosetNode<C>> {
        self.layers.get_mut(&key.dim())?.get_mut(&key.name())
    }

    /// Returns the node with the given key.
    ///
    /// # Errors
    /// [`FacePosetError::CellNotFound`] if the key is absent.
    pub fn get_node(&self, key: CellKey) -> Result<&PosetNode<C>, FacePosetError> {
        self.node(key).ok_or(FacePosetError::CellNotFound { key })
    }

    /// Returns the opaque cell handle stored for the given key.
    ///
    /// # Errors
    /// [`FacePosetError::CellNotFound`] if the key is absent.
    pub fn get_cell(&self, key: CellKey) -> Result<&C, FacePosetError> {
        Ok(self.get_node(key)?.cell())
    }

    /// Inserts a new node with no adjacency. If the key already exists the old
    /// node is silently overwritten; duplicate detection is a non-goal.
    pub fn add_node(&mut self, dim: u32, name: u32, cell: C) {
        self.layers
            .entry(dim)
            .or_default()
            .insert(name, PosetNode::new(dim, name, cell));
    }

    /// Removes a node, purging it from every neighbor's adjacency (regular and
    /// irregular lists, whichever holds it) before discarding it.
    ///
    /// # Errors
    /// [`FacePosetError::LayerNotFound`] if the dimension has no layer at all,
    /// [`FacePosetError::CellNotFound`] if the name is absent from its layer.
    pub fn remove_node(&mut self, key: CellKey) -> Result<PosetNode<C>, FacePosetError> {
        let layer = self
            .layers
            .get_mut(&key.dim())
            .ok_or(FacePosetError::LayerNotFound { dim: key.dim() })?;
        let node = layer
            .remove(&key.name())
            .ok_or(FacePosetError::CellNotFound { key })?;
        self.scrub_neighbors(&node, key);
        #[cfg(debug_assertions)]
        self.debug_assert_consistent();
        Ok(node)
    }

    /// Error-suppressing form of [`remove_node`](Self::remove_node): absence of
    /// the layer or the node is a no-op returning `None`.
    pub fn remove_node_if_present(&mut self, key: CellKey) -> Option<PosetNode<C>> {
        let node = self.layers.get_mut(&key.dim())?.remove(&key.name())?;
        self.scrub_neighbors(&node, key);
        #[cfg(debug_assertions)]
        self.debug_assert_consistent();
        Some(node)
    }

    /// Removes every occurrence of `key` from its former neighbors' adjacency.
    /// Per-occurrence iteration matters: before stripping, a neighbor pair may
    /// be connected by several parallel arcs, mirrored on both sides.
    fn scrub_neighbors(&mut self, node: &PosetNode<C>, key: CellKey) {
        let children: Vec<CellKey> = node
            .children()
            .iter()
            .chain(node.irregular_children())
            .copied()
            .collect();
        for child in children {
            if let Some(neighbor) = self.node_mut(child) {
                let found = neighbor.remove_parent(key);
                debug_assert!(found, "missing mirror parent {key} in child {child}");
            }
        }
        let parents: Vec<CellKey> = node
            .parents()
            .iter()
            .chain(node.irregular_parents())
            .copied()
            .collect();
        for parent in parents {
            if let Some(neighbor) = self.node_mut(parent) {
                let found = neighbor.remove_child(key);
                debug_assert!(found, "missing mirror child {key} in parent {parent}");
            }
        }
    }

    fn check_endpoints(&self, a: CellKey, b: CellKey) -> Result<(), FacePosetError> {
        for key in [a, b] {
            let layer = self
                .layers
                .get(&key.dim())
                .ok_or(FacePosetError::LayerNotFound { dim: key.dim() })?;
            if !layer.contains_key(&key.name()) {
                return Err(FacePosetError::CellNotFound { key });
            }
        }
        Ok(())
    }

    /// Normalizes an endpoint pair so the higher-dimension node comes first.
    fn orient(a: CellKey, b: CellKey) -> Result<(CellKey, CellKey), FacePosetError> {
        if a.dim().abs_diff(b.dim()) != 1 {
            return Err(FacePosetError::InvalidArc { a, b });
        }
        Ok(if a.dim() > b.dim() { (a, b) } else { (b, a) })
    }

    /// Adds a covering arc between two existing nodes in adjacent layers.
    ///
    /// The arc is appended, not upserted: duplicate arcs between the same pair
    /// are permitted and intentional, representing genuine multiple incidences
    /// from the same boundary map.
    ///
    /// # Errors
    /// [`FacePosetError::LayerNotFound`]/[`FacePosetError::CellNotFound`] for
    /// absent endpoints, [`FacePosetError::InvalidArc`] if the dimensions are
    /// equal or differ by more than one.
    pub fn add_arc(&mut self, a: CellKey, b: CellKey) -> Result<(), FacePosetError> {
        self.check_endpoints(a, b)?;
        let (upper, lower) = Self::orient(a, b)?;
        if let Some(node) = self.node_mut(upper) {
            node.add_child(lower);
        }
        if let Some(node) = self.node_mut(lower) {
            node.add_parent(upper);
        }
        #[cfg(debug_assertions)]
        self.debug_assert_consistent();
        Ok(())
    }

    /// Removes one occurrence of the arc between two existing nodes, checking
    /// irregular lists first, then regular. A missing arc is a silent no-op;
    /// use [`remove_arc_strict`](Self::remove_arc_strict) to surface it.
    ///
    /// # Errors
    /// Same endpoint/dimension errors as [`add_arc`](Self::add_arc).
    pub fn remove_arc(&mut self, a: CellKey, b: CellKey) -> Result<(), FacePosetError> {
        self.remove_arc_inner(a, b, false)
    }

    /// Like [`remove_arc`](Self::remove_arc), but fails with
    /// [`FacePosetError::CellNotFound`] when the arc is found in neither
    /// adjacency list.
    pub fn remove_arc_strict(&mut self, a: CellKey, b: CellKey) -> Result<(), FacePosetError> {
        self.remove_arc_inner(a, b, true)
    }

    fn remove_arc_inner(
        &mut self,
        a: CellKey,
        b: CellKey,
        strict: bool,
    ) -> Result<(), FacePosetError> {
        self.check_endpoints(a, b)?;
        let (upper, lower) = Self::orient(a, b)?;
        let mut found_child = false;
        if let Some(node) = self.node_mut(upper) {
            found_child = node.remove_child(lower);
        }
        let mut found_parent = false;
        if let Some(node) = self.node_mut(lower) {
            found_parent = node.remove_parent(upper);
        }
        debug_assert_eq!(
            found_child, found_parent,
            "one-sided arc between {upper} and {lower}"
        );
        if strict && !found_child && !found_parent {
            return Err(FacePosetError::CellNotFound { key: lower });
        }
        #[cfg(debug_assertions)]
        self.debug_assert_consistent();
        Ok(())
    }

    /// Separates multi-edges: for every node and every adjacency list, entries
    /// occurring exactly once remain regular while entries occurring two or
    /// more times move to the corresponding irregular list with one
    /// representative kept. Run once, after full construction, before matching.
    pub fn strip_multi_edges(&mut self) {
        for layer in self.layers.values_mut() {
            for node in layer.values_mut() {
                node.split_multi_edges();
            }
        }
        #[cfg(debug_assertions)]
        self.debug_assert_consistent();
    }

    /// Records a Morse pairing between two existing nodes in adjacent layers,
    /// linking both nodes' `matched` fields symmetrically.
    ///
    /// # Errors
    /// Same endpoint/dimension errors as [`add_arc`](Self::add_arc).
    pub fn match_cells(&mut self, a: CellKey, b: CellKey) -> Result<(), FacePosetError> {
        self.check_endpoints(a, b)?;
        Self::orient(a, b)?;
        if let Some(node) = self.node_mut(a) {
            node.set_matched(Some(b));
        }
        if let Some(node) = self.node_mut(b) {
            node.set_matched(Some(a));
        }
        Ok(())
    }

    /// Whether the poset holds no nodes. Layers emptied by removals are kept,
    /// so an emptied poset still answers [`remove_node`](Self::remove_node)
    /// with `CellNotFound` rather than `LayerNotFound` for known dimensions.
    pub fn is_empty(&self) -> bool {
        self.layers.values().all(BTreeMap::is_empty)
    }

    /// Total number of nodes across all layers.
    pub fn node_count(&self) -> usize {
        self.layers.values().map(BTreeMap::len).sum()
    }

    /// Highest dimension holding at least one node, or `None` when empty.
    pub fn top_dimension(&self) -> Option<u32> {
        self.layers
            .iter()
            .rev()
            .find(|(_, layer)| !layer.is_empty())
            .map(|(&dim, _)| dim)
    }

    /// Dimensions currently holding at least one node, ascending.
    pub fn dims(&self) -> impl Iterator<Item = u32> + '_ {
        self.layers
            .iter()
            .filter(|(_, layer)| !layer.is_empty())
            .map(|(&dim, _)| dim)
    }

    /// Nodes of one dimension, ascending by name.
    pub fn nodes_in_dim(&self, dim: u32) -> impl Iterator<Item = &PosetNode<C>> + '_ {
        self.layers.get(&dim).into_iter().flat_map(BTreeMap::values)
    }

    /// All keys in ascending `(dim, name)` order.
    pub fn keys(&self) -> impl Iterator<Item = CellKey> + '_ {
        self.layers
            .values()
            .flat_map(|layer| layer.values().map(PosetNode::key))
    }

    /// Snapshot of all keys in matcher scan order: dimensions from highest to
    /// lowest, names ascending within each dimension. Taking the snapshot
    /// before any removal keeps mutation from invalidating iteration.
    pub fn scan_order(&self) -> Vec<CellKey> {
        self.layers
            .values()
            .rev()
            .flat_map(|layer| layer.values().map(PosetNode::key))
            .collect()
    }

    /// Finds the key of the node in `dim` whose cell handle equals `cell`.
    /// Cells only support equality, so this is a linear scan of the layer.
    pub fn find_by_cell(&self, dim: u32, cell: &C) -> Option<CellKey>
    where
        C: PartialEq,
    {
        self.layers
            .get(&dim)?
            .values()
            .find(|node| node.cell() == cell)
            .map(PosetNode::key)
    }

    /// Asserts full mirror consistency of the adjacency structure. Runs after
    /// every mutation in debug builds.
    #[cfg(debug_assertions)]
    pub fn debug_assert_consistent(&self) {
        for layer in self.layers.values() {
            for node in layer.values() {
                let key = node.key();
                for &child in node.children().iter().chain(node.irregular_children()) {
                    debug_assert_eq!(child.dim() + 1, node.dim(), "bad child dim for {key}");
                    let mirrored = self.node(child).is_some_and(|c| {
                        c.parents().contains(&key) || c.irregular_parents().contains(&key)
                    });
                    debug_assert!(mirrored, "missing mirror parent {key} in child {child}");
                }
                for &parent in node.parents().iter().chain(node.irregular_parents()) {
                    debug_assert_eq!(parent.dim(), node.dim() + 1, "bad parent dim for {key}");
                    let mirrored = self.node(parent).is_some_and(|p| {
                        p.children().contains(&key) || p.irregular_children().contains(&key)
                    });
                    debug_assert!(mirrored, "missing mirror child {key} in parent {parent}");
                }
            }
        }
    }
}

/// Textual listing of the poset from dimension 0 upwards: each node's name and,
/// for dimensions above 0, the comma-joined names of its regular children.
impl<C> fmt::Display for FacePoset<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (dim, layer) in &self.layers {
            writeln!(f, "Dim {dim}:")?;
            for (name, node) in layer {
                if *dim == 0 {
                    writeln!(f, "{name}")?;
                } else {
                    let children = node
                        .children()
                        .iter()
                        .map(|key| key.name().to_string())
                        .join(", ");
                    if children.is_empty() {
                        writeln!(f, "{name}")?;
                    } else {
                        writeln!(f, "{name}: {children}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod poset_tests {
    use super::*;

    fn two_vertex_edge() -> FacePoset<&'static str> {
        let mut fp = FacePoset::new();
        fp.add_node(0, 0, "v0");
        fp.add_node(0, 1, "v1");
        fp.add_node(1, 0, "e0");
        fp.add_arc(CellKey::new(1, 0), CellKey::new(0, 0)).unwrap();
        fp.add_arc(CellKey::new(1, 0), CellKey::new(0, 1)).unwrap();
        fp
    }

    #[test]
    fn get_node_and_cell() {
        let fp = two_vertex_edge();
        assert_eq!(fp.get_node(CellKey::new(1, 0)).unwrap().name(), 0);
        assert_eq!(*fp.get_cell(CellKey::new(0, 1)).unwrap(), "v1");
        assert_eq!(
            fp.get_node(CellKey::new(0, 5)),
            Err(FacePosetError::CellNotFound {
                key: CellKey::new(0, 5)
            })
        );
    }

    #[test]
    fn arcs_are_mirrored() {
        let fp = two_vertex_edge();
        let edge = fp.get_node(CellKey::new(1, 0)).unwrap();
        assert_eq!(edge.children(), &[CellKey::new(0, 0), CellKey::new(0, 1)]);
        let v0 = fp.get_node(CellKey::new(0, 0)).unwrap();
        assert_eq!(v0.parents(), &[CellKey::new(1, 0)]);
    }

    #[test]
    fn add_arc_rejects_bad_layers() {
        let mut fp = two_vertex_edge();
        fp.add_node(2, 0, "t0");
        assert_eq!(
            fp.add_arc(CellKey::new(0, 0), CellKey::new(0, 1)),
            Err(FacePosetError::InvalidArc {
                a: CellKey::new(0, 0),
                b: CellKey::new(0, 1)
            })
        );
        assert_eq!(
            fp.add_arc(CellKey::new(2, 0), CellKey::new(0, 0)),
            Err(FacePosetError::InvalidArc {
                a: CellKey::new(2, 0),
                b: CellKey::new(0, 0)
            })
        );
        assert_eq!(
            fp.add_arc(CellKey::new(3, 0), CellKey::new(2, 0)),
            Err(FacePosetError::LayerNotFound { dim: 3 })
        );
        assert_eq!(
            fp.add_arc(CellKey::new(1, 7), CellKey::new(0, 0)),
            Err(FacePosetError::CellNotFound {
                key: CellKey::new(1, 7)
            })
        );
    }

    #[test]
    fn add_arc_appends_duplicates() {
        let mut fp = FacePoset::new();
        fp.add_node(0, 0, "v0");
        fp.add_node(1, 0, "e0");
        fp.add_arc(CellKey::new(1, 0), CellKey::new(0, 0)).unwrap();
        fp.add_arc(CellKey::new(0, 0), CellKey::new(1, 0)).unwrap();
        let edge = fp.get_node(CellKey::new(1, 0)).unwrap();
        assert_eq!(edge.children().len(), 2);
        let vertex = fp.get_node(CellKey::new(0, 0)).unwrap();
        assert_eq!(vertex.parents().len(), 2);
    }

    #[test]
    fn remove_arc_is_quiet_and_strict_errors() {
        let mut fp = two_vertex_edge();
        fp.remove_arc(CellKey::new(1, 0), CellKey::new(0, 0))
            .unwrap();
        assert!(
            fp.get_node(CellKey::new(0, 0))
                .unwrap()
                .parents()
                .is_empty()
        );
        // already gone: quiet form is a no-op, strict form errors
        fp.remove_arc(CellKey::new(1, 0), CellKey::new(0, 0))
            .unwrap();
        assert_eq!(
            fp.remove_arc_strict(CellKey::new(1, 0), CellKey::new(0, 0)),
            Err(FacePosetError::CellNotFound {
                key: CellKey::new(0, 0)
            })
        );
    }

    #[test]
    fn remove_node_purges_all_adjacency_lists() {
        let mut fp = FacePoset::new();
        fp.add_node(0, 0, "v0");
        fp.add_node(1, 0, "e0");
        fp.add_node(1, 1, "e1");
        fp.add_node(2, 0, "t0");
        // v0 doubly incident to e0 (multi-edge), singly to e1; e0, e1 bound t0
        fp.add_arc(CellKey::new(1, 0), CellKey::new(0, 0)).unwrap();
        fp.add_arc(CellKey::new(1, 0), CellKey::new(0, 0)).unwrap();
        fp.add_arc(CellKey::new(1, 1), CellKey::new(0, 0)).unwrap();
        fp.add_arc(CellKey::new(2, 0), CellKey::new(1, 0)).unwrap();
        fp.add_arc(CellKey::new(2, 0), CellKey::new(1, 1)).unwrap();
        fp.strip_multi_edges();

        fp.remove_node(CellKey::new(1, 0)).unwrap();
        let v0 = fp.get_node(CellKey::new(0, 0)).unwrap();
        assert_eq!(v0.parents(), &[CellKey::new(1, 1)]);
        assert!(v0.irregular_parents().is_empty());
        let t0 = fp.get_node(CellKey::new(2, 0)).unwrap();
        assert_eq!(t0.children(), &[CellKey::new(1, 1)]);
        assert!(t0.irregular_children().is_empty());
    }

    #[test]
    fn remove_node_error_taxonomy() {
        let mut fp = two_vertex_edge();
        assert_eq!(
            fp.remove_node(CellKey::new(4, 0)).unwrap_err(),
            FacePosetError::LayerNotFound { dim: 4 }
        );
        assert_eq!(
            fp.remove_node(CellKey::new(0, 9)).unwrap_err(),
            FacePosetError::CellNotFound {
                key: CellKey::new(0, 9)
            }
        );
        assert!(fp.remove_node_if_present(CellKey::new(4, 0)).is_none());
        assert!(fp.remove_node_if_present(CellKey::new(0, 0)).is_some());
        assert_eq!(fp.node_count(), 2);
    }

    #[test]
    fn strip_multi_edges_separates_double_incidence() {
        let mut fp = FacePoset::new();
        fp.add_node(0, 0, "v0");
        fp.add_node(1, 0, "e0");
        fp.add_arc(CellKey::new(1, 0), CellKey::new(0, 0)).unwrap();
        fp.add_arc(CellKey::new(1, 0), CellKey::new(0, 0)).unwrap();
        fp.strip_multi_edges();

        let edge = fp.get_node(CellKey::new(1, 0)).unwrap();
        assert!(edge.children().is_empty());
        assert_eq!(edge.irregular_children(), &[CellKey::new(0, 0)]);
        let vertex = fp.get_node(CellKey::new(0, 0)).unwrap();
        assert!(vertex.parents().is_empty());
        assert_eq!(vertex.irregular_parents(), &[CellKey::new(1, 0)]);
    }

    #[test]
    fn match_cells_links_both_sides() {
        let mut fp = two_vertex_edge();
        fp.match_cells(CellKey::new(0, 0), CellKey::new(1, 0))
            .unwrap();
        assert_eq!(
            fp.get_node(CellKey::new(0, 0)).unwrap().matched(),
            Some(CellKey::new(1, 0))
        );
        assert_eq!(
            fp.get_node(CellKey::new(1, 0)).unwrap().matched(),
            Some(CellKey::new(0, 0))
        );
        assert_eq!(
            fp.match_cells(CellKey::new(0, 0), CellKey::new(0, 1)),
            Err(FacePosetError::InvalidArc {
                a: CellKey::new(0, 0),
                b: CellKey::new(0, 1)
            })
        );
    }

    #[test]
    fn scan_order_is_top_down_name_ascending() {
        let fp = two_vertex_edge();
        assert_eq!(
            fp.scan_order(),
            vec![CellKey::new(1, 0), CellKey::new(0, 0), CellKey::new(0, 1)]
        );
    }

    #[test]
    fn emptied_layers_are_kept() {
        let mut fp = two_vertex_edge();
        fp.remove_node(CellKey::new(1, 0)).unwrap();
        assert_eq!(fp.top_dimension(), Some(0));
        assert_eq!(fp.dims().collect::<Vec<_>>(), vec![0]);
        // the dim-1 layer still exists, so the failure is CellNotFound
        assert_eq!(
            fp.remove_node(CellKey::new(1, 0)).unwrap_err(),
            FacePosetError::CellNotFound {
                key: CellKey::new(1, 0)
            }
        );
    }

    #[test]
    fn add_node_overwrites_silently() {
        let mut fp = FacePoset::new();
        fp.add_node(0, 0, "old");
        fp.add_node(0, 0, "new");
        assert_eq!(fp.node_count(), 1);
        assert_eq!(*fp.get_cell(CellKey::new(0, 0)).unwrap(), "new");
    }

    #[test]
    fn display_lists_children_by_name() {
        let fp = two_vertex_edge();
        let listing = fp.to_string();
        assert_eq!(listing, "Dim 0:\n0\n1\nDim 1:\n0: 0, 1\n");
    }

    #[test]
    fn find_by_cell_scans_the_layer() {
        let fp = two_vertex_edge();
        assert_eq!(fp.find_by_cell(0, &"v1"), Some(CellKey::new(0, 1)));
        assert_eq!(fp.find_by_cell(0, &"v9"), None);
        assert_eq!(fp.find_by_cell(7, &"v0"), None);
    }
}
