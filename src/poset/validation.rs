//! Poset validation helpers.
//!
//! Whole-structure checks for the invariants every mutation is supposed to
//! maintain. A failure here is a fatal defect in the code that produced the
//! poset, not a recoverable condition.

use crate::poset::face_poset::FacePoset;
use crate::poset::key::CellKey;
use crate::poset_error::FacePosetError;
use std::collections::HashMap;

/// Optional validation toggles for face poset checks.
#[derive(Debug, Clone, Copy)]
pub struct PosetValidationOptions {
    /// Ensure every adjacency entry is mirrored with equal multiplicity on the
    /// other side (regular and irregular lists combined).
    pub check_mirrors: bool,
    /// Ensure every adjacency entry connects layers exactly one dimension apart.
    pub check_arc_dims: bool,
    /// Ensure Morse `matched` links are symmetric and between adjacent layers.
    pub check_matched: bool,
}

impl PosetValidationOptions {
    /// Enable all poset validation checks.
    pub fn all() -> Self {
        Self {
            check_mirrors: true,
            check_arc_dims: true,
            check_matched: true,
        }
    }
}

/// Validate a face poset against the selected invariants.
pub fn validate_face_poset<C>(
    poset: &FacePoset<C>,
    options: PosetValidationOptions,
) -> Result<(), FacePosetError> {
    for key in poset.keys() {
        let node = poset.get_node(key)?;

        if options.check_arc_dims {
            for &parent in node.parents().iter().chain(node.irregular_parents()) {
                if parent.dim() != key.dim() + 1 {
                    return Err(FacePosetError::InvalidArc { a: parent, b: key });
                }
            }
            for &child in node.children().iter().chain(node.irregular_children()) {
                if child.dim() + 1 != key.dim() {
                    return Err(FacePosetError::InvalidArc { a: key, b: child });
                }
            }
        }

        if options.check_mirrors {
            let parent_counts = occurrence_counts(node.parents(), node.irregular_parents());
            for (&parent, &count) in &parent_counts {
                let mirrored = poset
                    .node(parent)
                    .map(|p| count_of(p.children(), p.irregular_children(), key));
                if mirrored != Some(count) {
                    return Err(FacePosetError::MirrorViolation { parent, child: key });
                }
            }
            let child_counts = occurrence_counts(node.children(), node.irregular_children());
            for (&child, &count) in &child_counts {
                let mirrored = poset
                    .node(child)
                    .map(|c| count_of(c.parents(), c.irregular_parents(), key));
                if mirrored != Some(count) {
                    return Err(FacePosetError::MirrorViolation { parent: key, child });
                }
            }
        }

        if options.check_matched {
            if let Some(other) = node.matched() {
                let symmetric = poset
                    .node(other)
                    .is_some_and(|o| o.matched() == Some(key) && o.dim().abs_diff(key.dim()) == 1);
                if !symmetric {
                    return Err(FacePosetError::MatchedAsymmetry { a: key, b: other });
                }
            }
        }
    }
    Ok(())
}

fn occurrence_counts(regular: &[CellKey], irregular: &[CellKey]) -> HashMap<CellKey, usize> {
    let mut counts = HashMap::new();
    for &key in regular.iter().chain(irregular) {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

fn count_of(regular: &[CellKey], irregular: &[CellKey], key: CellKey) -> usize {
    regular
        .iter()
        .chain(irregular)
        .filter(|&&k| k == key)
        .count()
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    fn segment() -> FacePoset<u32> {
        let mut fp = FacePoset::new();
        fp.add_node(0, 0, 10);
        fp.add_node(0, 1, 11);
        fp.add_node(1, 0, 20);
        fp.add_arc(CellKey::new(1, 0), CellKey::new(0, 0)).unwrap();
        fp.add_arc(CellKey::new(1, 0), CellKey::new(0, 1)).unwrap();
        fp
    }

    #[test]
    fn valid_poset_passes_all_checks() {
        let fp = segment();
        validate_face_poset(&fp, PosetValidationOptions::all()).unwrap();
    }

    #[test]
    fn valid_after_strip_and_removal() {
        let mut fp = segment();
        fp.add_arc(CellKey::new(1, 0), CellKey::new(0, 0)).unwrap();
        fp.strip_multi_edges();
        validate_face_poset(&fp, PosetValidationOptions::all()).unwrap();
        fp.remove_node(CellKey::new(0, 0)).unwrap();
        validate_face_poset(&fp, PosetValidationOptions::all()).unwrap();
    }

    #[test]
    fn matched_links_are_checked() {
        let mut fp = segment();
        fp.match_cells(CellKey::new(0, 0), CellKey::new(1, 0))
            .unwrap();
        validate_face_poset(&fp, PosetValidationOptions::all()).unwrap();

        // re-matching one side elsewhere breaks symmetry
        fp.match_cells(CellKey::new(0, 1), CellKey::new(1, 0))
            .unwrap();
        let err = validate_face_poset(&fp, PosetValidationOptions::all()).unwrap_err();
        assert!(matches!(err, FacePosetError::MatchedAsymmetry { .. }));
    }
}
