//! Randomized greedy Morse matching.
//!
//! The algorithm repeats full scan passes over the poset, dimensions from
//! highest to lowest, names ascending within each dimension, over a snapshot of
//! keys taken before any removal in that pass:
//! 1. Every surviving node with exactly one regular parent and zero irregular
//!    parents is paired with that parent; both are removed immediately (parent
//!    first), cascading adjacency cleanup.
//! 2. A pass that saw nodes but made no pairing promotes one remaining cell to
//!    critical and removes it, guaranteeing progress. At that point no node
//!    anywhere in the poset has a free pairing, so promotion never discards a
//!    collapsible pair.
//! 3. An empty scan terminates; the poset ends up empty.
//!
//! Free faces can always be collapsed without affecting the existence of a
//! valid acyclic matching; irregular adjacency is never eligible for pairing,
//! so a node with any irregular parent can only become critical. Nodes with no
//! parents at all likewise only become critical.
//!
//! The critical-cell choice is the randomized aspect of the construction and is
//! injectable through [`CriticalSelector`]: [`FirstInScan`] reproduces the
//! deterministic "first node encountered" candidate, [`UniformRandom`] draws
//! from a `SmallRng` with an explicit seed so runs stay reproducible.

use crate::poset::{CellKey, FacePoset};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Output of a Morse matching run: the matched pairs `(lower, upper)` in the
/// order they were collapsed, and the critical cells in the order they were
/// promoted. Together they partition the original node set.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MorseMatching {
    /// Matched pairs, lower-dimensional key first. At the moment of pairing the
    /// lower node had exactly one regular parent (the upper node) and zero
    /// irregular parents.
    pub pairs: Vec<(CellKey, CellKey)>,
    /// Cells promoted to critical because no free pairing was available.
    pub critical: Vec<CellKey>,
}

impl MorseMatching {
    /// Number of original cells accounted for: two per pair plus one per
    /// critical cell.
    pub fn cells_accounted(&self) -> usize {
        2 * self.pairs.len() + self.critical.len()
    }
}

/// Policy choosing which remaining cell to promote to critical when a pass
/// finds no free face. `candidates` is the nonempty scan-order snapshot of the
/// remaining poset; implementations return an index into it.
pub trait CriticalSelector {
    fn select(&mut self, candidates: &[CellKey]) -> usize;
}

/// Deterministic default policy: promote the first node of the scan (highest
/// dimension, lowest name).
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstInScan;

impl CriticalSelector for FirstInScan {
    fn select(&mut self, _candidates: &[CellKey]) -> usize {
        0
    }
}

/// Uniformly random policy over an explicitly seeded `SmallRng`.
#[derive(Debug, Clone)]
pub struct UniformRandom {
    rng: SmallRng,
}

impl UniformRandom {
    /// Creates a selector seeded with `seed`; equal seeds give equal runs.
    pub fn from_seed(seed: u64) -> Self {
        UniformRandom {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl CriticalSelector for UniformRandom {
    fn select(&mut self, candidates: &[CellKey]) -> usize {
        self.rng.gen_range(0..candidates.len())
    }
}

/// Runs the matcher with the deterministic [`FirstInScan`] promotion policy,
/// consuming and emptying the poset.
pub fn randomized_morse_matching<C>(poset: &mut FacePoset<C>) -> MorseMatching {
    randomized_morse_matching_with(poset, &mut FirstInScan)
}

/// Runs the matcher with an injected critical-cell selection policy, consuming
/// and emptying the poset. See the module docs for the algorithm.
pub fn randomized_morse_matching_with<C>(
    poset: &mut FacePoset<C>,
    selector: &mut impl CriticalSelector,
) -> MorseMatching {
    let mut out = MorseMatching::default();
    let mut pass = 0usize;
    loop {
        let scan = poset.scan_order();
        if scan.is_empty() {
            break;
        }
        pass += 1;
        let mut matched_this_pass = 0usize;
        for &key in &scan {
            // the node may have been consumed earlier in this pass
            let Some(node) = poset.node(key) else { continue };
            if !node.is_free_face() {
                continue;
            }
            let upper = node.parents()[0];
            log::trace!("pairing {key} with {upper}");
            out.pairs.push((key, upper));
            poset.remove_node_if_present(upper);
            poset.remove_node_if_present(key);
            matched_this_pass += 1;
        }
        if matched_this_pass == 0 {
            // nothing was removed, so the snapshot still lists every survivor
            let key = scan[selector.select(&scan)];
            log::debug!("pass {pass}: no free faces, promoting {key} to critical");
            out.critical.push(key);
            poset.remove_node_if_present(key);
        } else {
            log::debug!("pass {pass}: collapsed {matched_this_pass} pairs");
        }
    }
    log::debug!(
        "morse matching finished after {pass} passes: {} pairs, {} critical cells",
        out.pairs.len(),
        out.critical.len()
    );
    out
}
