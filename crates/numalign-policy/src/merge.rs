//! Cross-provider merger.
//!
//! Explores every combination that picks one hint per slot, intersects the
//! chosen affinities and keeps the best combination:
//!
//! 1. preferred beats not preferred;
//! 2. at equal preference, some common node beats no common node;
//! 3. fewer nodes beats more nodes;
//! 4. otherwise the first combination enumerated wins.
//!
//! Enumeration is exhaustive. The number of combinations is the product of
//! the slot sizes, which is small in practice but never assumed to be.

use numalign_core::{NumaNodes, TopologyHint};
use tracing::trace;

use crate::error::PolicyResult;
use crate::filter::HintSlot;

/// Lazy cross product over slots, one hint per slot.
///
/// The first slot is the outermost loop and the last slot varies fastest.
/// Any empty slot makes the product empty; zero slots yield a single empty
/// combination.
#[derive(Debug, Clone)]
pub struct Permutations<'a> {
    slots: &'a [HintSlot],
    indices: Vec<usize>,
    done: bool,
}

impl<'a> Permutations<'a> {
    pub fn new(slots: &'a [HintSlot]) -> Self {
        Self {
            slots,
            indices: vec![0; slots.len()],
            done: slots.iter().any(Vec::is_empty),
        }
    }

    /// Total number of combinations this iterator yields, or `None` if the
    /// count does not fit in a `usize`.
    pub fn total(&self) -> Option<usize> {
        self.slots
            .iter()
            .try_fold(1usize, |acc, slot| acc.checked_mul(slot.len()))
    }

    fn advance(&mut self) {
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.slots[pos].len() {
                return;
            }
            self.indices[pos] = 0;
        }
        self.done = true;
    }
}

impl Iterator for Permutations<'_> {
    type Item = Vec<TopologyHint>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let permutation = self
            .indices
            .iter()
            .zip(self.slots)
            .map(|(&i, slot)| slot[i])
            .collect();
        self.advance();
        Some(permutation)
    }
}

/// Combine one hint per slot into a single hint.
///
/// Unconstrained hints count as the full machine. The result is preferred
/// only if every chosen hint is.
pub fn merge_permutation(
    nodes: &NumaNodes,
    permutation: &[TopologyHint],
) -> PolicyResult<TopologyHint> {
    let mut affinity = nodes.full();
    let mut preferred = true;
    for hint in permutation {
        if let Some(mask) = &hint.affinity {
            affinity = affinity.intersect(mask)?;
        }
        preferred &= hint.preferred;
    }
    Ok(TopologyHint::new(affinity, preferred))
}

/// Pick the best merged hint across all slots.
///
/// With no slots at all nothing constrains the workload and the result is
/// `{any, preferred}`. If some slot is empty no combination exists and the
/// result is the full machine, not preferred.
pub fn merge_filtered_hints(nodes: &NumaNodes, slots: &[HintSlot]) -> PolicyResult<TopologyHint> {
    if slots.is_empty() {
        return Ok(TopologyHint::any(true));
    }

    for mask in slots.iter().flatten().filter_map(|h| h.affinity.as_ref()) {
        nodes.check(mask)?;
    }

    let permutations = Permutations::new(slots);
    trace!(combinations = ?permutations.total(), "merging provider hints");

    let mut best: Option<TopologyHint> = None;
    for permutation in permutations {
        let merged = merge_permutation(nodes, &permutation)?;
        if best.is_none_or(|current| is_better(nodes, &merged, &current)) {
            best = Some(merged);
        }
    }

    Ok(best.unwrap_or_else(|| TopologyHint::new(nodes.full(), false)))
}

/// Strict ordering: `false` on a full tie so the earlier candidate stays.
fn is_better(nodes: &NumaNodes, candidate: &TopologyHint, current: &TopologyHint) -> bool {
    if candidate.preferred != current.preferred {
        return candidate.preferred;
    }

    let width = |hint: &TopologyHint| hint.affinity.map_or(nodes.len(), |m| m.count());
    let (candidate_width, current_width) = (width(candidate), width(current));

    if (candidate_width == 0) != (current_width == 0) {
        return candidate_width != 0;
    }
    candidate_width < current_width
}
