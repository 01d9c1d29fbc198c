//! Full-machine affinity carries no alignment information; rewrite it to
//! "any node" so equality checks downstream treat both the same.

use numalign_core::TopologyHint;

pub fn normalize(hint: TopologyHint) -> TopologyHint {
    match hint.affinity {
        Some(mask) if mask.is_full_universe() => TopologyHint::any(hint.preferred),
        _ => hint,
    }
}
