//! Diagnostics sink for admission decisions.
//!
//! Policies report what they saw and what they decided. Reporting is
//! fire-and-forget and never changes the outcome.

use numalign_core::{Admission, TopologyHint};
use tracing::{debug, info};

use crate::filter::HintSlot;

pub trait DiagnosticsSink: Send + Sync {
    /// Slots that survived provider filtering.
    fn filtered_hints(&self, _policy: &str, _slots: &[HintSlot]) {}

    /// Best merged hint, after normalization.
    fn merged(&self, _policy: &str, _hint: &TopologyHint) {}

    /// Final verdict.
    fn verdict(&self, _policy: &str, _admission: &Admission) {}
}

/// Emits `tracing` events. Used unless a policy is given another sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn filtered_hints(&self, policy: &str, slots: &[HintSlot]) {
        debug!(policy, slots = slots.len(), hints = ?slots, "filtered provider hints");
    }

    fn merged(&self, policy: &str, hint: &TopologyHint) {
        debug!(policy, %hint, "best merged hint");
    }

    fn verdict(&self, policy: &str, admission: &Admission) {
        info!(
            policy,
            hint = %admission.hint,
            admit = admission.admit,
            "topology admission verdict"
        );
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticsSink for NoopSink {}
