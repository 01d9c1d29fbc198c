//! Provider filtering.
//!
//! Turns the per-provider, per-resource hint sets into the flat list of
//! slots the merger enumerates. A provider (or resource) with no hints has
//! no opinion; keeping it would empty the cross product and hide every
//! other provider's candidates.

use numalign_core::{ProviderHints, TopologyHint};
use tracing::trace;

/// One cross-product dimension: the candidates of a single resource.
pub type HintSlot = Vec<TopologyHint>;

/// Drop abstaining providers and resources, flattening the rest into slots.
///
/// Slots come out in provider order, then resource-name order.
pub fn filter_providers_hints(providers: &[ProviderHints]) -> Vec<HintSlot> {
    let mut slots = Vec::new();
    for (index, provider) in providers.iter().enumerate() {
        if provider.is_abstaining() {
            trace!(provider = index, "provider has no hints, skipping");
            continue;
        }
        for (resource, hints) in provider.resources() {
            if hints.is_empty() {
                trace!(provider = index, resource, "resource has no hints, skipping");
                continue;
            }
            slots.push(hints.to_vec());
        }
    }
    slots
}
