//! Shared types used across numalign crates.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::bitmask::Bitmask;

/// A candidate NUMA affinity proposed by a hint provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TopologyHint {
    /// `None` means the producer accepts any placement.
    pub affinity: Option<Bitmask>,
    /// The producer considers this a good choice, not merely a feasible one.
    pub preferred: bool,
}

impl TopologyHint {
    pub fn new(affinity: Bitmask, preferred: bool) -> Self {
        Self {
            affinity: Some(affinity),
            preferred,
        }
    }

    /// Hint without an affinity constraint.
    pub fn any(preferred: bool) -> Self {
        Self {
            affinity: None,
            preferred,
        }
    }
}

impl Default for TopologyHint {
    fn default() -> Self {
        Self::any(false)
    }
}

impl fmt::Display for TopologyHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.affinity {
            Some(mask) => write!(f, "{{affinity: {mask}, preferred: {}}}", self.preferred),
            None => write!(f, "{{affinity: any, preferred: {}}}", self.preferred),
        }
    }
}

/// Hints reported by one provider for one admission decision, keyed by
/// resource name.
///
/// A resource with an empty list abstains. A provider whose resources all
/// abstain has no opinion at all and takes no part in the merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProviderHints {
    resources: BTreeMap<String, Vec<TopologyHint>>,
}

impl ProviderHints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider reporting a single resource.
    pub fn single(resource: impl Into<String>, hints: Vec<TopologyHint>) -> Self {
        Self::new().with_resource(resource, hints)
    }

    pub fn with_resource(mut self, resource: impl Into<String>, hints: Vec<TopologyHint>) -> Self {
        self.insert(resource, hints);
        self
    }

    pub fn insert(&mut self, resource: impl Into<String>, hints: Vec<TopologyHint>) {
        self.resources.insert(resource.into(), hints);
    }

    pub fn get(&self, resource: &str) -> Option<&[TopologyHint]> {
        self.resources.get(resource).map(Vec::as_slice)
    }

    /// Resources in name order.
    pub fn resources(&self) -> impl Iterator<Item = (&str, &[TopologyHint])> {
        self.resources
            .iter()
            .map(|(name, hints)| (name.as_str(), hints.as_slice()))
    }

    /// True if no resource reported any hint.
    pub fn is_abstaining(&self) -> bool {
        self.resources.values().all(Vec::is_empty)
    }
}

impl FromIterator<(String, Vec<TopologyHint>)> for ProviderHints {
    fn from_iter<I: IntoIterator<Item = (String, Vec<TopologyHint>)>>(iter: I) -> Self {
        Self {
            resources: iter.into_iter().collect(),
        }
    }
}

/// Result of one admission decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Admission {
    /// Best combined hint after normalization.
    pub hint: TopologyHint,
    /// Whether the workload may be admitted.
    pub admit: bool,
}

impl Admission {
    pub fn verdict(&self) -> &'static str {
        if self.admit { "ADMIT" } else { "REJECT" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmask::NumaNodes;

    #[test]
    fn hint_display() {
        let nodes = NumaNodes::new([0, 1]).unwrap();
        let hint = TopologyHint::new(nodes.mask(&[1]).unwrap(), true);
        assert_eq!(hint.to_string(), "{affinity: {1}, preferred: true}");
        assert_eq!(
            TopologyHint::any(false).to_string(),
            "{affinity: any, preferred: false}"
        );
    }

    #[test]
    fn default_hint_is_unconstrained_and_not_preferred() {
        assert_eq!(TopologyHint::default(), TopologyHint::any(false));
    }

    #[test]
    fn provider_abstains_when_every_resource_is_empty() {
        assert!(ProviderHints::new().is_abstaining());
        let hints = ProviderHints::single("cpu", vec![]).with_resource("memory", vec![]);
        assert!(hints.is_abstaining());
        let hints = hints.with_resource("gpu", vec![TopologyHint::any(true)]);
        assert!(!hints.is_abstaining());
    }

    #[test]
    fn resources_iterate_in_name_order() {
        let hints = ProviderHints::single("memory", vec![])
            .with_resource("cpu", vec![])
            .with_resource("hugepages-2Mi", vec![]);
        let names: Vec<&str> = hints.resources().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["cpu", "hugepages-2Mi", "memory"]);
    }

    #[test]
    fn admission_serializes_affinity_as_list() {
        let nodes = NumaNodes::new([0, 1]).unwrap();
        let admission = Admission {
            hint: TopologyHint::new(nodes.mask(&[0]).unwrap(), true),
            admit: true,
        };
        let json = serde_json::to_value(admission).unwrap();
        assert_eq!(json["hint"]["affinity"], serde_json::json!([0]));
        assert_eq!(json["admit"], serde_json::json!(true));
        assert_eq!(admission.verdict(), "ADMIT");
    }
}
