//! Policy registry — maps configured policy names to implementations.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use numalign_core::NumaNodes;

use crate::diagnostics::{DiagnosticsSink, TracingSink};
use crate::error::{PolicyError, PolicyResult};
use crate::policy::{
    BestEffortPolicy, NonePolicy, POLICY_BEST_EFFORT, POLICY_NONE,
    POLICY_POD_LEVEL_SINGLE_NUMA_NODE, POLICY_RESTRICTED, POLICY_SINGLE_NUMA_NODE,
    PodLevelSingleNumaNodePolicy, Policy, RestrictedPolicy, SingleNumaNodePolicy,
};

/// Every policy a configuration can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    None,
    BestEffort,
    Restricted,
    SingleNumaNode,
    PodLevelSingleNumaNode,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 5] = [
        PolicyKind::None,
        PolicyKind::BestEffort,
        PolicyKind::Restricted,
        PolicyKind::SingleNumaNode,
        PolicyKind::PodLevelSingleNumaNode,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PolicyKind::None => POLICY_NONE,
            PolicyKind::BestEffort => POLICY_BEST_EFFORT,
            PolicyKind::Restricted => POLICY_RESTRICTED,
            PolicyKind::SingleNumaNode => POLICY_SINGLE_NUMA_NODE,
            PolicyKind::PodLevelSingleNumaNode => POLICY_POD_LEVEL_SINGLE_NUMA_NODE,
        }
    }

    /// Instantiate the policy for a machine, reporting to `sink`.
    pub fn build(&self, numa_nodes: NumaNodes, sink: Arc<dyn DiagnosticsSink>) -> Arc<dyn Policy> {
        match self {
            PolicyKind::None => Arc::new(NonePolicy::new(numa_nodes).with_sink(sink)),
            PolicyKind::BestEffort => Arc::new(BestEffortPolicy::new(numa_nodes).with_sink(sink)),
            PolicyKind::Restricted => Arc::new(RestrictedPolicy::new(numa_nodes).with_sink(sink)),
            PolicyKind::SingleNumaNode => {
                Arc::new(SingleNumaNodePolicy::new(numa_nodes).with_sink(sink))
            }
            PolicyKind::PodLevelSingleNumaNode => {
                Arc::new(PodLevelSingleNumaNodePolicy::new(numa_nodes).with_sink(sink))
            }
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| PolicyError::UnknownPolicy(s.to_string()))
    }
}

/// Instantiate a policy with the default tracing sink.
pub fn new_policy(kind: PolicyKind, numa_nodes: NumaNodes) -> Arc<dyn Policy> {
    kind.build(numa_nodes, Arc::new(TracingSink))
}

/// Look up a policy by its configured name.
pub fn policy_from_name(name: &str, numa_nodes: NumaNodes) -> PolicyResult<Arc<dyn Policy>> {
    Ok(new_policy(name.parse()?, numa_nodes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in PolicyKind::ALL {
            assert_eq!(kind.to_string().parse::<PolicyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn built_policy_reports_its_name() {
        let nodes = NumaNodes::new([0, 1]).unwrap();
        for kind in PolicyKind::ALL {
            assert_eq!(new_policy(kind, nodes.clone()).name(), kind.name());
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let nodes = NumaNodes::new([0]).unwrap();
        let err = policy_from_name("container-single-numa", nodes).err().unwrap();
        assert_eq!(err, PolicyError::UnknownPolicy("container-single-numa".to_string()));
    }

    #[test]
    fn lookup_by_name() {
        let nodes = NumaNodes::new([0]).unwrap();
        let policy = policy_from_name("pod-level-single-numa-node", nodes).unwrap();
        assert_eq!(policy.name(), POLICY_POD_LEVEL_SINGLE_NUMA_NODE);
    }
}
