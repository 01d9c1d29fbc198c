//! Hint providers and the admission entry point that ties them to a policy.

use std::sync::Arc;

use numalign_core::{Admission, ProviderHints};
use tracing::debug;

use crate::error::PolicyResult;
use crate::policy::Policy;

/// A resource subsystem (CPU, memory, devices, ...) that proposes NUMA
/// affinities for a workload `W`.
pub trait HintProvider<W: ?Sized>: Send + Sync {
    fn name(&self) -> &str;

    /// Candidate affinities for `workload`, keyed by resource.
    fn topology_hints(&self, workload: &W) -> ProviderHints;
}

/// Collects hints from every registered provider and hands them to one
/// policy. Holds no per-decision state.
pub struct TopologyAdmitter<W: ?Sized> {
    policy: Arc<dyn Policy>,
    providers: Vec<Arc<dyn HintProvider<W>>>,
}

impl<W: ?Sized> TopologyAdmitter<W> {
    pub fn new(policy: Arc<dyn Policy>) -> Self {
        Self {
            policy,
            providers: Vec::new(),
        }
    }

    /// Register a provider. Providers are consulted in registration order.
    pub fn add_provider(&mut self, provider: Arc<dyn HintProvider<W>>) {
        debug!(provider = provider.name(), policy = self.policy.name(), "hint provider registered");
        self.providers.push(provider);
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Gather hints for `workload` and run the policy.
    pub fn admit(&self, workload: &W) -> PolicyResult<Admission> {
        let hints: Vec<ProviderHints> = self
            .providers
            .iter()
            .map(|provider| {
                let hints = provider.topology_hints(workload);
                debug!(provider = provider.name(), ?hints, "collected topology hints");
                hints
            })
            .collect();
        self.policy.merge(&hints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numalign_core::{NumaNodes, TopologyHint};

    use crate::registry::{PolicyKind, new_policy};

    struct Request {
        cpus: usize,
    }

    /// Fits small requests on node 1, anything else needs both nodes.
    struct CpuProvider {
        nodes: NumaNodes,
    }

    impl HintProvider<Request> for CpuProvider {
        fn name(&self) -> &str {
            "cpu"
        }

        fn topology_hints(&self, workload: &Request) -> ProviderHints {
            let hint = if workload.cpus <= 4 {
                TopologyHint::new(self.nodes.mask(&[1]).unwrap(), true)
            } else {
                TopologyHint::new(self.nodes.full(), false)
            };
            ProviderHints::single("cpu", vec![hint])
        }
    }

    struct Abstaining;

    impl HintProvider<Request> for Abstaining {
        fn name(&self) -> &str {
            "devices"
        }

        fn topology_hints(&self, _workload: &Request) -> ProviderHints {
            ProviderHints::new()
        }
    }

    fn admitter() -> TopologyAdmitter<Request> {
        let nodes = NumaNodes::new([0, 1]).unwrap();
        let mut admitter =
            TopologyAdmitter::new(new_policy(PolicyKind::PodLevelSingleNumaNode, nodes.clone()));
        admitter.add_provider(Arc::new(CpuProvider { nodes }));
        admitter.add_provider(Arc::new(Abstaining));
        admitter
    }

    #[test]
    fn small_request_is_admitted_on_one_node() {
        let admitter = admitter();
        let admission = admitter.admit(&Request { cpus: 2 }).unwrap();
        assert!(admission.admit);
        assert_eq!(admission.hint.affinity.unwrap().nodes(), vec![1]);
        assert_eq!(admitter.provider_count(), 2);
        assert_eq!(admitter.policy_name(), "pod-level-single-numa-node");
    }

    #[test]
    fn large_request_is_rejected() {
        let admission = admitter().admit(&Request { cpus: 16 }).unwrap();
        assert!(!admission.admit);
        assert_eq!(admission.hint, TopologyHint::any(false));
    }

    #[test]
    fn no_providers_admits_unconstrained() {
        let nodes = NumaNodes::new([0, 1]).unwrap();
        let admitter: TopologyAdmitter<Request> =
            TopologyAdmitter::new(new_policy(PolicyKind::Restricted, nodes));
        let admission = admitter.admit(&Request { cpus: 1 }).unwrap();
        assert_eq!(admission.hint, TopologyHint::any(true));
        assert!(admission.admit);
    }
}
