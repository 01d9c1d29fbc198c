use numalign_core::{Admission, NumaNodes, ProviderHints};
use tracing::info;

use super::{MergeContext, Policy};
use crate::error::PolicyResult;

/// Registry name of [`RestrictedPolicy`].
pub const POLICY_RESTRICTED: &str = "restricted";

/// Admits only when the best alignment is preferred.
#[derive(Debug, Clone)]
pub struct RestrictedPolicy {
    ctx: MergeContext,
}

impl RestrictedPolicy {
    pub fn new(numa_nodes: NumaNodes) -> Self {
        info!(nodes = ?numa_nodes.ids(), "restricted policy created");
        Self {
            ctx: MergeContext::new(numa_nodes),
        }
    }
}

impl_with_sink!(RestrictedPolicy);

impl Policy for RestrictedPolicy {
    fn name(&self) -> &'static str {
        POLICY_RESTRICTED
    }

    fn merge(&self, providers: &[ProviderHints]) -> PolicyResult<Admission> {
        let best = self.ctx.best_hint(self.name(), providers, |slots| slots)?;
        let admit = best.preferred;
        Ok(self.ctx.decide(self.name(), best, admit))
    }
}
