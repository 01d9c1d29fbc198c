use numalign_core::{Admission, NumaNodes, ProviderHints};
use tracing::info;

use super::{MergeContext, Policy};
use crate::error::PolicyResult;

/// Registry name of [`BestEffortPolicy`].
pub const POLICY_BEST_EFFORT: &str = "best-effort";

/// Computes the best alignment but always admits.
#[derive(Debug, Clone)]
pub struct BestEffortPolicy {
    ctx: MergeContext,
}

impl BestEffortPolicy {
    pub fn new(numa_nodes: NumaNodes) -> Self {
        info!(nodes = ?numa_nodes.ids(), "best-effort policy created");
        Self {
            ctx: MergeContext::new(numa_nodes),
        }
    }
}

impl_with_sink!(BestEffortPolicy);

impl Policy for BestEffortPolicy {
    fn name(&self) -> &'static str {
        POLICY_BEST_EFFORT
    }

    fn merge(&self, providers: &[ProviderHints]) -> PolicyResult<Admission> {
        let best = self.ctx.best_hint(self.name(), providers, |slots| slots)?;
        Ok(self.ctx.decide(self.name(), best, true))
    }
}
