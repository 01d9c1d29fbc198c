//! numalign.toml configuration parser.
//!
//! The file names the machine topology, the policy to run, and optionally a
//! fixed set of provider hints (used by `numalignctl` to replay a decision).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::bitmask::NumaNodes;
use crate::error::AffinityResult;
use crate::types::{ProviderHints, TopologyHint};

/// Policy used when the file does not name one.
pub const DEFAULT_POLICY: &str = "none";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumalignConfig {
    pub topology: TopologyConfig,
    pub policy: Option<PolicyConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub providers: Vec<ProviderConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyConfig {
    pub numa_nodes: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub name: String,
    #[serde(default)]
    pub resources: BTreeMap<String, Vec<HintConfig>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HintConfig {
    /// Omitted means "any node".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affinity: Option<Vec<usize>>,
    #[serde(default)]
    pub preferred: bool,
}

impl NumalignConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: NumalignConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Scaffold a minimal numalign.toml for the given machine.
    pub fn scaffold(numa_nodes: &[usize], policy: &str) -> Self {
        NumalignConfig {
            topology: TopologyConfig {
                numa_nodes: numa_nodes.to_vec(),
            },
            policy: Some(PolicyConfig {
                name: policy.to_string(),
            }),
            providers: Vec::new(),
        }
    }

    pub fn policy_name(&self) -> &str {
        self.policy
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or(DEFAULT_POLICY)
    }

    /// Validated machine topology.
    pub fn numa_nodes(&self) -> AffinityResult<NumaNodes> {
        NumaNodes::new(self.topology.numa_nodes.iter().copied())
    }

    /// Provider hints in file order, validated against `nodes`.
    pub fn provider_hints(&self, nodes: &NumaNodes) -> AffinityResult<Vec<ProviderHints>> {
        self.providers
            .iter()
            .map(|provider| provider.to_hints(nodes))
            .collect()
    }
}

impl ProviderConfig {
    pub fn to_hints(&self, nodes: &NumaNodes) -> AffinityResult<ProviderHints> {
        self.resources
            .iter()
            .map(|(resource, hints)| -> AffinityResult<(String, Vec<TopologyHint>)> {
                let hints = hints
                    .iter()
                    .map(|h| h.to_hint(nodes))
                    .collect::<AffinityResult<Vec<_>>>()?;
                Ok((resource.clone(), hints))
            })
            .collect()
    }
}

impl HintConfig {
    pub fn to_hint(&self, nodes: &NumaNodes) -> AffinityResult<TopologyHint> {
        let affinity = match &self.affinity {
            Some(ids) => Some(nodes.mask(ids)?),
            None => None,
        };
        Ok(TopologyHint {
            affinity,
            preferred: self.preferred,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AffinityError;
    use std::io::Write;

    const SCENARIO: &str = r#"
[topology]
numa_nodes = [0, 1]

[policy]
name = "pod-level-single-numa-node"

[[providers]]
name = "cpu-manager"
[providers.resources]
cpu = [
    { affinity = [0, 1], preferred = true },
    { affinity = [1], preferred = true },
]

[[providers]]
name = "device-manager"
[providers.resources]
"example.com/gpu" = [{ preferred = false }]
"#;

    #[test]
    fn test_scaffold() {
        let config = NumalignConfig::scaffold(&[0, 1], "restricted");
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("numa_nodes"));
        assert!(toml_str.contains("restricted"));
        assert!(!toml_str.contains("providers"));
    }

    #[test]
    fn test_parse_minimal() {
        let toml_str = r#"
[topology]
numa_nodes = [0]
"#;
        let config = NumalignConfig::parse(toml_str).unwrap();
        assert_eq!(config.topology.numa_nodes, vec![0]);
        assert_eq!(config.policy_name(), DEFAULT_POLICY);
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_parse_scenario() {
        let config = NumalignConfig::parse(SCENARIO).unwrap();
        assert_eq!(config.policy_name(), "pod-level-single-numa-node");

        let nodes = config.numa_nodes().unwrap();
        let providers = config.provider_hints(&nodes).unwrap();
        assert_eq!(providers.len(), 2);

        let cpu = providers[0].get("cpu").unwrap();
        assert_eq!(cpu.len(), 2);
        assert_eq!(cpu[1].affinity, Some(nodes.mask(&[1]).unwrap()));

        let gpu = providers[1].get("example.com/gpu").unwrap();
        assert_eq!(gpu, &[TopologyHint::any(false)]);
    }

    #[test]
    fn test_unknown_node_in_hint() {
        let toml_str = r#"
[topology]
numa_nodes = [0, 1]

[[providers]]
name = "memory-manager"
[providers.resources]
memory = [{ affinity = [3], preferred = true }]
"#;
        let config = NumalignConfig::parse(toml_str).unwrap();
        let nodes = config.numa_nodes().unwrap();
        let err = config.provider_hints(&nodes).unwrap_err();
        assert!(matches!(err, AffinityError::InvalidNode { node: 3, .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCENARIO.as_bytes()).unwrap();

        let config = NumalignConfig::from_file(file.path()).unwrap();
        assert_eq!(config.providers.len(), 2);
        assert_eq!(config.providers[1].name, "device-manager");
    }

    #[test]
    fn test_from_missing_file() {
        assert!(NumalignConfig::from_file(Path::new("/nonexistent/numalign.toml")).is_err());
    }
}
