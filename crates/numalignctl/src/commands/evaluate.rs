use std::path::Path;

use numalign_core::{NumalignConfig, TopologyHint};
use serde::Serialize;
use tracing::debug;

/// Outcome of replaying one admission decision.
#[derive(Debug, Serialize)]
pub struct Report {
    pub policy: String,
    pub numa_nodes: Vec<usize>,
    pub providers: Vec<String>,
    pub hint: TopologyHint,
    pub admit: bool,
}

pub fn evaluate(path: &str, policy: Option<&str>, format: &str) -> anyhow::Result<()> {
    debug!(path, "loading numalign config");
    let config = NumalignConfig::from_file(Path::new(path))?;
    let report = run(&config, policy)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!("{}", format_report(&report));
        }
    }

    Ok(())
}

pub fn run(config: &NumalignConfig, policy: Option<&str>) -> anyhow::Result<Report> {
    let nodes = config.numa_nodes()?;
    let hints = config.provider_hints(&nodes)?;
    let name = policy.unwrap_or(config.policy_name());

    let policy = numalign_policy::policy_from_name(name, nodes.clone())?;
    let admission = policy.merge(&hints)?;

    Ok(Report {
        policy: policy.name().to_string(),
        numa_nodes: nodes.ids().to_vec(),
        providers: config.providers.iter().map(|p| p.name.clone()).collect(),
        hint: admission.hint,
        admit: admission.admit,
    })
}

pub fn format_report(report: &Report) -> String {
    let verdict = if report.admit { "✓ ADMIT" } else { "✗ REJECT" };
    let affinity = match &report.hint.affinity {
        Some(mask) => mask.to_string(),
        None => "any".to_string(),
    };
    [
        verdict.to_string(),
        format!("  Policy:    {}", report.policy),
        format!("  Nodes:     {:?}", report.numa_nodes),
        format!("  Providers: {}", report.providers.join(", ")),
        format!("  Affinity:  {affinity}"),
        format!("  Preferred: {}", report.hint.preferred),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CONFIG: &str = r#"
[topology]
numa_nodes = [0, 1]

[policy]
name = "pod-level-single-numa-node"

[[providers]]
name = "cpu-manager"
[providers.resources]
cpu = [{ affinity = [0, 1], preferred = true }]

[[providers]]
name = "memory-manager"
[providers.resources]
memory = [{ affinity = [1], preferred = true }]
"#;

    #[test]
    fn run_uses_configured_policy() {
        let config = NumalignConfig::parse(CONFIG).unwrap();
        let report = run(&config, None).unwrap();

        assert_eq!(report.policy, "pod-level-single-numa-node");
        assert_eq!(report.providers, vec!["cpu-manager", "memory-manager"]);
        assert_eq!(report.hint.affinity.unwrap().nodes(), vec![1]);
        assert!(report.admit);
    }

    #[test]
    fn run_with_policy_override() {
        let config = NumalignConfig::parse(CONFIG).unwrap();
        let report = run(&config, Some("none")).unwrap();
        assert_eq!(report.policy, "none");
        assert_eq!(report.hint, TopologyHint::any(false));
        assert!(report.admit);
    }

    #[test]
    fn run_rejects_unknown_policy() {
        let config = NumalignConfig::parse(CONFIG).unwrap();
        let err = run(&config, Some("strict")).unwrap_err();
        assert!(err.to_string().contains("strict"));
    }

    #[test]
    fn evaluate_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();
        let path = file.path().to_str().unwrap();

        evaluate(path, None, "json").unwrap();
        evaluate(path, Some("restricted"), "text").unwrap();
    }

    #[test]
    fn text_report_shows_verdict_and_affinity() {
        let config = NumalignConfig::parse(CONFIG).unwrap();
        let text = format_report(&run(&config, None).unwrap());
        assert!(text.starts_with("✓ ADMIT"));
        assert!(text.contains("Affinity:  {1}"));
        assert!(text.contains("cpu-manager, memory-manager"));
    }
}
