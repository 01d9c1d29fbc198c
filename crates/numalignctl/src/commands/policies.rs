use numalign_core::NumalignConfig;
use numalign_policy::PolicyKind;

pub fn list() -> anyhow::Result<()> {
    for kind in PolicyKind::ALL {
        println!("{kind}");
    }
    Ok(())
}

pub fn init(nodes: &[usize], policy: &str) -> anyhow::Result<()> {
    print!("{}", scaffold(nodes, policy)?);
    Ok(())
}

/// Validate the inputs and render a numalign.toml.
pub fn scaffold(nodes: &[usize], policy: &str) -> anyhow::Result<String> {
    let kind: PolicyKind = policy.parse()?;
    let config = NumalignConfig::scaffold(nodes, kind.name());
    config.numa_nodes()?;
    config.to_toml_string()
}
