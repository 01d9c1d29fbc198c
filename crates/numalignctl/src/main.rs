use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "numalignctl",
    about = "numalign — NUMA topology alignment admission",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a topology policy over the provider hints in a config file
    Evaluate {
        /// Path to numalign.toml
        #[arg(short, long, default_value = "numalign.toml")]
        config: String,
        /// Override the policy named in the config file.
        #[arg(short, long)]
        policy: Option<String>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// List the registered topology policies
    Policies,
    /// Print a numalign.toml scaffold for a machine
    Init {
        /// NUMA node identifiers, comma separated
        #[arg(short, long, value_delimiter = ',', default_value = "0")]
        nodes: Vec<usize>,
        #[arg(short, long, default_value = "pod-level-single-numa-node")]
        policy: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("numalign=info".parse()?)
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate { config, policy, format } => {
            commands::evaluate::evaluate(&config, policy.as_deref(), &format)
        }
        Commands::Policies => commands::policies::list(),
        Commands::Init { nodes, policy } => commands::policies::init(&nodes, &policy),
    }
}
