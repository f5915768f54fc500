use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "fairap",
    about = "FairAP: fairness-driven terminal to access point assignment",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the fairest assignment and compare it with the baselines.
    ///
    /// Measurement samples in the scenario replace each AP's default RTT
    /// with their mean before the search starts.
    Optimize {
        /// Scenario file
        #[arg(short, long, default_value = "fairap.toml")]
        config: String,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
        /// Seed for the random baseline (overrides [optimizer].seed)
        #[arg(long)]
        seed: Option<u64>,
        /// Evaluate candidates on a single thread
        #[arg(long)]
        sequential: bool,
    },
    /// Count raw and feasible load distributions without searching
    Count {
        #[arg(short, long, default_value = "fairap.toml")]
        config: String,
    },
    /// Write a scenario scaffold
    Init {
        /// Output file
        #[arg(short, long, default_value = "fairap.toml")]
        path: String,
        /// Number of access points
        #[arg(long, default_value_t = fairap_core::DEFAULT_ACCESS_POINTS)]
        aps: usize,
        /// Number of terminals
        #[arg(long, default_value_t = fairap_core::DEFAULT_TERMINALS)]
        terminals: usize,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fairap=info".parse()?)
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Optimize { config, format, seed, sequential } => {
            commands::optimize::optimize(&config, &format, seed, sequential)
        }
        Commands::Count { config } => commands::count::count(&config),
        Commands::Init { path, aps, terminals } => {
            commands::init::init(&path, aps, terminals)
        }
    }
}
