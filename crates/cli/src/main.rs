mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seedbed")]
#[command(about = "Deterministic fixture and seed-data generation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run seeders in dependency order
    Run {
        /// Environment to seed for (development, testing, staging, production)
        #[arg(long)]
        env: Option<String>,

        /// RNG seed for a reproducible dataset
        #[arg(long)]
        seed: Option<u64>,

        /// Procedural records per seeder
        #[arg(long, default_value = "10")]
        count: usize,

        /// Run only the named seeders (repeatable)
        #[arg(long)]
        only: Vec<String>,

        /// Delete existing rows for the targeted entity types first
        #[arg(long)]
        fresh: bool,

        /// Allow seeding in production and other unsafe environments
        #[arg(long)]
        force: bool,

        /// Write the seeded dataset as a JSON snapshot to this path
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },

    /// List registered seeders in execution order
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            env,
            seed,
            count,
            only,
            fresh,
            force,
            out,
        } => {
            commands::seed::run(commands::seed::RunArgs {
                env,
                seed,
                count,
                only,
                fresh,
                force,
                out,
            })
            .await
        }
        Commands::List => commands::seed::list(),
    }
}
