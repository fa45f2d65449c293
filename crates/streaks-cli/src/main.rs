use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use streaks_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "streaks", version, about = "Streaks habit tracker CLI")]
struct Cli {
    /// Habit database file (defaults to storage.db_file in the config)
    #[arg(long, global = true, env = "STREAKS_DB")]
    db: Option<PathBuf>,

    /// Use the UTC calendar day as "today" instead of the local one
    #[arg(long, global = true)]
    utc: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit tracking
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Install the stderr subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_habit(
    action: commands::habit::HabitAction,
    db: Option<PathBuf>,
    utc: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_logging(&config.logging.level);
    commands::habit::run(action, &config, db, utc)
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Habit { action } => run_habit(action, cli.db, cli.utc),
        Commands::Config { action } => {
            init_logging("warn");
            commands::config::run(action)
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "streaks", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
