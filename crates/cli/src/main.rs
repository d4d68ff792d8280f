//! git-mini-commit CLI
//!
//! Installed on PATH, git runs it as `git mini-commit`.

use clap::{Parser, Subcommand};
use cli_lib::cmd;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (EnvFilter syntax)
const LOG_ENV: &str = "MINI_COMMIT_LOG";

/// Save the staging area as small local snapshots between full commits
#[derive(Parser)]
#[command(name = "git-mini-commit")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Create a mini-commit from the staged changes with this message
    #[arg(short, long)]
    message: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List saved mini-commits
    List,
    /// Show a mini-commit and its patch
    Show {
        /// Mini-commit id or unique prefix
        id: String,
        /// Show patch statistics instead of the patch
        #[arg(long)]
        stat: bool,
    },
    /// Apply a mini-commit back to the staging area
    Pop {
        /// Mini-commit id or unique prefix
        id: String,
        /// Delete the mini-commit after it applied
        #[arg(long)]
        drop: bool,
    },
    /// Delete a mini-commit
    Drop {
        /// Mini-commit id or unique prefix
        id: String,
    },
    /// Delete all mini-commits
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// View or edit configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// List all configuration values
    List,
    /// Get a configuration value
    Get {
        /// Key, e.g. display.short_id_len
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Key, e.g. display.short_id_len
        key: String,
        /// New value
        value: String,
    },
    /// Show the config file location
    Path {
        /// Create the file with defaults if missing
        #[arg(long)]
        create: bool,
    },
    /// Print an annotated example configuration
    Example,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        None => cmd::create::run(cli.message.as_deref()).await,
        Some(Commands::List) => cmd::list::run().await,
        Some(Commands::Show { id, stat }) => cmd::show::run(&id, stat).await,
        Some(Commands::Pop { id, drop }) => cmd::pop::run(&id, drop).await,
        Some(Commands::Drop { id }) => cmd::drop::run(&id).await,
        Some(Commands::Clear { yes }) => cmd::clear::run(yes).await,
        Some(Commands::Config(config_cmd)) => match config_cmd {
            ConfigCommands::List => cmd::config::run_list().await,
            ConfigCommands::Get { key } => cmd::config::run_get(&key).await,
            ConfigCommands::Set { key, value } => cmd::config::run_set(&key, &value).await,
            ConfigCommands::Path { create } => cmd::config::run_path(create).await,
            ConfigCommands::Example => cmd::config::run_example().await,
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
