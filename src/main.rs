//! # chatkb CLI
//!
//! The `chatkb` binary is the primary interface for the service. It
//! provides commands for database initialization, starting the HTTP
//! server, and working with the knowledge base from the terminal.
//!
//! ## Usage
//!
//! ```bash
//! chatkb --config ./config/chatkb.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `chatkb init` | Create the SQLite database and both tables |
//! | `chatkb serve` | Start the HTTP server |
//! | `chatkb ask "<message>"` | Match a message against the knowledge base |
//! | `chatkb teach "<question>" "<answer>"` | Add a knowledge entry |
//! | `chatkb pending` | List unresolved unknown questions |
//! | `chatkb stats` | Database overview |

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use chatkb::{ask, config, migrate, pending, server, stats, teach};

/// chatkb — a self-learning chat answering service backed by SQLite.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/chatkb.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "chatkb",
    about = "A self-learning chat answering service backed by SQLite",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/chatkb.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and both tables (knowledge_base,
    /// unknown_questions). Idempotent — running it multiple times is safe.
    Init,

    /// Start the HTTP server.
    ///
    /// Binds to the address configured in `[server].bind` and serves
    /// `/chat`, `/feedback`, `/health`, and (optionally) the static
    /// front-end directory.
    Serve,

    /// Match a message against the knowledge base.
    ///
    /// Low-confidence messages are logged as unknown questions, exactly as
    /// they would be via `POST /chat`.
    Ask {
        /// The message to answer.
        message: String,
    },

    /// Teach the service the correct answer to a question.
    ///
    /// Adds a knowledge entry and resolves any logged unknown questions
    /// with the same text, exactly as via `POST /feedback`.
    Teach {
        /// The question being answered.
        question: String,

        /// The correct answer (at least 3 characters).
        feedback: String,
    },

    /// List unresolved unknown questions, newest first.
    Pending {
        /// Maximum number of questions to list.
        #[arg(long, default_value_t = 50)]
        limit: i64,
    },

    /// Print database statistics.
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Ask { message } => {
            ask::run_ask(&cfg, &message).await?;
        }
        Commands::Teach { question, feedback } => {
            teach::run_teach(&cfg, &question, &feedback).await?;
        }
        Commands::Pending { limit } => {
            pending::run_pending(&cfg, limit).await?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg).await?;
        }
    }

    Ok(())
}
