//! Jobmarket CLI - serve the job marketplace tools over MCP or HTTP

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use jobmarket::config::{self, EnvOverrides, JobmarketConfig, Settings};
use jobmarket::server::{self, mcp::McpService, AppState};
use jobmarket::storage::{BootstrapMode, SqliteStore};
use jobmarket::ui::{self, Icons};
use jobmarket::Marketplace;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "jobmarket")]
#[command(version)]
#[command(about = "Two-channel job marketplace - workers offer services, customers find them")]
#[command(long_about = r#"
Jobmarket connects job providers (workers offering services) with job
seekers (customers needing them). Its tools are served to assistants over
MCP (stdio) or HTTP.

Example usage:
  jobmarket mcp
  jobmarket serve --port 8086
  jobmarket stats
  jobmarket reset
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the tools over HTTP with bearer-token authentication
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Schema preparation at startup (reset, preserve)
        #[arg(short, long)]
        bootstrap: Option<BootstrapMode>,

        /// Serve tool routes without bearer authentication
        #[arg(long)]
        no_auth: bool,
    },

    /// Serve the tools over MCP on stdin/stdout
    Mcp {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Schema preparation at startup (reset, preserve)
        #[arg(short, long)]
        bootstrap: Option<BootstrapMode>,
    },

    /// Erase all data and restore the sample providers
    Reset {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Show marketplace statistics
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

fn load_settings(cli_config: Option<&PathBuf>) -> anyhow::Result<Settings> {
    let file = config::load_config(cli_config.map(PathBuf::as_path))?;
    let env = EnvOverrides::from_env()?;
    Ok(Settings::resolve(file, &env))
}

fn open_store(database: &Path, mode: BootstrapMode) -> anyhow::Result<SqliteStore> {
    config::ensure_db_dir(database)?;
    if mode == BootstrapMode::Reset {
        tracing::warn!("Bootstrap mode 'reset': existing data in {} is discarded", database.display());
    }
    let store = SqliteStore::open(database, mode)?;
    tracing::info!("Opened database {} (bootstrap: {})", database.display(), mode);
    Ok(store)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stderr keeps stdout free for MCP
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let settings = load_settings(cli.config.as_ref())?;

    match cli.command {
        Commands::Serve { port, database, bootstrap, no_auth } => {
            let identity = settings.require_identity()?.to_string();
            let auth_token = settings.http_auth_token(no_auth)?;
            let database = database.unwrap_or(settings.database);
            let port = port.unwrap_or(settings.port);
            let store = open_store(&database, bootstrap.unwrap_or(settings.bootstrap))?;

            ui::banner(
                "Job Marketplace - Two Channels",
                &[
                    ("Channel 1:", "Job Providers (workers offering services)"),
                    ("Channel 2:", "Job Seekers (customers needing services)"),
                ],
            );
            ui::info("Listening", &format!("http://0.0.0.0:{}", port));
            if auth_token.is_some() {
                ui::info("Auth", "bearer token required on /tools");
            } else {
                ui::warn("--no-auth given; tool routes are unauthenticated");
            }

            let state = Arc::new(AppState::new(store, identity, auth_token));
            server::start_server(port, state).await?;
        }

        Commands::Mcp { database, bootstrap } => {
            let identity = settings.require_identity()?.to_string();
            let database = database.unwrap_or(settings.database);
            let store = open_store(&database, bootstrap.unwrap_or(settings.bootstrap))?;

            let state = Arc::new(AppState::new(store, identity, settings.auth_token));
            McpService::new(state).run_stdio().await?;
        }

        Commands::Reset { database } => {
            let database = database.unwrap_or(settings.database);
            open_store(&database, BootstrapMode::Reset)?;
            ui::success(&format!("Reset {} to the sample providers", database.display()));
        }

        Commands::Stats { database } => {
            let database = database.unwrap_or(settings.database);
            let store = open_store(&database, BootstrapMode::Preserve)?;
            let stats = Marketplace::new(store).marketplace_stats()?;

            ui::section(&format!("{} Marketplace Statistics ({})", Icons::STATS, database.display()));
            println!("{}", ui::stats_table(&stats));
        }

        Commands::Init { force } => {
            let path = cli.config.clone().unwrap_or_else(config::default_config_path);
            let defaults = JobmarketConfig {
                database: Some(config::DEFAULT_DATABASE.to_string()),
                port: Some(config::DEFAULT_PORT),
                auth_token: None,
                identity: None,
                bootstrap: Some(BootstrapMode::default()),
            };

            if let Err(e) = config::write_config(&path, &defaults, force) {
                ui::error(&e.to_string());
                return Err(e);
            }
            ui::success(&format!("Wrote {}", path.display()));
        }
    }

    Ok(())
}
