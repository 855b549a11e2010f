//! # Jobmarket - Two-Channel Job Marketplace
//!
//! A small marketplace connecting workers who offer services (providers)
//! with customers looking for them (seekers).
//!
//! Jobmarket provides:
//! - SQLite-backed storage for providers, seekers and job requests
//! - Seven marketplace operations with typed outcomes
//! - Plain-text rendering of every outcome for conversational clients
//! - A tool catalogue served over MCP (stdio) and HTTP (bearer-token auth)

pub mod model;
pub mod storage;
pub mod market;
pub mod tools;
pub mod server;
pub mod config;
pub mod ui;


// Re-exports for convenient access
pub use model::{JobRequest, JobStatus, Provider, Seeker};
pub use market::Marketplace;
pub use storage::{BootstrapMode, MarketStore, SqliteStore};
pub use tools::ToolName;

/// Result type alias for Jobmarket operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Jobmarket operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
