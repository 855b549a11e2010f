use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::storage::BootstrapMode;

pub const DEFAULT_DATABASE: &str = "job_marketplace.db";
pub const DEFAULT_PORT: u16 = 8086;

/// Contents of `jobmarket.toml`; every field is optional
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct JobmarketConfig {
    pub database: Option<String>,
    pub port: Option<u16>,
    /// Bearer token required by the HTTP transport
    pub auth_token: Option<String>,
    /// Returned by the `validate` tool
    pub identity: Option<String>,
    pub bootstrap: Option<BootstrapMode>,
}

/// Fully resolved settings: CLI flags over environment over file over defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database: PathBuf,
    pub port: u16,
    pub auth_token: Option<String>,
    pub identity: Option<String>,
    pub bootstrap: BootstrapMode,
}

impl Settings {
    pub fn resolve(file: Option<JobmarketConfig>, env: &EnvOverrides) -> Self {
        let file = file.unwrap_or_default();
        Self {
            database: env
                .database
                .clone()
                .or(file.database)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE)),
            port: env.port.or(file.port).unwrap_or(DEFAULT_PORT),
            auth_token: env.auth_token.clone().or(file.auth_token).filter(|t| !t.is_empty()),
            identity: env.identity.clone().or(file.identity).filter(|i| !i.is_empty()),
            bootstrap: file.bootstrap.unwrap_or_default(),
        }
    }

    /// Identity returned by `validate`; both transports refuse to start without one
    pub fn require_identity(&self) -> anyhow::Result<&str> {
        match self.identity.as_deref() {
            Some(identity) => Ok(identity),
            None => anyhow::bail!("no identity configured: set MY_NUMBER or `identity` in the config file"),
        }
    }

    /// Bearer token for the HTTP transport.
    ///
    /// A token is mandatory unless authentication was explicitly disabled.
    pub fn http_auth_token(&self, no_auth: bool) -> anyhow::Result<Option<String>> {
        if no_auth {
            return Ok(None);
        }
        match &self.auth_token {
            Some(token) => Ok(Some(token.clone())),
            None => anyhow::bail!(
                "no auth token configured: set AUTH_TOKEN or `auth_token` in the config file (or pass --no-auth)"
            ),
        }
    }
}

/// Values taken from the process environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    pub database: Option<String>,
    pub port: Option<u16>,
    pub auth_token: Option<String>,
    pub identity: Option<String>,
}

impl EnvOverrides {
    /// Read `JOBMARKET_DATABASE`, `JOBMARKET_PORT`, `AUTH_TOKEN` and `MY_NUMBER`,
    /// after loading a `.env` file if one is present
    pub fn from_env() -> anyhow::Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }

        let port = match std::env::var("JOBMARKET_PORT") {
            Ok(p) => Some(p.parse().map_err(|e| anyhow::anyhow!("invalid JOBMARKET_PORT '{}': {}", p, e))?),
            Err(_) => None,
        };

        Ok(Self {
            database: std::env::var("JOBMARKET_DATABASE").ok(),
            port,
            auth_token: std::env::var("AUTH_TOKEN").ok(),
            identity: std::env::var("MY_NUMBER").ok(),
        })
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("jobmarket.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<JobmarketConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: JobmarketConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &JobmarketConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
