//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with three independent tables:
//! - job_providers(user_id, name, phone, skills, location, city, experience, rate, available)
//! - job_seekers(user_id, name, phone, location, city)
//! - job_requests(seeker_id, job_type, description, location, status)
//!
//! There are no foreign keys; `job_requests.seeker_id` refers to a seeker
//! by convention only.

pub mod schema;
pub mod seed;
pub mod sqlite;

pub use sqlite::SqliteStore;

use crate::model::{
    JobRequest, JobStatus, NewJobRequest, NewProvider, NewSeeker, Provider, ProviderFilter, Seeker,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the schema is prepared when a store is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BootstrapMode {
    /// Drop every table, recreate it empty and insert the seed providers.
    /// All previously stored data is lost.
    #[default]
    Reset,
    /// Create missing tables only; seed providers when none exist.
    Preserve,
}

impl BootstrapMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BootstrapMode::Reset => "reset",
            BootstrapMode::Preserve => "preserve",
        }
    }
}

impl FromStr for BootstrapMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "reset" | "fresh" => Ok(BootstrapMode::Reset),
            "preserve" | "keep" => Ok(BootstrapMode::Preserve),
            _ => Err(Error::InvalidValue(format!("Unknown bootstrap mode: {}", s))),
        }
    }
}

impl std::fmt::Display for BootstrapMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Storage primitives the marketplace operations are built on.
///
/// Implemented by [`SqliteStore`]; operations are generic over this trait so
/// tests can substitute their own store.
pub trait MarketStore {
    fn find_provider(&self, user_id: &str) -> Result<Option<Provider>>;
    fn insert_provider(&self, provider: &NewProvider) -> Result<Provider>;
    /// Available providers matching the filter, most recently inserted first
    fn search_providers(&self, filter: &ProviderFilter) -> Result<Vec<Provider>>;

    fn find_seeker(&self, user_id: &str) -> Result<Option<Seeker>>;
    fn insert_seeker(&self, seeker: &NewSeeker) -> Result<Seeker>;

    fn insert_job_request(&self, request: &NewJobRequest) -> Result<JobRequest>;
    fn count_job_requests_for(&self, seeker_id: &str) -> Result<usize>;

    fn count_providers(&self) -> Result<usize>;
    fn count_available_providers(&self) -> Result<usize>;
    fn count_seekers(&self) -> Result<usize>;
    /// Count job requests, optionally restricted to one status
    fn count_job_requests(&self, status: Option<JobStatus>) -> Result<usize>;
    /// (city, provider count), largest first
    fn providers_per_city(&self) -> Result<Vec<(String, usize)>>;
    /// Skills text of every provider in insertion order
    fn all_provider_skills(&self) -> Result<Vec<String>>;
}
