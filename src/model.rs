//! Marketplace records
//!
//! Three independent entities, linked only logically by the external
//! user identifier:
//! - `Provider`: a worker offering services
//! - `Seeker`: a customer looking for services
//! - `JobRequest`: work a seeker needs done, not addressed to any provider

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default experience recorded when a provider does not state one
pub const DEFAULT_EXPERIENCE: &str = "1 year";

/// Default daily rate recorded when a provider does not state one
pub const DEFAULT_RATE: &str = "400 per day";

/// Lifecycle state of a job request.
///
/// Requests are created `Open`; nothing in the marketplace moves them on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Open,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "open",
        }
    }

    /// Capitalized form used in responses
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Open => "Open",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A worker profile offering one or more services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    /// Internal row id, increasing with insertion order
    pub id: i64,
    /// External user identifier, unique among providers
    pub user_id: String,
    pub name: String,
    pub phone: String,
    /// Space-delimited service keywords, matched by substring
    pub skills: String,
    /// Work location within the city
    pub location: String,
    pub city: String,
    pub experience: String,
    pub rate: String,
    /// Whether the provider currently accepts work
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

impl Provider {
    pub fn availability_label(&self) -> &'static str {
        if self.available { "Available" } else { "Not Available" }
    }

    /// Individual service keywords from the skills text
    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.skills.split_whitespace()
    }
}

/// A customer profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seeker {
    pub id: i64,
    /// External user identifier, unique among seekers
    pub user_id: String,
    pub name: String,
    pub phone: String,
    pub location: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
}

/// A customer-authored description of work needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequest {
    pub id: i64,
    /// User id of the seeker who posted the request (not enforced by the schema)
    pub seeker_id: String,
    pub job_type: String,
    pub description: String,
    pub location: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when registering a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProvider {
    pub user_id: String,
    pub name: String,
    pub phone: String,
    pub skills: String,
    pub location: String,
    pub city: String,
    pub experience: String,
    pub rate: String,
}

impl NewProvider {
    /// Create a registration with the default experience and rate
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
        skills: impl Into<String>,
        location: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            phone: phone.into(),
            skills: skills.into(),
            location: location.into(),
            city: city.into(),
            experience: DEFAULT_EXPERIENCE.to_string(),
            rate: DEFAULT_RATE.to_string(),
        }
    }

    pub fn with_experience(mut self, experience: impl Into<String>) -> Self {
        self.experience = experience.into();
        self
    }

    pub fn with_rate(mut self, rate: impl Into<String>) -> Self {
        self.rate = rate.into();
        self
    }
}

/// Fields supplied when registering a seeker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSeeker {
    pub user_id: String,
    pub name: String,
    pub phone: String,
    pub location: String,
    pub city: String,
}

impl NewSeeker {
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
        location: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            phone: phone.into(),
            location: location.into(),
            city: city.into(),
        }
    }

    /// Seeker created implicitly the first time an unknown user searches
    pub fn placeholder(user_id: impl Into<String>, preferred_city: &str) -> Self {
        let city = if preferred_city.is_empty() {
            "Not specified"
        } else {
            preferred_city
        };
        Self::new(user_id, "User", "Not provided", "Not specified", city)
    }
}

/// Fields supplied when posting a job request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJobRequest {
    pub seeker_id: String,
    pub job_type: String,
    pub description: String,
    pub location: String,
}

/// Filter over available providers.
///
/// Empty filters are treated as absent. Results are always most recently
/// inserted first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProviderFilter {
    /// Substring matched against the skills text
    pub skills: Option<String>,
    /// Substring matched against the city
    pub city: Option<String>,
    pub limit: usize,
}

impl ProviderFilter {
    pub fn new(limit: usize) -> Self {
        Self { skills: None, city: None, limit }
    }

    pub fn skills(mut self, term: &str) -> Self {
        self.skills = non_empty(term);
        self
    }

    pub fn city(mut self, city: &str) -> Self {
        self.city = non_empty(city);
        self
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}
