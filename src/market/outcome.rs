//! Typed results of the marketplace operations.
//!
//! Business refusals (duplicate registration, posting without a seeker
//! profile, empty results) are ordinary variants here, never errors.

use crate::model::{JobRequest, Provider, Seeker};
use serde::Serialize;

/// Outcome of registering a provider or seeker
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Registration<T> {
    Registered(T),
    /// A profile already exists for the user id; carries its name
    AlreadyRegistered { name: String },
}

impl<T> Registration<T> {
    pub fn is_registered(&self) -> bool {
        matches!(self, Registration::Registered(_))
    }
}

/// Result of a provider search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderSearch {
    pub service: String,
    /// Preferred city, empty when no city filter was applied
    pub city: String,
    pub providers: Vec<Provider>,
    /// Whether the search auto-registered the caller as a seeker
    pub seeker_created: bool,
}

/// Outcome of posting a job request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum JobPosting {
    Posted(JobRequest),
    /// The caller has no seeker profile; nothing was stored
    SeekerRequired,
}

/// What a user sees when viewing their profile.
///
/// A provider profile takes precedence over a seeker profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "profile", rename_all = "snake_case")]
pub enum ProfileView {
    Provider(Provider),
    Seeker { seeker: Seeker, job_requests: usize },
    NotFound,
}

/// One page of available providers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowsePage {
    pub providers: Vec<Provider>,
    /// Available providers ignoring the filters
    pub total_available: usize,
}

/// Aggregate marketplace figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct MarketStats {
    pub total_providers: usize,
    pub available_providers: usize,
    pub total_seekers: usize,
    pub total_requests: usize,
    pub open_requests: usize,
    /// (city, providers), largest first
    pub cities: Vec<(String, usize)>,
    /// (service keyword, providers offering it), at most five
    pub top_services: Vec<(String, usize)>,
}
