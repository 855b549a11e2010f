//! Tool catalogue
//!
//! Every marketplace operation is exposed as a named tool taking JSON
//! arguments and returning plain text. Transports (MCP, HTTP) list tools
//! from here and dispatch calls through [`invoke`].

use crate::market::{render, Marketplace, DEFAULT_BROWSE_LIMIT};
use crate::model::{NewJobRequest, NewProvider, NewSeeker, DEFAULT_EXPERIENCE, DEFAULT_RATE};
use crate::storage::MarketStore;
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;

/// Names of the tools the marketplace exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    Validate,
    RegisterProvider,
    RegisterSeeker,
    FindProviders,
    PostJobRequest,
    ViewProfile,
    BrowseProviders,
    MarketplaceStats,
}

impl ToolName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::Validate => "validate",
            ToolName::RegisterProvider => "register_provider",
            ToolName::RegisterSeeker => "register_seeker",
            ToolName::FindProviders => "find_providers",
            ToolName::PostJobRequest => "post_job_request",
            ToolName::ViewProfile => "view_profile",
            ToolName::BrowseProviders => "browse_providers",
            ToolName::MarketplaceStats => "marketplace_stats",
        }
    }

    pub fn all() -> &'static [ToolName] {
        &[
            ToolName::Validate,
            ToolName::RegisterProvider,
            ToolName::RegisterSeeker,
            ToolName::FindProviders,
            ToolName::PostJobRequest,
            ToolName::ViewProfile,
            ToolName::BrowseProviders,
            ToolName::MarketplaceStats,
        ]
    }

    /// Label used in "<action> failed: ..." responses
    fn action(&self) -> &'static str {
        match self {
            ToolName::Validate => "Validation",
            ToolName::RegisterProvider | ToolName::RegisterSeeker => "Registration",
            ToolName::FindProviders => "Search",
            ToolName::PostJobRequest => "Job posting",
            ToolName::ViewProfile => "Profile access",
            ToolName::BrowseProviders => "Browse",
            ToolName::MarketplaceStats => "Stats",
        }
    }

    fn guide(&self) -> ToolGuide {
        match self {
            ToolName::Validate => ToolGuide {
                description: "Return the server owner's identity",
                use_when: "Used by the client to verify the server it is connected to",
                side_effects: None,
            },
            ToolName::RegisterProvider => ToolGuide {
                description: "Register as job provider or worker to offer services in job marketplace",
                use_when: "Use ONLY when someone explicitly wants to register as worker, job provider, or offer services for jobs",
                side_effects: Some("Creates job provider profile in marketplace database"),
            },
            ToolName::RegisterSeeker => ToolGuide {
                description: "Register as job seeker or customer to find workers and services in job marketplace",
                use_when: "Use ONLY when someone explicitly wants to register as job seeker, customer, or needs to find workers/services",
                side_effects: Some("Creates job seeker profile in marketplace database"),
            },
            ToolName::FindProviders => ToolGuide {
                description: "Search and find job providers or workers for specific services in job marketplace",
                use_when: "Use ONLY when someone explicitly asks to find workers, job providers, or search for specific services like plumber, electrician etc",
                side_effects: Some("Returns matching job providers; registers the caller as job seeker if not yet registered"),
            },
            ToolName::PostJobRequest => ToolGuide {
                description: "Post job request or requirement in marketplace for job providers to respond",
                use_when: "Use ONLY when someone wants to post job requirement, job request, or needs workers to contact them for work",
                side_effects: Some("Creates job request in marketplace that providers can see"),
            },
            ToolName::ViewProfile => ToolGuide {
                description: "View user profile status in job marketplace - shows if registered as provider or seeker",
                use_when: "Use ONLY when user asks about their profile, registration status, or account information in job marketplace context",
                side_effects: Some("Returns user profile information from job marketplace database"),
            },
            ToolName::BrowseProviders => ToolGuide {
                description: "Browse all available job providers by service type or location in marketplace",
                use_when: "Use ONLY when user wants to browse job providers, see available workers, or explore services in job marketplace",
                side_effects: Some("Returns list of all available job providers from marketplace database"),
            },
            ToolName::MarketplaceStats => ToolGuide {
                description: "Show job marketplace statistics including total providers, seekers, and platform metrics",
                use_when: "Use ONLY when user asks about platform statistics, marketplace data, or overall numbers in job marketplace context",
                side_effects: Some("Returns comprehensive job marketplace statistics"),
            },
        }
    }

    /// Tool description: a JSON object with description, use_when and side_effects
    pub fn description(&self) -> String {
        serde_json::to_string(&self.guide()).unwrap_or_else(|_| self.guide().description.to_string())
    }

    /// JSON schema of the tool's arguments
    pub fn input_schema(&self) -> Value {
        let user_id = json!({ "type": "string", "description": "User unique ID" });
        match self {
            ToolName::Validate | ToolName::MarketplaceStats => json!({
                "type": "object",
                "properties": {}
            }),
            ToolName::RegisterProvider => json!({
                "type": "object",
                "properties": {
                    "user_id": user_id,
                    "provider_name": { "type": "string", "description": "Full name" },
                    "phone": { "type": "string", "description": "Phone number" },
                    "services": { "type": "string", "description": "Services offered" },
                    "work_location": { "type": "string", "description": "Work location" },
                    "city": { "type": "string", "description": "City" },
                    "experience": { "type": "string", "description": "Experience details", "default": DEFAULT_EXPERIENCE },
                    "daily_rate": { "type": "string", "description": "Daily rate", "default": DEFAULT_RATE }
                },
                "required": ["user_id", "provider_name", "phone", "services", "work_location", "city"]
            }),
            ToolName::RegisterSeeker => json!({
                "type": "object",
                "properties": {
                    "user_id": user_id,
                    "seeker_name": { "type": "string", "description": "Full name" },
                    "phone": { "type": "string", "description": "Phone number" },
                    "location": { "type": "string", "description": "Location" },
                    "city": { "type": "string", "description": "City" }
                },
                "required": ["user_id", "seeker_name", "phone", "location", "city"]
            }),
            ToolName::FindProviders => json!({
                "type": "object",
                "properties": {
                    "user_id": user_id,
                    "service_needed": { "type": "string", "description": "Service or job type needed" },
                    "preferred_city": { "type": "string", "description": "Preferred city", "default": "" }
                },
                "required": ["user_id", "service_needed"]
            }),
            ToolName::PostJobRequest => json!({
                "type": "object",
                "properties": {
                    "user_id": user_id,
                    "job_type": { "type": "string", "description": "Type of job or service needed" },
                    "job_description": { "type": "string", "description": "Detailed job description" },
                    "job_location": { "type": "string", "description": "Job location" }
                },
                "required": ["user_id", "job_type", "job_description", "job_location"]
            }),
            ToolName::ViewProfile => json!({
                "type": "object",
                "properties": { "user_id": user_id },
                "required": ["user_id"]
            }),
            ToolName::BrowseProviders => json!({
                "type": "object",
                "properties": {
                    "service_filter": { "type": "string", "description": "Filter by service type", "default": "" },
                    "city_filter": { "type": "string", "description": "Filter by city", "default": "" },
                    "limit": { "type": "integer", "description": "Max results", "minimum": 0, "default": DEFAULT_BROWSE_LIMIT }
                }
            }),
        }
    }
}

impl FromStr for ToolName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "validate" => Ok(ToolName::Validate),
            "register_provider" | "register_job_provider" => Ok(ToolName::RegisterProvider),
            "register_seeker" | "register_job_seeker" => Ok(ToolName::RegisterSeeker),
            "find_providers" | "find_job_providers" => Ok(ToolName::FindProviders),
            "post_job_request" => Ok(ToolName::PostJobRequest),
            "view_profile" | "view_job_profile" => Ok(ToolName::ViewProfile),
            "browse_providers" | "browse_job_providers" => Ok(ToolName::BrowseProviders),
            "marketplace_stats" | "job_marketplace_stats" => Ok(ToolName::MarketplaceStats),
            _ => Err(Error::UnknownTool(s.to_string())),
        }
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Serialize)]
struct ToolGuide {
    description: &'static str,
    use_when: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    side_effects: Option<&'static str>,
}

// ========== Arguments ==========

#[derive(Debug, Deserialize)]
pub struct RegisterProviderArgs {
    #[serde(alias = "puch_user_id")]
    pub user_id: String,
    pub provider_name: String,
    pub phone: String,
    pub services: String,
    pub work_location: String,
    pub city: String,
    #[serde(default = "default_experience")]
    pub experience: String,
    #[serde(default = "default_rate")]
    pub daily_rate: String,
}

impl From<RegisterProviderArgs> for NewProvider {
    fn from(a: RegisterProviderArgs) -> Self {
        NewProvider::new(a.user_id, a.provider_name, a.phone, a.services, a.work_location, a.city)
            .with_experience(a.experience)
            .with_rate(a.daily_rate)
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterSeekerArgs {
    #[serde(alias = "puch_user_id")]
    pub user_id: String,
    pub seeker_name: String,
    pub phone: String,
    pub location: String,
    pub city: String,
}

impl From<RegisterSeekerArgs> for NewSeeker {
    fn from(a: RegisterSeekerArgs) -> Self {
        NewSeeker::new(a.user_id, a.seeker_name, a.phone, a.location, a.city)
    }
}

#[derive(Debug, Deserialize)]
pub struct FindProvidersArgs {
    #[serde(alias = "puch_user_id")]
    pub user_id: String,
    pub service_needed: String,
    #[serde(default)]
    pub preferred_city: String,
}

#[derive(Debug, Deserialize)]
pub struct PostJobRequestArgs {
    #[serde(alias = "puch_user_id")]
    pub user_id: String,
    pub job_type: String,
    pub job_description: String,
    pub job_location: String,
}

impl From<PostJobRequestArgs> for NewJobRequest {
    fn from(a: PostJobRequestArgs) -> Self {
        NewJobRequest {
            seeker_id: a.user_id,
            job_type: a.job_type,
            description: a.job_description,
            location: a.job_location,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ViewProfileArgs {
    #[serde(alias = "puch_user_id")]
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct BrowseProvidersArgs {
    #[serde(default)]
    pub service_filter: String,
    #[serde(default)]
    pub city_filter: String,
    #[serde(default = "default_browse_limit")]
    pub limit: usize,
}

fn default_experience() -> String {
    DEFAULT_EXPERIENCE.to_string()
}

fn default_rate() -> String {
    DEFAULT_RATE.to_string()
}

fn default_browse_limit() -> usize {
    DEFAULT_BROWSE_LIMIT
}

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T> {
    // a missing arguments object is the same as an empty one
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|e| Error::InvalidArguments(e.to_string()))
}

/// Run a tool and produce its text response.
///
/// Storage faults are rendered into the response text. The only errors
/// returned are argument errors, which transports report as protocol errors.
pub fn invoke<S: MarketStore>(
    market: &Marketplace<S>,
    identity: &str,
    tool: ToolName,
    args: Value,
) -> Result<String> {
    tracing::debug!("Invoking tool {}", tool);

    let outcome = match tool {
        ToolName::Validate => return Ok(identity.to_string()),
        ToolName::RegisterProvider => {
            let args: RegisterProviderArgs = parse_args(args)?;
            market
                .register_provider(args.into())
                .map(|o| render::provider_registration(&o))
        }
        ToolName::RegisterSeeker => {
            let args: RegisterSeekerArgs = parse_args(args)?;
            market
                .register_seeker(args.into())
                .map(|o| render::seeker_registration(&o))
        }
        ToolName::FindProviders => {
            let args: FindProvidersArgs = parse_args(args)?;
            market
                .find_providers(&args.user_id, &args.service_needed, &args.preferred_city)
                .map(|o| render::provider_search(&o))
        }
        ToolName::PostJobRequest => {
            let args: PostJobRequestArgs = parse_args(args)?;
            market
                .post_job_request(args.into())
                .map(|o| render::job_posting(&o))
        }
        ToolName::ViewProfile => {
            let args: ViewProfileArgs = parse_args(args)?;
            market.view_profile(&args.user_id).map(|o| render::profile(&o))
        }
        ToolName::BrowseProviders => {
            let args: BrowseProvidersArgs = parse_args(args)?;
            market
                .browse_providers(&args.service_filter, &args.city_filter, args.limit)
                .map(|o| render::browse(&o))
        }
        ToolName::MarketplaceStats => market.marketplace_stats().map(|o| render::stats(&o)),
    };

    Ok(outcome.unwrap_or_else(|e| {
        tracing::warn!("Tool {} failed: {}", tool, e);
        render::failure(tool.action(), &e)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{JobRequest, JobStatus, Provider, ProviderFilter, Seeker};
    use crate::storage::SqliteStore;

    /// Store whose every call fails
    struct BrokenStore;

    fn broken<T>() -> Result<T> {
        Err(Error::Storage(rusqlite::Error::QueryReturnedNoRows))
    }

    impl MarketStore for BrokenStore {
        fn find_provider(&self, _: &str) -> Result<Option<Provider>> { broken() }
        fn insert_provider(&self, _: &NewProvider) -> Result<Provider> { broken() }
        fn search_providers(&self, _: &ProviderFilter) -> Result<Vec<Provider>> { broken() }
        fn find_seeker(&self, _: &str) -> Result<Option<Seeker>> { broken() }
        fn insert_seeker(&self, _: &NewSeeker) -> Result<Seeker> { broken() }
        fn insert_job_request(&self, _: &NewJobRequest) -> Result<JobRequest> { broken() }
        fn count_job_requests_for(&self, _: &str) -> Result<usize> { broken() }
        fn count_providers(&self) -> Result<usize> { broken() }
        fn count_available_providers(&self) -> Result<usize> { broken() }
        fn count_seekers(&self) -> Result<usize> { broken() }
        fn count_job_requests(&self, _: Option<JobStatus>) -> Result<usize> { broken() }
        fn providers_per_city(&self) -> Result<Vec<(String, usize)>> { broken() }
        fn all_provider_skills(&self) -> Result<Vec<String>> { broken() }
    }

    fn market() -> Marketplace<SqliteStore> {
        Marketplace::new(SqliteStore::open_in_memory().unwrap())
    }

    #[test]
    fn test_tool_name_roundtrip() {
        for tool in ToolName::all() {
            let parsed: ToolName = tool.as_str().parse().unwrap();
            assert_eq!(*tool, parsed);
        }
        assert_eq!(ToolName::from_str("find_job_providers").unwrap(), ToolName::FindProviders);
        assert!(matches!(ToolName::from_str("delete_everything"), Err(Error::UnknownTool(_))));
    }

    #[test]
    fn test_description_is_json() {
        let desc: Value = serde_json::from_str(&ToolName::PostJobRequest.description()).unwrap();
        assert!(desc["use_when"].as_str().unwrap().starts_with("Use ONLY"));
        let desc: Value = serde_json::from_str(&ToolName::Validate.description()).unwrap();
        assert!(desc.get("side_effects").is_none());
    }

    #[test]
    fn test_validate_returns_identity() {
        let text = invoke(&market(), "919876543210", ToolName::Validate, Value::Null).unwrap();
        assert_eq!(text, "919876543210");
    }

    #[test]
    fn test_register_provider_defaults_and_alias() {
        let market = market();
        let text = invoke(&market, "", ToolName::RegisterProvider, json!({
            "puch_user_id": "w1",
            "provider_name": "Imran Khan",
            "phone": "9000011111",
            "services": "welder gate repair",
            "work_location": "Kothrud",
            "city": "Pune"
        }))
        .unwrap();

        assert!(text.starts_with("Job Provider Registration Successful!"));
        assert!(text.contains("Experience: 1 year\n"));
        assert!(text.contains("Rate: 400 per day\n"));
        assert!(market.store().find_provider("w1").unwrap().is_some());
    }

    #[test]
    fn test_missing_argument_is_error() {
        let err = invoke(&market(), "", ToolName::ViewProfile, json!({})).unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));
    }

    #[test]
    fn test_browse_defaults() {
        let text = invoke(&market(), "", ToolName::BrowseProviders, Value::Null).unwrap();
        assert!(text.starts_with("Available Job Providers (5 of 5):"));
    }

    #[test]
    fn test_post_job_unregistered_refused() {
        let market = market();
        let text = invoke(&market, "", ToolName::PostJobRequest, json!({
            "user_id": "c1",
            "job_type": "cleaning",
            "job_description": "office cleaning",
            "job_location": "Powai"
        }))
        .unwrap();

        assert!(text.contains("register as job seeker first"));
        assert_eq!(market.store().count_job_requests(None).unwrap(), 0);
    }

    #[test]
    fn test_storage_faults_become_text() {
        let market = Marketplace::new(BrokenStore);

        let text = invoke(&market, "", ToolName::ViewProfile, json!({ "user_id": "u1" })).unwrap();
        assert!(text.starts_with("Profile access failed: "));

        let text = invoke(&market, "", ToolName::MarketplaceStats, Value::Null).unwrap();
        assert!(text.starts_with("Stats failed: "));

        let text = invoke(&market, "", ToolName::FindProviders, json!({
            "user_id": "u1",
            "service_needed": "plumber"
        }))
        .unwrap();
        assert!(text.starts_with("Search failed: "));
    }
}
