//! Marketplace operations
//!
//! Each operation issues a handful of store calls and returns a typed
//! outcome. Storage faults propagate as `Err`; turning them into text is the
//! render layer's job.

use std::collections::HashMap;
use crate::Result;
use crate::model::{
    JobStatus, NewJobRequest, NewProvider, NewSeeker, Provider, ProviderFilter, Seeker,
};
use crate::storage::MarketStore;
use super::outcome::{
    BrowsePage, JobPosting, MarketStats, ProfileView, ProviderSearch, Registration,
};

/// Maximum number of providers returned by a search
pub const SEARCH_LIMIT: usize = 5;

/// Page size used by browse when the caller gives none
pub const DEFAULT_BROWSE_LIMIT: usize = 10;

/// Number of services listed in the statistics report
pub const TOP_SERVICES: usize = 5;

/// The marketplace, operating over an injected store
pub struct Marketplace<S> {
    store: S,
}

impl<S: MarketStore> Marketplace<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a provider unless one already exists for the user id
    pub fn register_provider(&self, provider: NewProvider) -> Result<Registration<Provider>> {
        if let Some(existing) = self.store.find_provider(&provider.user_id)? {
            tracing::debug!("Provider {} already registered", provider.user_id);
            return Ok(Registration::AlreadyRegistered { name: existing.name });
        }

        let created = self.store.insert_provider(&provider)?;
        tracing::info!("Registered provider {} ({})", created.user_id, created.skills);
        Ok(Registration::Registered(created))
    }

    /// Register a seeker unless one already exists for the user id
    pub fn register_seeker(&self, seeker: NewSeeker) -> Result<Registration<Seeker>> {
        if let Some(existing) = self.store.find_seeker(&seeker.user_id)? {
            tracing::debug!("Seeker {} already registered", seeker.user_id);
            return Ok(Registration::AlreadyRegistered { name: existing.name });
        }

        let created = self.store.insert_seeker(&seeker)?;
        tracing::info!("Registered seeker {}", created.user_id);
        Ok(Registration::Registered(created))
    }

    /// Create a placeholder seeker for `user_id` if none exists.
    ///
    /// Returns `true` when a seeker was created.
    pub fn ensure_seeker(&self, user_id: &str, preferred_city: &str) -> Result<bool> {
        if self.store.find_seeker(user_id)?.is_some() {
            return Ok(false);
        }

        self.store.insert_seeker(&NewSeeker::placeholder(user_id, preferred_city))?;
        tracing::info!("Auto-registered seeker {}", user_id);
        Ok(true)
    }

    /// Search available providers whose skills contain `service`.
    ///
    /// Unknown callers are registered as placeholder seekers first.
    pub fn find_providers(
        &self,
        user_id: &str,
        service: &str,
        preferred_city: &str,
    ) -> Result<ProviderSearch> {
        let seeker_created = self.ensure_seeker(user_id, preferred_city)?;

        let filter = ProviderFilter::new(SEARCH_LIMIT)
            .skills(service)
            .city(preferred_city);
        let providers = self.store.search_providers(&filter)?;
        tracing::debug!("Search '{}' in '{}': {} match(es)", service, preferred_city, providers.len());

        Ok(ProviderSearch {
            service: service.to_string(),
            city: preferred_city.to_string(),
            providers,
            seeker_created,
        })
    }

    /// Post a job request on behalf of a registered seeker
    pub fn post_job_request(&self, request: NewJobRequest) -> Result<JobPosting> {
        if self.store.find_seeker(&request.seeker_id)?.is_none() {
            tracing::debug!("Refused job request from unregistered user {}", request.seeker_id);
            return Ok(JobPosting::SeekerRequired);
        }

        let posted = self.store.insert_job_request(&request)?;
        tracing::info!("Posted job request #{} ({}) for {}", posted.id, posted.job_type, posted.seeker_id);
        Ok(JobPosting::Posted(posted))
    }

    /// Resolve the caller's profile, preferring the provider role
    pub fn view_profile(&self, user_id: &str) -> Result<ProfileView> {
        if let Some(provider) = self.store.find_provider(user_id)? {
            return Ok(ProfileView::Provider(provider));
        }

        match self.store.find_seeker(user_id)? {
            Some(seeker) => {
                let job_requests = self.store.count_job_requests_for(user_id)?;
                Ok(ProfileView::Seeker { seeker, job_requests })
            }
            None => Ok(ProfileView::NotFound),
        }
    }

    /// List available providers, optionally filtered by service and city
    pub fn browse_providers(
        &self,
        service_filter: &str,
        city_filter: &str,
        limit: usize,
    ) -> Result<BrowsePage> {
        let filter = ProviderFilter::new(limit)
            .skills(service_filter)
            .city(city_filter);
        let providers = self.store.search_providers(&filter)?;
        let total_available = self.store.count_available_providers()?;

        Ok(BrowsePage { providers, total_available })
    }

    /// Compute the marketplace statistics report
    pub fn marketplace_stats(&self) -> Result<MarketStats> {
        let skills = self.store.all_provider_skills()?;

        Ok(MarketStats {
            total_providers: self.store.count_providers()?,
            available_providers: self.store.count_available_providers()?,
            total_seekers: self.store.count_seekers()?,
            total_requests: self.store.count_job_requests(None)?,
            open_requests: self.store.count_job_requests(Some(JobStatus::Open))?,
            cities: self.store.providers_per_city()?,
            top_services: top_services(&skills, TOP_SERVICES),
        })
    }
}

/// Tally whitespace-separated service keywords and keep the `n` most common.
///
/// Keywords with equal counts keep the order in which they were first seen.
pub fn top_services<T: AsRef<str>>(skills: &[T], n: usize) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tally: Vec<(String, usize)> = Vec::new();

    for text in skills {
        for word in text.as_ref().split_whitespace() {
            match index.get(word) {
                Some(&i) => tally[i].1 += 1,
                None => {
                    index.insert(word, tally.len());
                    tally.push((word.to_string(), 1));
                }
            }
        }
    }

    // stable: ties stay in first-seen order
    tally.sort_by(|a, b| b.1.cmp(&a.1));
    tally.truncate(n);
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStore;

    fn market() -> Marketplace<SqliteStore> {
        Marketplace::new(SqliteStore::open_in_memory().unwrap())
    }

    fn worker(user_id: &str) -> NewProvider {
        NewProvider::new(user_id, "Vikram Singh", "9000000001", "carpenter furniture", "Baner", "Pune")
    }

    fn job(user_id: &str) -> NewJobRequest {
        NewJobRequest {
            seeker_id: user_id.to_string(),
            job_type: "plumbing".to_string(),
            description: "kitchen sink leaking".to_string(),
            location: "Andheri".to_string(),
        }
    }

    #[test]
    fn test_register_provider_once() {
        let market = market();

        let first = market.register_provider(worker("w1")).unwrap();
        assert!(first.is_registered());

        let second = market.register_provider(worker("w1").with_rate("900 per day")).unwrap();
        assert_eq!(second, Registration::AlreadyRegistered { name: "Vikram Singh".into() });
        assert_eq!(market.store().count_providers().unwrap(), 6);
    }

    #[test]
    fn test_register_seeker_once() {
        let market = market();
        let seeker = NewSeeker::new("c1", "Neha", "8000000000", "Baner", "Pune");

        assert!(market.register_seeker(seeker.clone()).unwrap().is_registered());
        assert_eq!(
            market.register_seeker(seeker).unwrap(),
            Registration::AlreadyRegistered { name: "Neha".into() }
        );
        assert_eq!(market.store().count_seekers().unwrap(), 1);
    }

    #[test]
    fn test_ensure_seeker_is_idempotent() {
        let market = market();
        assert!(market.ensure_seeker("c1", "Mumbai").unwrap());
        assert!(!market.ensure_seeker("c1", "Delhi").unwrap());

        let seeker = market.store().find_seeker("c1").unwrap().unwrap();
        assert_eq!(seeker.city, "Mumbai");
        assert_eq!(market.store().count_seekers().unwrap(), 1);
    }

    #[test]
    fn test_find_providers_matches_skills() {
        let market = market();
        let search = market.find_providers("c1", "plumber", "").unwrap();

        assert!(search.seeker_created);
        let names: Vec<_> = search.providers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ramesh Yadav", "Rajesh Kumar"]);
        assert!(search.providers.iter().all(|p| !p.skills.contains("painter")));
    }

    #[test]
    fn test_find_providers_city_filter() {
        let market = market();
        let search = market.find_providers("c1", "plumber", "Mumbai").unwrap();
        assert_eq!(search.providers.len(), 1);
        assert_eq!(search.providers[0].user_id, "provider_001");

        let search = market.find_providers("c1", "plumber", "Chennai").unwrap();
        assert!(!search.seeker_created);
        assert!(search.providers.is_empty());
    }

    #[test]
    fn test_find_providers_caps_results() {
        let market = market();
        for i in 0..4 {
            market.register_provider(NewProvider::new(
                format!("w{}", i), "Extra", "1", "plumber", "X", "Mumbai",
            )).unwrap();
        }
        let search = market.find_providers("c1", "plumber", "").unwrap();
        assert_eq!(search.providers.len(), SEARCH_LIMIT);
    }

    #[test]
    fn test_post_job_requires_seeker() {
        let market = market();

        assert_eq!(market.post_job_request(job("c1")).unwrap(), JobPosting::SeekerRequired);
        assert_eq!(market.store().count_job_requests(None).unwrap(), 0);

        market.register_seeker(NewSeeker::new("c1", "Neha", "8", "Andheri", "Mumbai")).unwrap();
        match market.post_job_request(job("c1")).unwrap() {
            JobPosting::Posted(request) => {
                assert_eq!(request.status, JobStatus::Open);
                assert_eq!(request.job_type, "plumbing");
            }
            other => panic!("expected posted request, got {:?}", other),
        }
        assert_eq!(market.store().count_job_requests(None).unwrap(), 1);
    }

    #[test]
    fn test_view_profile_prefers_provider() {
        let market = market();
        market.register_provider(worker("u1")).unwrap();
        market.register_seeker(NewSeeker::new("u1", "Vikram", "9", "Baner", "Pune")).unwrap();

        assert!(matches!(market.view_profile("u1").unwrap(), ProfileView::Provider(p) if p.user_id == "u1"));
    }

    #[test]
    fn test_view_profile_seeker_counts_requests() {
        let market = market();
        market.register_seeker(NewSeeker::new("c1", "Neha", "8", "Andheri", "Mumbai")).unwrap();
        market.post_job_request(job("c1")).unwrap();
        market.post_job_request(job("c1")).unwrap();

        match market.view_profile("c1").unwrap() {
            ProfileView::Seeker { seeker, job_requests } => {
                assert_eq!(seeker.name, "Neha");
                assert_eq!(job_requests, 2);
            }
            other => panic!("expected seeker profile, got {:?}", other),
        }
        assert_eq!(market.view_profile("ghost").unwrap(), ProfileView::NotFound);
    }

    #[test]
    fn test_browse_reports_unfiltered_total() {
        let market = market();

        let page = market.browse_providers("", "", 2).unwrap();
        assert_eq!(page.providers.len(), 2);
        assert_eq!(page.total_available, 5);

        let page = market.browse_providers("electrician", "Mumbai", DEFAULT_BROWSE_LIMIT).unwrap();
        assert_eq!(page.providers.len(), 1);
        assert_eq!(page.providers[0].name, "Suresh Patel");
        assert_eq!(page.total_available, 5);
    }

    #[test]
    fn test_stats_open_requests_increase() {
        let market = market();
        market.register_seeker(NewSeeker::new("c1", "Neha", "8", "Andheri", "Mumbai")).unwrap();

        let before = market.marketplace_stats().unwrap();
        market.post_job_request(job("c1")).unwrap();
        let after = market.marketplace_stats().unwrap();

        assert_eq!(after.open_requests, before.open_requests + 1);
        assert_eq!(after.total_requests, 1);
        assert_eq!(after.total_seekers, 1);
        assert_eq!(after.total_providers, 5);
    }

    #[test]
    fn test_top_services_seed_ranking() {
        let market = market();
        let stats = market.marketplace_stats().unwrap();

        let expected: Vec<(String, usize)> = vec![
            ("plumber".into(), 2),
            ("bathroom".into(), 2),
            ("repair".into(), 2),
            ("electrician".into(), 2),
            ("wiring".into(), 2),
        ];
        assert_eq!(stats.top_services, expected);
    }

    #[test]
    fn test_top_services_ties_keep_first_seen_order() {
        let skills = ["b a", "c a", "c"];
        let top = top_services(&skills, 5);
        assert_eq!(
            top,
            vec![("a".to_string(), 2), ("c".to_string(), 2), ("b".to_string(), 1)]
        );
        assert_eq!(top_services(&skills, 1).len(), 1);
    }
}
