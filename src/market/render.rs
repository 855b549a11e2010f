//! Plain-text responses
//!
//! Every outcome, including failures, becomes a human-readable message.
//! Transports deliver these strings as-is.

use crate::Error;
use crate::model::{JobRequest, Provider, Seeker};
use super::outcome::{
    BrowsePage, JobPosting, MarketStats, ProfileView, ProviderSearch, Registration,
};

/// "<action> failed: <message>"
pub fn failure(action: &str, error: &Error) -> String {
    format!("{} failed: {}", action, error)
}

pub fn provider_registration(outcome: &Registration<Provider>) -> String {
    match outcome {
        Registration::AlreadyRegistered { name } => {
            format!("You are already registered as job provider: {}", name)
        }
        Registration::Registered(p) => format!(
            "Job Provider Registration Successful!\n\n\
             Name: {}\n\
             Phone: {}\n\
             Services: {}\n\
             Location: {}, {}\n\
             Experience: {}\n\
             Rate: {}\n\
             Status: Active\n\n\
             You are now registered as job provider. Job seekers can find you when searching for your services.",
            p.name, p.phone, p.skills, p.location, p.city, p.experience, p.rate
        ),
    }
}

pub fn seeker_registration(outcome: &Registration<Seeker>) -> String {
    match outcome {
        Registration::AlreadyRegistered { name } => {
            format!("You are already registered as job seeker: {}", name)
        }
        Registration::Registered(s) => format!(
            "Job Seeker Registration Successful!\n\n\
             Name: {}\n\
             Phone: {}\n\
             Location: {}, {}\n\
             Status: Active\n\n\
             You can now search for job providers and post job requests.",
            s.name, s.phone, s.location, s.city
        ),
    }
}

pub fn provider_search(search: &ProviderSearch) -> String {
    if search.providers.is_empty() {
        let mut out = format!("No job providers found for {}", search.service);
        if !search.city.is_empty() {
            out.push_str(&format!(" in {}", search.city));
        }
        return out;
    }

    let mut out = format!(
        "Found {} job providers for {}:\n\n",
        search.providers.len(),
        search.service
    );
    for (i, p) in search.providers.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, p.name));
        out.push_str(&format!("   Phone: {}\n", p.phone));
        out.push_str(&format!("   Services: {}\n", p.skills));
        out.push_str(&format!("   Location: {}, {}\n", p.location, p.city));
        out.push_str(&format!("   Experience: {}\n", p.experience));
        out.push_str(&format!("   Rate: {}\n\n", p.rate));
    }
    out.push_str("Contact them directly for your job requirements.");
    out
}

pub fn job_posting(outcome: &JobPosting) -> String {
    match outcome {
        JobPosting::SeekerRequired => {
            "Please register as job seeker first using register_seeker".to_string()
        }
        JobPosting::Posted(request) => posted_request(request),
    }
}

fn posted_request(r: &JobRequest) -> String {
    format!(
        "Job Request Posted Successfully!\n\n\
         Job Type: {}\n\
         Description: {}\n\
         Location: {}\n\
         Status: {}\n\n\
         Job providers can now see your request and contact you directly.",
        r.job_type,
        r.description,
        r.location,
        r.status.label()
    )
}

pub fn profile(view: &ProfileView) -> String {
    match view {
        ProfileView::Provider(p) => format!(
            "Job Provider Profile:\n\n\
             Name: {}\n\
             Phone: {}\n\
             Services: {}\n\
             Location: {}, {}\n\
             Experience: {}\n\
             Rate: {}\n\
             Status: {}\n\n\
             You are registered as job provider. Job seekers can find you for your services.",
            p.name,
            p.phone,
            p.skills,
            p.location,
            p.city,
            p.experience,
            p.rate,
            p.availability_label()
        ),
        ProfileView::Seeker { seeker, job_requests } => format!(
            "Job Seeker Profile:\n\n\
             Name: {}\n\
             Phone: {}\n\
             Location: {}, {}\n\
             Job Requests Posted: {}\n\n\
             You are registered as job seeker. You can search for job providers and post job requests.",
            seeker.name, seeker.phone, seeker.location, seeker.city, job_requests
        ),
        ProfileView::NotFound => "No Profile Found\n\n\
             You can register as:\n\
             1. Job Provider - to offer services and get customers\n\
             2. Job Seeker - to find workers and post job requests\n\n\
             Use the appropriate registration tool to get started."
            .to_string(),
    }
}

pub fn browse(page: &BrowsePage) -> String {
    if page.providers.is_empty() {
        return format!(
            "No job providers found with current filters. Total available: {}",
            page.total_available
        );
    }

    let mut out = format!(
        "Available Job Providers ({} of {}):\n\n",
        page.providers.len(),
        page.total_available
    );
    for (i, p) in page.providers.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, p.name));
        out.push_str(&format!("   Phone: {}\n", p.phone));
        out.push_str(&format!("   Services: {}\n", p.skills));
        out.push_str(&format!("   Location: {}, {}\n", p.location, p.city));
        out.push_str(&format!("   Experience: {} | Rate: {}\n\n", p.experience, p.rate));
    }
    out.push_str("Contact any provider directly for your job requirements.");
    out
}

pub fn stats(stats: &MarketStats) -> String {
    let mut out = String::from("Job Marketplace Statistics:\n\n");
    out.push_str("PROVIDERS:\n");
    out.push_str(&format!("Total Job Providers: {}\n", stats.total_providers));
    out.push_str(&format!("Available Now: {}\n\n", stats.available_providers));
    out.push_str("SEEKERS:\n");
    out.push_str(&format!("Total Job Seekers: {}\n", stats.total_seekers));
    out.push_str(&format!("Job Requests Posted: {}\n", stats.total_requests));
    out.push_str(&format!("Open Requests: {}\n\n", stats.open_requests));

    out.push_str("CITIES COVERED:\n");
    for (city, count) in &stats.cities {
        out.push_str(&format!("{}: {} providers\n", city, count));
    }

    out.push_str("\nTOP SERVICES:\n");
    for (service, count) in &stats.top_services {
        out.push_str(&format!("{}: {} providers\n", service, count));
    }

    out.push_str("\nThe marketplace connects job seekers with job providers directly.");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::model::JobStatus;

    fn provider() -> Provider {
        Provider {
            id: 1,
            user_id: "provider_001".into(),
            name: "Rajesh Kumar".into(),
            phone: "9876543210".into(),
            skills: "plumber bathroom repair pipe fixing".into(),
            location: "Andheri West".into(),
            city: "Mumbai".into(),
            experience: "5 years".into(),
            rate: "500 per day".into(),
            available: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_failure_message() {
        let err = Error::Storage(rusqlite::Error::QueryReturnedNoRows);
        let text = failure("Registration", &err);
        assert!(text.starts_with("Registration failed: "));
    }

    #[test]
    fn test_provider_fields_not_mixed_up() {
        let text = provider_registration(&Registration::Registered(provider()));
        assert!(text.contains("Name: Rajesh Kumar\n"));
        assert!(text.contains("Phone: 9876543210\n"));
        assert!(text.contains("Services: plumber bathroom repair pipe fixing\n"));
        assert!(text.contains("Location: Andheri West, Mumbai\n"));
    }

    #[test]
    fn test_already_registered_echoes_name() {
        let text = seeker_registration(&Registration::AlreadyRegistered { name: "Neha".into() });
        assert_eq!(text, "You are already registered as job seeker: Neha");
    }

    #[test]
    fn test_empty_search_mentions_city() {
        let search = ProviderSearch {
            service: "welder".into(),
            city: "Pune".into(),
            providers: vec![],
            seeker_created: false,
        };
        assert_eq!(provider_search(&search), "No job providers found for welder in Pune");

        let search = ProviderSearch { city: String::new(), ..search };
        assert_eq!(provider_search(&search), "No job providers found for welder");
    }

    #[test]
    fn test_search_listing_numbered() {
        let mut second = provider();
        second.name = "Ramesh Yadav".into();
        let search = ProviderSearch {
            service: "plumber".into(),
            city: String::new(),
            providers: vec![second, provider()],
            seeker_created: true,
        };
        let text = provider_search(&search);
        assert!(text.starts_with("Found 2 job providers for plumber:\n\n1. Ramesh Yadav\n"));
        assert!(text.contains("2. Rajesh Kumar\n"));
        assert!(text.ends_with("Contact them directly for your job requirements."));
    }

    #[test]
    fn test_profile_availability_label() {
        let mut p = provider();
        p.available = false;
        let text = profile(&ProfileView::Provider(p));
        assert!(text.contains("Status: Not Available\n"));
        assert!(profile(&ProfileView::NotFound).starts_with("No Profile Found"));
    }

    #[test]
    fn test_job_posting_texts() {
        assert!(job_posting(&JobPosting::SeekerRequired).contains("register as job seeker first"));

        let request = JobRequest {
            id: 1,
            seeker_id: "c1".into(),
            job_type: "painting".into(),
            description: "two rooms".into(),
            location: "Powai".into(),
            status: JobStatus::Open,
            created_at: Utc::now(),
        };
        assert!(job_posting(&JobPosting::Posted(request)).contains("Status: Open\n"));
    }

    #[test]
    fn test_browse_header_and_empty() {
        let page = BrowsePage { providers: vec![provider()], total_available: 5 };
        assert!(browse(&page).starts_with("Available Job Providers (1 of 5):"));

        let page = BrowsePage { providers: vec![], total_available: 5 };
        assert_eq!(browse(&page), "No job providers found with current filters. Total available: 5");
    }

    #[test]
    fn test_stats_sections() {
        let report = MarketStats {
            total_providers: 5,
            available_providers: 5,
            cities: vec![("Mumbai".into(), 3)],
            top_services: vec![("plumber".into(), 2)],
            ..Default::default()
        };
        let text = stats(&report);
        assert!(text.contains("Total Job Providers: 5\n"));
        assert!(text.contains("CITIES COVERED:\nMumbai: 3 providers\n"));
        assert!(text.contains("TOP SERVICES:\nplumber: 2 providers\n"));
    }
}
