//! Sample providers inserted at bootstrap

use crate::model::NewProvider;

/// (user_id, name, phone, skills, location, city, experience, rate)
const SEED_PROVIDERS: &[(&str, &str, &str, &str, &str, &str, &str, &str)] = &[
    ("provider_001", "Rajesh Kumar", "9876543210", "plumber bathroom repair pipe fixing", "Andheri West", "Mumbai", "5 years", "500 per day"),
    ("provider_002", "Suresh Patel", "9876543211", "electrician wiring ac repair", "Bandra East", "Mumbai", "3 years", "400 per day"),
    ("provider_003", "Amit Sharma", "9876543212", "painter wall painting interior", "Powai", "Mumbai", "7 years", "600 per day"),
    ("provider_004", "Ramesh Yadav", "9876543213", "plumber pipeline bathroom fitting", "Hitech City", "Hyderabad", "6 years", "550 per day"),
    ("provider_005", "Krishna Reddy", "9876543214", "electrician home wiring electrical", "Gachibowli", "Hyderabad", "8 years", "700 per day"),
];

/// The fixed seed set, in insertion order. All seed providers are available.
pub fn seed_providers() -> Vec<NewProvider> {
    SEED_PROVIDERS
        .iter()
        .map(|&(user_id, name, phone, skills, location, city, experience, rate)| {
            NewProvider::new(user_id, name, phone, skills, location, city)
                .with_experience(experience)
                .with_rate(rate)
        })
        .collect()
}
