//! Database schema definitions

/// SQL to create the job_providers table
pub const CREATE_PROVIDERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS job_providers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT UNIQUE NOT NULL,
    name TEXT NOT NULL,
    phone TEXT NOT NULL,
    skills TEXT NOT NULL,
    location TEXT NOT NULL,
    city TEXT NOT NULL,
    experience TEXT NOT NULL,
    rate TEXT NOT NULL,
    available INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL
)
"#;

/// SQL to create the job_seekers table
pub const CREATE_SEEKERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS job_seekers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT UNIQUE NOT NULL,
    name TEXT NOT NULL,
    phone TEXT NOT NULL,
    location TEXT NOT NULL,
    city TEXT NOT NULL,
    created_at TEXT NOT NULL
)
"#;

/// SQL to create the job_requests table
/// `seeker_id` holds a seeker's user id; it is not a foreign key
pub const CREATE_REQUESTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS job_requests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    seeker_id TEXT NOT NULL,
    job_type TEXT NOT NULL,
    description TEXT NOT NULL,
    location TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'open',
    created_at TEXT NOT NULL
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_providers_city ON job_providers(city)",
    "CREATE INDEX IF NOT EXISTS idx_providers_available ON job_providers(available)",
    "CREATE INDEX IF NOT EXISTS idx_requests_seeker ON job_requests(seeker_id)",
    "CREATE INDEX IF NOT EXISTS idx_requests_status ON job_requests(status)",
];

/// SQL to drop every table (destructive bootstrap)
pub const DROP_TABLES: &[&str] = &[
    "DROP TABLE IF EXISTS job_providers",
    "DROP TABLE IF EXISTS job_seekers",
    "DROP TABLE IF EXISTS job_requests",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_PROVIDERS_TABLE,
        CREATE_SEEKERS_TABLE,
        CREATE_REQUESTS_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
