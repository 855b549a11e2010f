//! SQLite storage implementation

use std::path::Path;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use rusqlite::types::Value;
use crate::Result;
use crate::model::{
    JobRequest, JobStatus, NewJobRequest, NewProvider, NewSeeker, Provider, ProviderFilter, Seeker,
};
use super::{schema, seed, BootstrapMode, MarketStore};

const PROVIDER_COLUMNS: &str =
    "id, user_id, name, phone, skills, location, city, experience, rate, available, created_at";
const SEEKER_COLUMNS: &str = "id, user_id, name, phone, location, city, created_at";

/// SQLite-backed storage for the marketplace
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist) and bootstrap it
    pub fn open(path: &Path, mode: BootstrapMode) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.bootstrap(mode)?;
        Ok(store)
    }

    /// Open a freshly seeded in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.bootstrap(BootstrapMode::Reset)?;
        Ok(store)
    }

    /// Prepare the schema according to `mode` and insert seed data.
    ///
    /// `Reset` discards every existing table first. Schema changes and seed
    /// rows commit together or not at all.
    pub fn bootstrap(&self, mode: BootstrapMode) -> Result<()> {
        self.bootstrap_with(mode, &seed::seed_providers())
    }

    fn bootstrap_with(&self, mode: BootstrapMode, seeds: &[NewProvider]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        if mode == BootstrapMode::Reset {
            for stmt in schema::DROP_TABLES {
                tx.execute(stmt, [])?;
            }
        }
        for stmt in schema::all_schema_statements() {
            tx.execute(stmt, [])?;
        }

        let existing: i64 = tx.query_row("SELECT COUNT(*) FROM job_providers", [], |row| row.get(0))?;
        if mode == BootstrapMode::Reset || existing == 0 {
            for provider in seeds {
                insert_provider_row(&tx, provider)?;
            }
        }
        tx.commit()?;

        tracing::debug!("Bootstrapped database (mode: {})", mode);
        Ok(())
    }

    /// Drop all data and restore the seed set
    pub fn reset(&self) -> Result<()> {
        self.bootstrap(BootstrapMode::Reset)
    }

    fn count(&self, sql: &str) -> Result<usize> {
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Helper to convert a row to a Provider
    fn row_to_provider(row: &rusqlite::Row) -> rusqlite::Result<Provider> {
        Ok(Provider {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            name: row.get("name")?,
            phone: row.get("phone")?,
            skills: row.get("skills")?,
            location: row.get("location")?,
            city: row.get("city")?,
            experience: row.get("experience")?,
            rate: row.get("rate")?,
            available: row.get("available")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Helper to convert a row to a Seeker
    fn row_to_seeker(row: &rusqlite::Row) -> rusqlite::Result<Seeker> {
        Ok(Seeker {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            name: row.get("name")?,
            phone: row.get("phone")?,
            location: row.get("location")?,
            city: row.get("city")?,
            created_at: row.get("created_at")?,
        })
    }
}

impl MarketStore for SqliteStore {
    // ========== Provider Operations ==========

    fn find_provider(&self, user_id: &str) -> Result<Option<Provider>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM job_providers WHERE user_id = ?1", PROVIDER_COLUMNS),
                [user_id],
                Self::row_to_provider,
            )
            .optional()
            .map_err(Into::into)
    }

    fn insert_provider(&self, provider: &NewProvider) -> Result<Provider> {
        insert_provider_row(&self.conn, provider)
    }

    fn search_providers(&self, filter: &ProviderFilter) -> Result<Vec<Provider>> {
        let mut sql = format!("SELECT {} FROM job_providers WHERE available = 1", PROVIDER_COLUMNS);
        let mut values: Vec<Value> = Vec::new();

        if let Some(skills) = &filter.skills {
            sql.push_str(" AND skills LIKE ?");
            values.push(Value::Text(format!("%{}%", skills)));
        }
        if let Some(city) = &filter.city {
            sql.push_str(" AND city LIKE ?");
            values.push(Value::Text(format!("%{}%", city)));
        }
        sql.push_str(" ORDER BY id DESC LIMIT ?");
        values.push(Value::Integer(filter.limit as i64));

        let mut stmt = self.conn.prepare(&sql)?;
        let providers = stmt
            .query_map(params_from_iter(values), Self::row_to_provider)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(providers)
    }

    // ========== Seeker Operations ==========

    fn find_seeker(&self, user_id: &str) -> Result<Option<Seeker>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM job_seekers WHERE user_id = ?1", SEEKER_COLUMNS),
                [user_id],
                Self::row_to_seeker,
            )
            .optional()
            .map_err(Into::into)
    }

    fn insert_seeker(&self, seeker: &NewSeeker) -> Result<Seeker> {
        let created_at = Utc::now();
        self.conn.execute(
            r#"
            INSERT INTO job_seekers (user_id, name, phone, location, city, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                seeker.user_id,
                seeker.name,
                seeker.phone,
                seeker.location,
                seeker.city,
                created_at,
            ],
        )?;

        Ok(Seeker {
            id: self.conn.last_insert_rowid(),
            user_id: seeker.user_id.clone(),
            name: seeker.name.clone(),
            phone: seeker.phone.clone(),
            location: seeker.location.clone(),
            city: seeker.city.clone(),
            created_at,
        })
    }

    // ========== Job Request Operations ==========

    fn insert_job_request(&self, request: &NewJobRequest) -> Result<JobRequest> {
        let created_at = Utc::now();
        let status = JobStatus::Open;
        self.conn.execute(
            r#"
            INSERT INTO job_requests (seeker_id, job_type, description, location, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                request.seeker_id,
                request.job_type,
                request.description,
                request.location,
                status.as_str(),
                created_at,
            ],
        )?;

        Ok(JobRequest {
            id: self.conn.last_insert_rowid(),
            seeker_id: request.seeker_id.clone(),
            job_type: request.job_type.clone(),
            description: request.description.clone(),
            location: request.location.clone(),
            status,
            created_at,
        })
    }

    fn count_job_requests_for(&self, seeker_id: &str) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM job_requests WHERE seeker_id = ?1",
            [seeker_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    // ========== Aggregates ==========

    fn count_providers(&self) -> Result<usize> {
        self.count("SELECT COUNT(*) FROM job_providers")
    }

    fn count_available_providers(&self) -> Result<usize> {
        self.count("SELECT COUNT(*) FROM job_providers WHERE available = 1")
    }

    fn count_seekers(&self) -> Result<usize> {
        self.count("SELECT COUNT(*) FROM job_seekers")
    }

    fn count_job_requests(&self, status: Option<JobStatus>) -> Result<usize> {
        match status {
            Some(status) => {
                let count: i64 = self.conn.query_row(
                    "SELECT COUNT(*) FROM job_requests WHERE status = ?1",
                    [status.as_str()],
                    |row| row.get(0),
                )?;
                Ok(count as usize)
            }
            None => self.count("SELECT COUNT(*) FROM job_requests"),
        }
    }

    fn providers_per_city(&self) -> Result<Vec<(String, usize)>> {
        let mut stmt = self.conn.prepare(
            "SELECT city, COUNT(*) AS n FROM job_providers GROUP BY city ORDER BY n DESC, city ASC",
        )?;

        let cities = stmt
            .query_map([], |row| {
                let city: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((city, count as usize))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(cities)
    }

    fn all_provider_skills(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT skills FROM job_providers ORDER BY id")?;
        let skills = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(skills)
    }
}

/// Insert one provider through `conn`, which may be an open transaction
fn insert_provider_row(conn: &Connection, provider: &NewProvider) -> Result<Provider> {
    let created_at = Utc::now();
    conn.execute(
        r#"
        INSERT INTO job_providers (user_id, name, phone, skills, location, city, experience, rate, available, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        "#,
        params![
            provider.user_id,
            provider.name,
            provider.phone,
            provider.skills,
            provider.location,
            provider.city,
            provider.experience,
            provider.rate,
            true,
            created_at,
        ],
    )?;

    Ok(Provider {
        id: conn.last_insert_rowid(),
        user_id: provider.user_id.clone(),
        name: provider.name.clone(),
        phone: provider.phone.clone(),
        skills: provider.skills.clone(),
        location: provider.location.clone(),
        city: provider.city.clone(),
        experience: provider.experience.clone(),
        rate: provider.rate.clone(),
        available: true,
        created_at,
    })
}
