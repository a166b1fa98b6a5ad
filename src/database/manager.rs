use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::error::ErrorKind;
use sqlx::ConnectOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Query error: {0}")]
    QueryError(String),

    /// A write rejected by a foreign key, NOT NULL, CHECK or UNIQUE constraint
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("Database file error: {0}")]
    Io(#[from] std::io::Error),
}

impl DatabaseError {
    /// Classify a failed write: constraint failures are the caller's fault,
    /// anything else stays a store error
    pub fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if !matches!(db.kind(), ErrorKind::Other) || db.message().contains("constraint failed") {
                return DatabaseError::Constraint(db.message().to_string());
            }
        }
        DatabaseError::Sqlx(err)
    }
}

/// Normalization tables first, then `salaries` which references them.
const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS employment_types (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employment_type VARCHAR(100) UNIQUE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS experience_levels (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        experience_level VARCHAR(100) UNIQUE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS job_titles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        job_title VARCHAR(100) UNIQUE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS locations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        location VARCHAR(100) UNIQUE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS roles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        role VARCHAR(100) UNIQUE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS salaries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        year VARCHAR(100),
        salary_in_usd INTEGER NOT NULL CHECK (salary_in_usd >= 0),
        employment_type INTEGER REFERENCES employment_types(id),
        job_title INTEGER NOT NULL REFERENCES job_titles(id),
        location INTEGER REFERENCES locations(id),
        experience_level INTEGER REFERENCES experience_levels(id),
        created_date DATETIME,
        updated_date DATETIME
    )"#,
];

/// Pool construction and schema bootstrap for the SQLite store
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open a pool for `config.url`, creating the database file and its
    /// parent directory when missing
    pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
        if let Some(path) = Self::database_file(&config.url)? {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            info!("Database file: {}", path.display());
        }

        let mut options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|_| DatabaseError::InvalidDatabaseUrl(config.url.clone()))?
            .create_if_missing(true);
        if !config.enable_query_logging {
            options = options.disable_statement_logging();
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_with(options)
            .await?;

        info!("Created database pool for: {}", config.url);
        Ok(pool)
    }

    /// Single-connection in-memory database with the schema applied.
    /// Every pooled connection to `sqlite::memory:` sees its own database,
    /// so the pool is capped at one connection.
    pub async fn in_memory() -> Result<SqlitePool, DatabaseError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::ensure_schema(&pool).await?;
        Ok(pool)
    }

    /// Create any missing tables. Existing tables are left untouched.
    pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), DatabaseError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(pool).await?;
        }
        Ok(())
    }

    pub async fn health_check(pool: &SqlitePool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// File path behind a `sqlite:` URL, or None for in-memory databases
    fn database_file(url: &str) -> Result<Option<PathBuf>, DatabaseError> {
        let rest = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .ok_or_else(|| DatabaseError::InvalidDatabaseUrl(url.to_string()))?;
        let path = rest.split('?').next().unwrap_or_default();

        if path.is_empty() || path == ":memory:" || url.contains("mode=memory") {
            return Ok(None);
        }
        Ok(Some(PathBuf::from(path)))
    }
}
