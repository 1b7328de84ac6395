//! Postgres repository implementation using Diesel.
//!
//! This module implements the repository traits against a Postgres database.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Connection health monitoring
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::task;

use crate::api::{
    Consultation, ConsultationId, ConsultationUpdate, NewConsultation, NewPatient, Patient,
    PatientId, PatientUpdate,
};
use crate::db::repository::{
    ConnectionCheck, ConsultationRepository, ErrorContext, PatientRepository, RepositoryError,
    RepositoryResult,
};

mod models;
mod schema;

use models::*;
use schema::{consultations, patients};

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// `DATABASE_URL` (or `PG_DATABASE_URL`) is required; pool and retry
    /// settings fall back to their defaults when unset.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let max_pool_size = std::env::var("PG_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let min_pool_size = std::env::var("PG_POOL_MIN")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(1);

        let connection_timeout_sec = std::env::var("PG_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let idle_timeout_sec = std::env::var("PG_IDLE_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(600);

        let max_retries = std::env::var("PG_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(3);

        let retry_delay_ms = std::env::var("PG_RETRY_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(100);

        Ok(Self {
            database_url,
            max_pool_size,
            min_pool_size,
            connection_timeout_sec,
            idle_timeout_sec,
            max_retries,
            retry_delay_ms,
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Total number of connections in the pool
    pub total_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total successful queries executed
    pub total_queries: u64,
    /// Total failed queries
    pub failed_queries: u64,
    /// Total retried operations
    pub retried_operations: u64,
}

/// Diesel-backed repository for Postgres.
///
/// This repository implementation provides:
/// - Connection pooling with configurable limits
/// - Automatic retry for transient failures
/// - Health monitoring and statistics
/// - Automatic schema migrations
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
    // Metrics counters
    total_queries: std::sync::Arc<AtomicU64>,
    failed_queries: std::sync::Arc<AtomicU64>,
    retried_operations: std::sync::Arc<AtomicU64>,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true) // Validate connections before use
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        // Run migrations once during initialization
        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self {
            pool,
            config,
            total_queries: std::sync::Arc::new(AtomicU64::new(0)),
            failed_queries: std::sync::Arc::new(AtomicU64::new(0)),
            retried_operations: std::sync::Arc::new(AtomicU64::new(0)),
        })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Execute a database operation with automatic retry for transient failures.
    ///
    /// This method will retry the operation up to `max_retries` times if a
    /// retryable error occurs (connection errors, serialization failures).
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();
        let retried_operations = self.retried_operations.clone();

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    retried_operations.fetch_add(1, Ordering::Relaxed);
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2; // Exponential backoff
                }

                // Get connection
                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1))
                                .retryable(),
                        );
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(err);
                    }
                };

                // Execute the operation
                total_queries.fetch_add(1, Ordering::Relaxed);
                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => {
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(e);
                    }
                }
            }

            failed_queries.fetch_add(1, Ordering::Relaxed);
            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }

    /// Get pool health statistics.
    ///
    /// Returns current pool state and query statistics for monitoring.
    pub fn get_pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            total_connections: state.connections,
            max_size: self.config.max_pool_size,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
            retried_operations: self.retried_operations.load(Ordering::Relaxed),
        }
    }

    /// Check if the database connection is healthy.
    pub async fn is_healthy(&self) -> bool {
        self.health_check().await.unwrap_or(false)
    }

    /// Get detailed health information.
    ///
    /// Returns a tuple of (is_healthy, latency_ms, error_message).
    pub async fn health_check_detailed(&self) -> (bool, Option<u64>, Option<String>) {
        let start = Instant::now();
        match self.health_check().await {
            Ok(true) => (true, Some(start.elapsed().as_millis() as u64), None),
            Ok(false) => (
                false,
                Some(start.elapsed().as_millis() as u64),
                Some("Health check returned false".to_string()),
            ),
            Err(e) => (
                false,
                Some(start.elapsed().as_millis() as u64),
                Some(e.to_string()),
            ),
        }
    }
}

fn row_to_patient(row: PatientRow) -> Patient {
    Patient {
        id: PatientId::new(row.id),
        name: row.name,
        telephone: row.telephone,
    }
}

fn row_to_consultation(row: ConsultationRow) -> Consultation {
    Consultation {
        id: ConsultationId::new(row.id),
        date: row.date,
        hour: row.hour,
        patient_id: PatientId::new(row.patient_id),
        specialty: row.specialty,
    }
}

#[async_trait]
impl ConnectionCheck for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map_err(RepositoryError::from)?;
            Ok(true)
        })
        .await
    }
}

// ==================== Patient Repository ====================

#[async_trait]
impl PatientRepository for PostgresRepository {
    async fn create_patient(&self, input: &NewPatient) -> RepositoryResult<Patient> {
        let new_row = NewPatientRow {
            name: input.name.clone(),
            telephone: input.telephone.clone(),
        };

        let row = self
            .with_conn(move |conn| {
                diesel::insert_into(patients::table)
                    .values(&new_row)
                    .get_result::<PatientRow>(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;

        debug!("Inserted patient id={}", row.id);
        Ok(row_to_patient(row))
    }

    async fn get_all_patients(&self) -> RepositoryResult<Vec<Patient>> {
        let rows = self
            .with_conn(|conn| {
                patients::table
                    .order(patients::id.asc())
                    .load::<PatientRow>(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;

        Ok(rows.into_iter().map(row_to_patient).collect())
    }

    async fn get_patient_by_id(&self, id: PatientId) -> RepositoryResult<Option<Patient>> {
        let row = self
            .with_conn(move |conn| {
                patients::table
                    .find(id.value())
                    .first::<PatientRow>(conn)
                    .optional()
                    .map_err(RepositoryError::from)
            })
            .await?;

        Ok(row.map(row_to_patient))
    }

    async fn get_patient_by_telephone(
        &self,
        telephone: &str,
    ) -> RepositoryResult<Option<Patient>> {
        let telephone = telephone.to_string();
        let row = self
            .with_conn(move |conn| {
                patients::table
                    .filter(patients::telephone.eq(&telephone))
                    .order(patients::id.asc())
                    .first::<PatientRow>(conn)
                    .optional()
                    .map_err(RepositoryError::from)
            })
            .await?;

        Ok(row.map(row_to_patient))
    }

    async fn update_patient(
        &self,
        id: PatientId,
        update: &PatientUpdate,
    ) -> RepositoryResult<Patient> {
        // Diesel rejects an all-None changeset, so an empty update degenerates
        // to a read of the current row.
        if update.is_empty() {
            return self
                .get_patient_by_id(id)
                .await?
                .ok_or_else(|| patient_missing(id, "update_patient"));
        }

        let changes = PatientChangeset {
            name: update.name.clone(),
            telephone: update.telephone.clone(),
        };

        let row = self
            .with_conn(move |conn| {
                diesel::update(patients::table.find(id.value()))
                    .set(&changes)
                    .get_result::<PatientRow>(conn)
                    .optional()
                    .map_err(RepositoryError::from)?
                    .ok_or_else(|| patient_missing(id, "update_patient"))
            })
            .await?;

        Ok(row_to_patient(row))
    }

    async fn delete_patient(&self, id: PatientId) -> RepositoryResult<u64> {
        let deleted = self
            .with_conn(move |conn| {
                diesel::delete(patients::table.find(id.value()))
                    .execute(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;

        debug!("Deleted {} patient row(s) for id={}", deleted, id);
        Ok(deleted as u64)
    }
}

// ==================== Consultation Repository ====================

#[async_trait]
impl ConsultationRepository for PostgresRepository {
    async fn create_consultation(
        &self,
        input: &NewConsultation,
    ) -> RepositoryResult<Consultation> {
        let new_row = NewConsultationRow {
            date: input.date.clone(),
            hour: input.hour.clone(),
            patient_id: input.patient_id,
            specialty: input.specialty.clone(),
        };

        let row = self
            .with_conn(move |conn| {
                diesel::insert_into(consultations::table)
                    .values(&new_row)
                    .get_result::<ConsultationRow>(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;

        debug!("Inserted consultation id={}", row.id);
        Ok(row_to_consultation(row))
    }

    async fn get_all_consultations(&self) -> RepositoryResult<Vec<Consultation>> {
        let rows = self
            .with_conn(|conn| {
                consultations::table
                    .order(consultations::id.asc())
                    .load::<ConsultationRow>(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;

        Ok(rows.into_iter().map(row_to_consultation).collect())
    }

    async fn get_consultation_by_id(
        &self,
        id: ConsultationId,
    ) -> RepositoryResult<Option<Consultation>> {
        let row = self
            .with_conn(move |conn| {
                consultations::table
                    .find(id.value())
                    .first::<ConsultationRow>(conn)
                    .optional()
                    .map_err(RepositoryError::from)
            })
            .await?;

        Ok(row.map(row_to_consultation))
    }

    async fn get_consultations_by_date(
        &self,
        date: &str,
        hour: &str,
    ) -> RepositoryResult<Option<Vec<Consultation>>> {
        let date = date.to_string();
        let hour = hour.to_string();

        let rows = self
            .with_conn(move |conn| {
                let mut query = consultations::table
                    .filter(consultations::date.eq(&date))
                    .into_boxed();

                // Empty hour is the wildcard: match every hour on the date.
                if !hour.is_empty() {
                    query = query.filter(consultations::hour.eq(&hour));
                }

                query
                    .order(consultations::id.asc())
                    .load::<ConsultationRow>(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;

        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(rows.into_iter().map(row_to_consultation).collect()))
    }

    async fn update_consultation(
        &self,
        id: ConsultationId,
        update: &ConsultationUpdate,
    ) -> RepositoryResult<Consultation> {
        if update.is_empty() {
            return self
                .get_consultation_by_id(id)
                .await?
                .ok_or_else(|| consultation_missing(id, "update_consultation"));
        }

        let changes = ConsultationChangeset {
            date: update.date.clone(),
            hour: update.hour.clone(),
            patient_id: update.patient_id,
            specialty: update.specialty.clone(),
        };

        let row = self
            .with_conn(move |conn| {
                diesel::update(consultations::table.find(id.value()))
                    .set(&changes)
                    .get_result::<ConsultationRow>(conn)
                    .optional()
                    .map_err(RepositoryError::from)?
                    .ok_or_else(|| consultation_missing(id, "update_consultation"))
            })
            .await?;

        Ok(row_to_consultation(row))
    }

    async fn delete_consultation(&self, id: ConsultationId) -> RepositoryResult<u64> {
        let deleted = self
            .with_conn(move |conn| {
                diesel::delete(consultations::table.find(id.value()))
                    .execute(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;

        debug!("Deleted {} consultation row(s) for id={}", deleted, id);
        Ok(deleted as u64)
    }
}

fn patient_missing(id: PatientId, operation: &str) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("Patient {} not found", id),
        ErrorContext::new(operation)
            .with_entity("patient")
            .with_entity_id(id),
    )
}

fn consultation_missing(id: ConsultationId, operation: &str) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("Consultation {} not found", id),
        ErrorContext::new(operation)
            .with_entity("consultation")
            .with_entity_id(id),
    )
}
