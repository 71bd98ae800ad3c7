//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! The state holds exactly three things: the in-memory assessment
//! repository, the optional Postgres pool behind it, and the server
//! configuration. Reads are always served from the repository; the pool
//! only comes into play on writes (write-through) and at startup
//! (hydration).

use rampart_store::AssessmentRepository;
use sqlx::PgPool;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// Shared application state. Cheap to clone; all clones observe the same
/// repository.
#[derive(Debug, Clone)]
pub struct AppState {
    /// In-memory assessment repository every request is served from.
    pub assessments: AssessmentRepository,

    /// PostgreSQL connection pool for durable persistence.
    /// When `Some`, writes go through to the `assessments` table in addition
    /// to the repository. When `None`, the API operates in-memory only.
    pub db_pool: Option<PgPool>,

    /// Server configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Create application state with default configuration and no database.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    /// Create application state with the given configuration and optional
    /// database pool.
    pub fn with_config(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        Self {
            assessments: AssessmentRepository::new(),
            db_pool,
            config,
        }
    }

    /// Hydrate the in-memory repository from the database.
    ///
    /// Called once on startup when a database pool is available. Loads every
    /// persisted assessment document into the repository so that read
    /// operations remain fast and synchronous. A no-op without a pool.
    pub async fn hydrate_from_db(&self) -> Result<(), String> {
        let pool = match &self.db_pool {
            Some(pool) => pool,
            None => return Ok(()),
        };

        let documents = crate::db::assessments::load_all(pool)
            .await
            .map_err(|e| format!("failed to load assessments: {e}"))?;
        let assessment_count = documents.len();
        for document in documents {
            self.assessments.restore(document);
        }

        tracing::info!(
            assessments = assessment_count,
            "Hydrated in-memory repository from database"
        );

        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
