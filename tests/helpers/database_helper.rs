//! Test database helper utilities
//!
//! Every test gets its own in-memory SQLite database with the schema applied;
//! file-backed databases live in a temporary directory.

use sqlx::SqlitePool;
use tempfile::TempDir;
use NewsRelay::database::{
    connection::{create_in_memory_pool, create_pool, run_migrations, DatabaseConfig},
    DatabaseService,
};

/// Test database handle
pub struct TestDatabase {
    pub pool: SqlitePool,
    pub service: DatabaseService,
    _dir: Option<TempDir>,
}

impl TestDatabase {
    /// Private in-memory database
    pub async fn new() -> Self {
        let pool = create_in_memory_pool().await.expect("in-memory database");
        Self {
            service: DatabaseService::new(pool.clone()),
            pool,
            _dir: None,
        }
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            service: DatabaseService::new(pool.clone()),
            pool,
            _dir: None,
        }
    }

    /// Database file inside `dir`, created when missing
    pub async fn open_file(dir: &TempDir) -> SqlitePool {
        let url = format!("sqlite://{}", dir.path().join("newsrelay.db").display());
        let pool = create_pool(&DatabaseConfig {
            url,
            ..DatabaseConfig::default()
        })
        .await
        .expect("file database");
        run_migrations(&pool).await.expect("migrations");
        pool
    }

    /// File-backed database in its own temporary directory
    pub async fn new_file() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let pool = Self::open_file(&dir).await;
        Self {
            service: DatabaseService::new(pool.clone()),
            pool,
            _dir: Some(dir),
        }
    }

    /// Count rows in a table
    pub async fn count_records(&self, table: &str) -> i64 {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .expect("count query");
        count.0
    }
}
