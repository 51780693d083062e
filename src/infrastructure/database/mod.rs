pub mod entities;
pub mod migrator;
pub mod repositories;
pub mod seed;

use std::path::PathBuf;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://data/crustaceans.db?mode=rwc")
    pub url: String,
    /// Upper bound of pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::sqlite("data/crustaceans.db")
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            max_connections: 5,
        }
    }

    /// Path of the backing SQLite file, if the URL names one.
    pub fn sqlite_file(&self) -> Option<PathBuf> {
        let rest = self.url.strip_prefix("sqlite://").or_else(|| self.url.strip_prefix("sqlite:"))?;
        let path = rest.split('?').next().unwrap_or_default();
        if path.is_empty() || path.contains(":memory:") || path == "memory" {
            return None;
        }
        Some(PathBuf::from(path))
    }
}

/// Initialize database connection.
///
/// Creates the directory holding the SQLite file when it does not exist yet.
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    if let Some(parent) = config.sqlite_file().as_deref().and_then(|p| p.parent()) {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DbErr::Custom(format!("Failed to create {}: {}", parent.display(), e))
            })?;
            info!("Created data directory {}", parent.display());
        }
    }

    info!("Connecting to database: {}", config.url);
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging_level(log::LevelFilter::Debug);
    let db = Database::connect(options).await?;
    info!("Database connected successfully");
    Ok(db)
}

#[cfg(test)]
pub(crate) mod test_support {
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};
    use sea_orm_migration::MigratorTrait;

    use super::migrator::Migrator;

    /// Fresh, migrated in-memory SQLite database.
    ///
    /// Pinned to a single connection: every SQLite `:memory:` connection is
    /// its own database.
    pub async fn memory_database() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_file_is_extracted_from_url() {
        let config = DatabaseConfig::sqlite("data/crustaceans.db");
        assert_eq!(config.url, "sqlite://data/crustaceans.db?mode=rwc");
        assert_eq!(config.sqlite_file(), Some(PathBuf::from("data/crustaceans.db")));
    }

    #[test]
    fn memory_urls_have_no_file() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".into(),
            max_connections: 1,
        };
        assert_eq!(config.sqlite_file(), None);
    }

    #[test]
    fn non_sqlite_urls_have_no_file() {
        let config = DatabaseConfig {
            url: "postgres://localhost/crustaceans".into(),
            max_connections: 1,
        };
        assert_eq!(config.sqlite_file(), None);
    }
}
