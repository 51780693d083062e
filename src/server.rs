//! Reusable Crustaceans API server runtime.
//!
//! [`ServerHandle`] owns the server lifecycle: metrics recorder, database
//! connection, migrations, seeding, the REST API and graceful shutdown.
//! Both the library binary and the CLI start the service through it.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::{DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::application::CrustaceanService;
use crate::config::AppConfig;
use crate::domain::{CrustaceanRepository, DomainError};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::seed::seed_if_empty;
use crate::infrastructure::{init_database, DatabaseConfig, SeaOrmCrustaceanRepository};
use crate::interfaces::create_api_router;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to install Prometheus recorder: {0}")]
    Metrics(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Failed to seed database: {0}")]
    Seed(#[from] DomainError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the Crustaceans API.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Insert sample species into an empty table (default: true).
    pub seed: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            seed: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running Crustaceans API.
///
/// ```rust,no_run
/// use crustacea::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Catalogue service backing the API.
    pub service: Arc<CrustaceanService>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the API is actually bound to (resolves port 0).
    pub local_addr: SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

/// The global metrics recorder can only be installed once per process;
/// a restart within the same process reuses it.
fn prometheus_handle() -> Result<PrometheusHandle, StartupError> {
    static PROM_HANDLE: Mutex<Option<PrometheusHandle>> = Mutex::new(None);

    let mut slot = PROM_HANDLE
        .lock()
        .map_err(|_| StartupError::Metrics("recorder lock poisoned".into()))?;
    if let Some(handle) = slot.as_ref() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| StartupError::Metrics(e.to_string()))?;
    info!("Prometheus metrics recorder installed");
    *slot = Some(handle.clone());
    Ok(handle)
}

impl ServerHandle {
    /// Start the API with the given options.
    ///
    /// 1. Install the Prometheus recorder
    /// 2. Connect to the database and run migrations (if enabled)
    /// 3. Seed an empty table (if enabled)
    /// 4. Bind and serve the REST API
    pub async fn start(opts: ServerOptions) -> Result<Self, StartupError> {
        let app_cfg = opts.config;

        info!("Starting Crustaceans API...");

        let prometheus_handle = prometheus_handle()?;

        // ── Database ───────────────────────────────────────────
        let db_config = DatabaseConfig::from(&app_cfg.database);
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        // ── Repository & Service ───────────────────────────────
        let repo: Arc<dyn CrustaceanRepository> =
            Arc::new(SeaOrmCrustaceanRepository::new(db.clone()));

        if opts.seed && app_cfg.seed.enabled {
            seed_if_empty(repo.as_ref()).await?;
        }

        let service = Arc::new(CrustaceanService::new(repo));

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(service.clone(), db.clone(), prometheus_handle);

        let api_addr = app_cfg.listen_address();
        let listener = tokio::net::TcpListener::bind(&api_addr)
            .await
            .map_err(|source| StartupError::Bind {
                addr: api_addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| StartupError::Bind {
            addr: api_addr.clone(),
            source,
        })?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_server = axum::serve(listener, api_router.into_make_service())
            .with_graceful_shutdown(async move {
                shutdown_signal.wait().await;
                info!("REST API server received shutdown signal");
            });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            service,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop, then close the connection pool.
    ///
    /// In-flight requests get the configured shutdown timeout; after that
    /// the server task is aborted.
    pub async fn wait(self) {
        info!("Waiting for in-flight requests to complete...");

        let timeout = self.shutdown.timeout();
        let mut api_task = self.api_task;
        match tokio::time::timeout(timeout, &mut api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => {
                warn!("Shutdown timed out after {:?}, aborting server", timeout);
                api_task.abort();
            }
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Crustaceans API shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down Crustaceans API...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Initialize tracing (logging) from the application config.
///
/// `RUST_LOG` wins over `logging.level`. Call once at process startup,
/// before [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
