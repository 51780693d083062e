//! # Crustacea
//!
//! Crustacean catalogue REST service on SQLite, plus the `sum_to_n`
//! exercises.
//!
//! ## Architecture
//!
//! - **domain**: Crustacean entity, filters and the repository trait
//! - **application**: Catalogue service (uniqueness, pagination)
//! - **infrastructure**: SeaORM/SQLite persistence and an in-memory store
//! - **interfaces**: axum REST API with Swagger documentation
//! - **shared**: Error taxonomy, pagination calculator, shutdown, `sum_to_n`

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmCrustaceanRepository};

// Re-export API router
pub use interfaces::create_api_router;

pub use shared::sum::{sum_to_n_a, sum_to_n_b, sum_to_n_c};
