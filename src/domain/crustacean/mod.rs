//! Crustacean aggregate
//!
//! Contains the Crustacean entity, write commands, list filters and the
//! repository interface the service depends on.

pub mod model;
pub mod repository;

pub use model::{Crustacean, CrustaceanChanges, CrustaceanFilter, NewCrustacean, DEFAULT_GROUP};
pub use repository::CrustaceanRepository;
