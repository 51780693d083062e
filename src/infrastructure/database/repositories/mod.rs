//! Database repository implementations

pub mod crustacean_repository;

pub use crustacean_repository::SeaOrmCrustaceanRepository;
