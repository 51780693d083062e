//! Storage implementations outside the SQL database

mod memory;

pub use memory::InMemoryCrustaceanRepository;
