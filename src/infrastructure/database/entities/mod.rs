//! Database entities module

pub mod crustacean;

pub use crustacean::Entity as Crustacean;
