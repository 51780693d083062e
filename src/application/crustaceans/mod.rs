//! Crustacean use-cases

mod service;

pub use service::CrustaceanService;
