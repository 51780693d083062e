pub mod crustacean;

// Re-export commonly used types
pub use crustacean::{
    Crustacean, CrustaceanChanges, CrustaceanFilter, CrustaceanRepository, NewCrustacean,
    DEFAULT_GROUP,
};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::{DomainError, DomainResult};
