pub mod errors;
pub mod pagination;

pub use errors::*;
pub use pagination::{PaginatedResult, PaginationInfo, PaginationParams, PaginationResult};
