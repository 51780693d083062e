//! Crustacean catalogue module: CRUD over `/api/crustaceans`

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
