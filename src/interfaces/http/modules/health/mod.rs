//! Liveness probe and API index

pub mod handlers;

pub use handlers::*;
