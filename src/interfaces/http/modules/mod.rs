pub mod crustaceans;
pub mod health;
pub mod metrics;
pub mod request_id;
