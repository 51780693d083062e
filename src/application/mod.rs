pub mod crustaceans;

// Re-export key types for convenience
pub use crustaceans::CrustaceanService;
