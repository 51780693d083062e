pub mod shutdown;
pub mod sum;
pub mod types;

pub use shutdown::*;
pub use types::*;
