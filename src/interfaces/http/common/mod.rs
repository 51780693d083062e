//! Building blocks shared by every HTTP module

pub mod api_response;
pub mod error;
pub mod validated_json;

pub use api_response::ApiResponse;
pub use error::{ApiError, ApiResult};
pub use validated_json::ValidatedJson;
