//! Shared HTTP plumbing: response envelope, error mapping, extractors

pub mod error;
pub mod response;
pub mod validated_json;

pub use error::{status_for, ApiError, ApiResult, ErrorBody};
pub use response::{ApiResponse, EmptyData, PageMeta, PaginationParams};
pub use validated_json::ValidatedJson;
