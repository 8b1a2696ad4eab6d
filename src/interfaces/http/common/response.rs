//! Response envelope shared by every handler

use serde::{Deserialize, Serialize};

use crate::shared::validations::validate_pagination;

/// Standard success wrapper
///
/// Success bodies look like `{"success": true, "message": "...", ...payload}`:
/// the payload's fields are inlined next to `success` and `message`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

impl ApiResponse<EmptyData> {
    pub fn message(message: impl Into<String>) -> Self {
        Self::success(message, EmptyData {})
    }
}

/// Empty payload for operations without return data
#[derive(Debug, Serialize, Deserialize)]
pub struct EmptyData {}

/// `?page=&limit=` for listings
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PaginationParams {
    /// `(page, limit)` clamped to the accepted bounds
    pub fn resolve(&self) -> (u64, u64) {
        validate_pagination(self.page, self.limit)
    }
}

/// Page metadata inlined next to a listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}
