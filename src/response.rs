//! Response shapes: paged list envelope and status helpers.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: i64,
}

impl PaginationMeta {
    /// `total_pages` is at least 1, even for an empty result.
    pub fn new(total: i64, page: u32, page_size: u32) -> Self {
        let size = i64::from(page_size.max(1));
        let total = total.max(0);
        PaginationMeta {
            total,
            page,
            page_size,
            total_pages: ((total + size - 1) / size).max(1),
        }
    }
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}
