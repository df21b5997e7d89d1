use serde::Deserialize;
use utoipa::IntoParams;

const DEFAULT_PAGE_SIZE: u64 = 20;
const MAX_PAGE_SIZE: u64 = 100;

/// Zero-based page selection
#[derive(Debug, Deserialize, IntoParams)]
pub struct PaginationParams {
    #[param(default = 0, minimum = 0)]
    pub page: Option<u64>,
    #[param(default = 20, minimum = 1, maximum = 100)]
    pub size: Option<u64>,
}

impl PaginationParams {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(0)
    }

    pub fn size(&self) -> u64 {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }
}

/// Number of pages needed to hold `total` items
pub fn total_pages(total: u64, size: u64) -> u64 {
    total.div_ceil(size.max(1))
}
