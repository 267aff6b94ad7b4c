//! Pagination types for list endpoints.
//!
//! Pages are zero-based with a fixed size; a client only picks which
//! page to read.

use serde::{Deserialize, Serialize};

/// Number of items on every page.
pub const PAGE_SIZE: u64 = 20;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (0-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
}

impl PageRequest {
    /// Create a request for the given zero-based page.
    pub fn new(page: u64) -> Self {
        Self {
            page,
            page_size: PAGE_SIZE,
        }
    }

    /// Build a page request from a raw query value.
    ///
    /// Missing or unparsable values read the first page.
    pub fn from_query(raw: Option<&str>) -> Self {
        let page = raw
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(0);
        Self::new(page)
    }

    /// Number of items to skip.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.page_size)
    }

    /// Maximum number of items to return.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0)
    }
}
