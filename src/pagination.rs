//! Page arithmetic and the paginated response envelope.

use serde::{Deserialize, Serialize};

/// Where a page starts and how many pages exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub total_pages: u64,
    pub offset: u64,
    pub limit: u64,
}

impl Page {
    pub fn meta(&self, total: u64, current_page: u64, count: usize) -> PaginationMeta {
        PaginationMeta {
            total,
            total_pages: self.total_pages,
            current_page,
            per_page: self.limit,
            count: count as u64,
        }
    }
}

/// Split `total_rows` into pages of `page_size` and locate `page_number` (1-based).
///
/// Callers are expected to have rejected non-positive inputs already; a zero
/// page size yields zero pages instead of panicking.
pub fn paginate(total_rows: u64, page_number: u64, page_size: u64) -> Page {
    let mut total_pages = total_rows.checked_div(page_size).unwrap_or(0);
    if total_rows.checked_rem(page_size).unwrap_or(0) != 0 {
        total_pages += 1;
    }

    Page {
        total_pages,
        offset: page_number.saturating_sub(1).saturating_mul(page_size),
        limit: page_size,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub per_page: u64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub pagination: PaginationMeta,
}

/// `{"data": [...], "meta": {"pagination": {...}}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: Meta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: u64, page: Page, current_page: u64) -> Self {
        let pagination = page.meta(total, current_page, data.len());
        Self {
            data,
            meta: Meta { pagination },
        }
    }
}
