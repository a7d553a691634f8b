//! Page-based slicing of filtered collections.

use serde::{Deserialize, Serialize};

use crate::query::filter::EntityFilter;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// 1-based page request. Zero values fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl Pagination {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    pub fn applied_page(&self) -> u32 {
        match self.page {
            Some(0) | None => DEFAULT_PAGE,
            Some(page) => page,
        }
    }

    pub fn applied_page_size(&self) -> u32 {
        match self.page_size {
            Some(0) | None => DEFAULT_PAGE_SIZE,
            Some(size) => size,
        }
    }
}

/// One page of results plus the counts a pager needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Filtered count before slicing.
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

/// Filters `items`, then returns the requested page of the survivors.
pub fn query<T, F>(items: &[T], filter: &F, pagination: Pagination) -> Page<T>
where
    T: Clone,
    F: EntityFilter<T> + ?Sized,
{
    let matched: Vec<&T> = items.iter().filter(|item| filter.matches(item)).collect();
    let total = matched.len();
    let page = pagination.applied_page();
    let page_size = pagination.applied_page_size();

    let size = page_size as usize;
    let total_pages = u32::try_from(total.div_ceil(size)).unwrap_or(u32::MAX);
    let start = (page as usize - 1).saturating_mul(size);

    let items = matched
        .into_iter()
        .skip(start)
        .take(size)
        .cloned()
        .collect();

    Page {
        items,
        total,
        page,
        page_size,
        total_pages,
    }
}
