//! Read-side query pipeline.
//!
//! Every function here is a pure transformation over a
//! [`snapshot`](crate::RecordStore::snapshot); nothing touches the store or
//! its lock. The "list" operation composes the stages in a fixed order:
//!
//! 1. **Type filter** ([`filter::by_type`])
//! 2. **Free-text search** ([`filter::by_search`])
//! 3. **Pagination** ([`page::paginate`])
//!
//! The remaining views ([`filter`], [`range`], [`stats`]) each operate on a
//! fresh snapshot and return a bare sequence or a summary.

pub mod filter;
pub mod page;
pub mod range;
pub mod stats;

pub use page::{Page, PageRequest, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use range::{SizeRange, SpawnRange};
pub use stats::Stats;

use crate::record::Pokemon;

/// Parameters of the list operation. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Keep records carrying this type tag (case-insensitive).
    pub type_filter: Option<String>,
    /// Keep records whose name or number contains this text.
    pub search: Option<String>,
    /// Which slice of the filtered result to return.
    pub page: PageRequest,
}

/// Runs type filter, then search, then pagination.
#[must_use]
pub fn list(records: Vec<Pokemon>, query: &ListQuery) -> Page<Pokemon> {
    let mut records = records;
    if let Some(tag) = non_empty(query.type_filter.as_deref()) {
        records = filter::by_type(records, tag);
    }
    if let Some(text) = non_empty(query.search.as_deref()) {
        records = filter::by_search(records, text);
    }
    page::paginate(records, query.page)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
