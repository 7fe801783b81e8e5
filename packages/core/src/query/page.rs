//! Page-number pagination with a `{total, page, limit, total_pages, data}`
//! envelope.

use serde::Serialize;

/// Page used when none (or a non-positive one) is requested.
pub const DEFAULT_PAGE: usize = 1;
/// Page size used when none (or a non-positive one) is requested.
pub const DEFAULT_LIMIT: usize = 20;

/// A coerced page/limit pair. Both values are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    limit: usize,
}

impl PageRequest {
    /// Builds a request, replacing non-positive values with the defaults.
    #[must_use]
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: positive_or(page, DEFAULT_PAGE),
            limit: positive_or(limit, DEFAULT_LIMIT),
        }
    }

    /// Builds a request from raw query-string values.
    ///
    /// Missing, unparsable and non-positive values fall back to the defaults
    /// independently of each other.
    #[must_use]
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|v| v.trim().parse::<i64>().ok()).unwrap_or(0);
        Self::new(parse(page), parse(limit))
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn positive_or(value: i64, default: usize) -> usize {
    usize::try_from(value).ok().filter(|v| *v > 0).unwrap_or(default)
}

/// One page of a filtered result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Number of items before pagination.
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    /// `ceil(total / limit)`; zero when `total` is zero.
    pub total_pages: usize,
    pub data: Vec<T>,
}

/// Slices `items` to the requested page.
///
/// `start = (page - 1) * limit` and `end = start + limit` are both clamped
/// to `[0, len]`, so a page past the end yields an empty slice.
#[must_use]
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = items.len();
    let start = (request.page - 1).saturating_mul(request.limit).min(total);
    let end = start.saturating_add(request.limit).min(total);

    let data = items.into_iter().skip(start).take(end - start).collect();

    Page {
        total,
        page: request.page,
        limit: request.limit,
        total_pages: total.div_ceil(request.limit),
        data,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn forty_five_items_in_pages_of_twenty() {
        let first = paginate(numbers(45), PageRequest::new(1, 20));
        assert_eq!(first.data.len(), 20);
        assert_eq!(first.total, 45);
        assert_eq!(first.total_pages, 3);

        let third = paginate(numbers(45), PageRequest::new(3, 20));
        assert_eq!(third.data, (40..45).collect::<Vec<_>>());

        let fourth = paginate(numbers(45), PageRequest::new(4, 20));
        assert!(fourth.data.is_empty());
        assert_eq!(fourth.total, 45);
        assert_eq!(fourth.page, 4);
    }

    #[test]
    fn empty_input_has_zero_pages() {
        let page = paginate(Vec::<u8>::new(), PageRequest::default());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.data.is_empty());
    }

    #[test]
    fn non_positive_values_fall_back_to_defaults() {
        assert_eq!(PageRequest::new(0, -5), PageRequest::default());
        assert_eq!(PageRequest::new(-1, 10).page(), DEFAULT_PAGE);
        assert_eq!(PageRequest::new(3, 0).limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn parse_handles_missing_and_garbage_independently() {
        assert_eq!(PageRequest::parse(None, None), PageRequest::default());
        let req = PageRequest::parse(Some("2"), Some("abc"));
        assert_eq!(req.page(), 2);
        assert_eq!(req.limit(), DEFAULT_LIMIT);
        let req = PageRequest::parse(Some("x"), Some(" 5 "));
        assert_eq!(req.page(), DEFAULT_PAGE);
        assert_eq!(req.limit(), 5);
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let page = paginate(numbers(3), PageRequest::new(i64::MAX, i64::MAX));
        assert!(page.data.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn page_serializes_with_snake_case_envelope() {
        let value = serde_json::to_value(paginate(numbers(3), PageRequest::new(1, 2))).unwrap();
        assert_eq!(value["total"], 3);
        assert_eq!(value["total_pages"], 2);
        assert_eq!(value["data"], serde_json::json!([0, 1]));
    }

    proptest! {
        #[test]
        fn pages_partition_the_input(len in 0usize..200, limit in 1i64..50) {
            let request = PageRequest::new(1, limit);
            let pages = paginate(numbers(len), request).total_pages;
            let mut seen = Vec::new();
            for page in 1..=pages + 1 {
                let slice = paginate(numbers(len), PageRequest::new(i64::try_from(page).unwrap(), limit));
                prop_assert!(slice.data.len() <= request.limit());
                seen.extend(slice.data);
            }
            prop_assert_eq!(seen, numbers(len));
        }
    }
}
