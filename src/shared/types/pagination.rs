//! Page-oriented pagination
//!
//! Converts a `(page, limit)` request into the `(limit, offset)` pair a
//! query needs, and turns a row count back into response metadata.
//!
//! Two tiers are kept apart:
//! - [`validate`] reports out-of-range input so the HTTP layer can reject it;
//! - [`resolve`] never fails and always repairs input into a usable result.
//!
//! A request with `limit = 0` is therefore rejected by [`validate`] but
//! would be resolved to the default limit if validation were skipped.

/// Limit used when none is supplied, or when the supplied one is below 1.
pub const DEFAULT_LIMIT: u64 = 10;
/// Largest page size ever handed to the store.
pub const MAX_LIMIT: u64 = 100;
/// First page (pages are 1-based).
pub const FIRST_PAGE: u64 = 1;
/// Largest offset ever handed to the store, which binds it as a signed 64-bit integer.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Pagination query parameters, as supplied by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

impl PaginationParams {
    pub fn new(limit: Option<i64>, page: Option<i64>) -> Self {
        Self { limit, page }
    }
}

/// Resolved `(limit, page, offset)` triple, ready for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationResult {
    pub limit: u64,
    pub page: u64,
    /// `(page - 1) * limit`
    pub offset: u64,
}

/// Response metadata derived from `(total_rows, limit, page)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
    pub total_rows: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub limit: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// Defaults and clamps the requested page and limit.
///
/// A limit above [`MAX_LIMIT`] is clamped to the ceiling, while a limit
/// below 1 is reset to [`DEFAULT_LIMIT`] rather than raised to 1. The
/// offset is capped at [`MAX_OFFSET`].
pub fn resolve(params: PaginationParams) -> PaginationResult {
    let limit = match params.limit {
        None => DEFAULT_LIMIT,
        Some(l) if l < 1 => DEFAULT_LIMIT,
        Some(l) => (l as u64).min(MAX_LIMIT),
    };

    let page = match params.page {
        Some(p) if p >= 1 => p as u64,
        _ => FIRST_PAGE,
    };

    PaginationResult {
        limit,
        page,
        offset: (page - 1).saturating_mul(limit).min(MAX_OFFSET),
    }
}

/// Computes total pages and boundary flags.
///
/// An empty result set has zero pages, so page 1 of it has no next page.
pub fn info(total_rows: u64, limit: u64, page: u64) -> PaginationInfo {
    let total_pages = total_rows.div_ceil(limit.max(1));

    PaginationInfo {
        total_rows,
        total_pages,
        current_page: page,
        limit,
        has_next_page: page < total_pages,
        has_previous_page: page > 1,
    }
}

/// Lists every violation in the supplied parameters; an empty list means valid.
pub fn validate(params: &PaginationParams) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(limit) = params.limit {
        if limit < 1 {
            errors.push("Limit must be greater than 0".to_string());
        }
        if limit > MAX_LIMIT as i64 {
            errors.push(format!("Limit cannot exceed {}", MAX_LIMIT));
        }
    }

    if let Some(page) = params.page {
        if page < 1 {
            errors.push("Page must be greater than 0".to_string());
        }
    }

    errors
}

/// Paginated response wrapper
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub info: PaginationInfo,
}

impl<T> PaginatedResult<T> {
    /// `resolved` must be the triple from [`resolve`] that produced `items`.
    pub fn new(items: Vec<T>, total_rows: u64, resolved: PaginationResult) -> Self {
        Self {
            items,
            info: info(total_rows, resolved.limit, resolved.page),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn params(limit: Option<i64>, page: Option<i64>) -> PaginationParams {
        PaginationParams::new(limit, page)
    }

    #[test]
    fn resolve_uses_defaults_when_absent() {
        let r = resolve(PaginationParams::default());
        assert_eq!(r, PaginationResult { limit: 10, page: 1, offset: 0 });
    }

    #[test]
    fn resolve_offset_matches_page_and_limit() {
        for limit in [1i64, 7, 10, 55, 100] {
            for page in [1i64, 2, 3, 17, 250] {
                let r = resolve(params(Some(limit), Some(page)));
                assert_eq!(r.limit, limit as u64);
                assert_eq!(r.page, page as u64);
                assert_eq!(r.offset, ((page - 1) * limit) as u64);
            }
        }
    }

    #[test]
    fn resolve_repairs_zero_limit_to_default() {
        let r = resolve(params(Some(0), Some(1)));
        assert_eq!(r.limit, 10);
        assert_eq!(r.offset, 0);
    }

    #[test]
    fn resolve_repairs_negative_limit_to_default() {
        assert_eq!(resolve(params(Some(-3), None)).limit, 10);
    }

    #[test]
    fn resolve_clamps_limit_to_ceiling() {
        assert_eq!(resolve(params(Some(150), None)).limit, 100);
        assert_eq!(resolve(params(Some(i64::MAX), None)).limit, 100);
    }

    #[test]
    fn resolve_floors_page_at_one() {
        assert_eq!(resolve(params(None, Some(0))).page, 1);
        assert_eq!(resolve(params(None, Some(-5))).page, 1);
    }

    #[test]
    fn resolve_caps_offset_on_huge_page() {
        let r = resolve(params(Some(100), Some(i64::MAX)));
        assert_eq!(r.page, i64::MAX as u64);
        assert_eq!(r.offset, MAX_OFFSET);
        assert!(i64::try_from(r.offset).is_ok());

        let r = resolve(params(Some(100), Some(100_000_000_000_000_000)));
        assert_eq!(r.offset, MAX_OFFSET);
    }

    #[test]
    fn info_for_empty_set() {
        let i = info(0, 10, 1);
        assert_eq!(i.total_pages, 0);
        assert!(!i.has_next_page);
        assert!(!i.has_previous_page);
    }

    #[test]
    fn info_on_last_page() {
        let i = info(25, 10, 3);
        assert_eq!(i.total_pages, 3);
        assert_eq!(i.current_page, 3);
        assert!(!i.has_next_page);
        assert!(i.has_previous_page);
    }

    #[test]
    fn info_on_first_of_many_pages() {
        let i = info(25, 10, 1);
        assert!(i.has_next_page);
        assert!(!i.has_previous_page);
    }

    #[test]
    fn info_exact_multiple_has_no_partial_page() {
        assert_eq!(info(30, 10, 1).total_pages, 3);
        assert_eq!(info(31, 10, 1).total_pages, 4);
    }

    #[test]
    fn info_reports_previous_page_beyond_empty_set() {
        let i = info(0, 10, 4);
        assert!(i.has_previous_page);
        assert!(!i.has_next_page);
    }

    #[test]
    fn validate_accepts_in_range_values() {
        assert!(validate(&params(Some(1), Some(1))).is_empty());
        assert!(validate(&params(Some(100), Some(9))).is_empty());
        assert!(validate(&PaginationParams::default()).is_empty());
    }

    #[test]
    fn validate_rejects_zero_limit_that_resolve_repairs() {
        let p = params(Some(0), None);
        assert_eq!(validate(&p), vec!["Limit must be greater than 0".to_string()]);
        assert_eq!(resolve(p).limit, 10);
    }

    #[test]
    fn validate_rejects_limit_above_ceiling() {
        assert_eq!(
            validate(&params(Some(101), None)),
            vec!["Limit cannot exceed 100".to_string()]
        );
    }

    #[test]
    fn validate_collects_every_violation() {
        let errors = validate(&params(Some(-1), Some(0)));
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&"Page must be greater than 0".to_string()));
    }

    #[test]
    fn paginated_result_uses_resolved_values() {
        let resolved = resolve(params(Some(500), Some(2)));
        let page = PaginatedResult::new(vec![1, 2, 3], 203, resolved);
        assert_eq!(page.info.limit, 100);
        assert_eq!(page.info.total_pages, 3);
        assert!(page.info.has_next_page);
    }
}
