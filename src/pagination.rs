//! This modules defines the common functionality for paging data.

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum transactions to return per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// A validated page request: 1-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    per_page: u64,
}

impl Pagination {
    /// Create a page request.
    ///
    /// # Errors
    /// Returns an [Error::InvalidQuery] if `page` or `per_page` is zero, or
    /// if the page starts past the largest offset SQLite can take.
    pub fn new(page: u64, per_page: u64) -> Result<Self, Error> {
        if page == 0 {
            return Err(Error::InvalidQuery("page must be at least 1".to_owned()));
        }

        if per_page == 0 {
            return Err(Error::InvalidQuery("perPage must be at least 1".to_owned()));
        }

        let pagination = Self { page, per_page };

        if pagination.checked_offset().is_none() || i64::try_from(per_page).is_err() {
            return Err(Error::InvalidQuery("page is too large".to_owned()));
        }

        Ok(pagination)
    }

    /// Parse the raw `page` and `perPage` query parameters, falling back to
    /// the defaults in `config` for missing values.
    ///
    /// # Errors
    /// Returns an [Error::InvalidQuery] if either value is not a positive integer.
    pub fn from_query(
        page: Option<&str>,
        per_page: Option<&str>,
        config: &PaginationConfig,
    ) -> Result<Self, Error> {
        let page = parse_positive(page, "page")?.unwrap_or(config.default_page);
        let per_page = parse_positive(per_page, "perPage")?.unwrap_or(config.default_page_size);

        Self::new(page, per_page)
    }

    /// The 1-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// The maximum number of rows on a page.
    pub fn limit(&self) -> i64 {
        // Checked in `new`.
        self.per_page as i64
    }

    /// The number of rows that come before this page.
    pub fn offset(&self) -> i64 {
        // Checked in `new`.
        self.checked_offset().unwrap_or(i64::MAX)
    }

    fn checked_offset(&self) -> Option<i64> {
        (self.page - 1)
            .checked_mul(self.per_page)
            .and_then(|offset| i64::try_from(offset).ok())
    }
}

fn parse_positive(value: Option<&str>, name: &str) -> Result<Option<u64>, Error> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<u64>()
            .map(Some)
            .map_err(|_| Error::InvalidQuery(format!("{name} must be a positive integer"))),
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        pagination::{Pagination, PaginationConfig},
    };

    #[test]
    fn first_page_starts_at_zero() {
        let pagination = Pagination::new(1, 10).unwrap();

        assert_eq!(pagination.offset(), 0);
        assert_eq!(pagination.limit(), 10);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let pagination = Pagination::new(3, 25).unwrap();

        assert_eq!(pagination.offset(), 50);
        assert_eq!(pagination.limit(), 25);
    }

    #[test]
    fn uses_defaults_when_missing() {
        let config = PaginationConfig::default();

        let pagination = Pagination::from_query(None, None, &config).unwrap();

        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.limit(), 10);
    }

    #[test]
    fn empty_values_use_defaults() {
        let config = PaginationConfig {
            default_page: 2,
            default_page_size: 5,
        };

        let pagination = Pagination::from_query(Some(""), Some(" "), &config).unwrap();

        assert_eq!(pagination, Pagination::new(2, 5).unwrap());
    }

    #[test]
    fn rejects_zero_page_and_page_size() {
        let config = PaginationConfig::default();

        assert!(matches!(
            Pagination::from_query(Some("0"), None, &config),
            Err(Error::InvalidQuery(_))
        ));
        assert!(matches!(
            Pagination::from_query(None, Some("0"), &config),
            Err(Error::InvalidQuery(_))
        ));
    }

    #[test]
    fn rejects_non_numeric_values() {
        let config = PaginationConfig::default();

        assert!(matches!(
            Pagination::from_query(Some("two"), None, &config),
            Err(Error::InvalidQuery(_))
        ));
        assert!(matches!(
            Pagination::from_query(None, Some("-10"), &config),
            Err(Error::InvalidQuery(_))
        ));
    }

    #[test]
    fn rejects_overflowing_offset() {
        let result = Pagination::new(u64::MAX, 10);

        assert!(matches!(result, Err(Error::InvalidQuery(_))));
    }
}
