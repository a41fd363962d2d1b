//! The API endpoints URIs.

/// The root route, used to check that the server is running.
pub const ROOT: &str = "/";
/// The route for seeding the database from the remote feed.
pub const INITIALIZE: &str = "/initialize";
/// The route for listing a month's transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for a month's sale statistics.
pub const STATISTICS: &str = "/statistics";
/// The route for a month's item counts per price range.
pub const BAR_CHART: &str = "/bar-chart";
/// The route for a month's item counts per category.
pub const PIE_CHART: &str = "/pie-chart";
/// The route for the statistics, pie chart and bar chart in one response.
pub const COMBINED: &str = "/combined";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::INITIALIZE);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::STATISTICS);
        assert_endpoint_is_valid_uri(endpoints::BAR_CHART);
        assert_endpoint_is_valid_uri(endpoints::PIE_CHART);
        assert_endpoint_is_valid_uri(endpoints::COMBINED);
    }
}
