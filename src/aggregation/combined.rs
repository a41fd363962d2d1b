//! All of a month's aggregates in a single response.

use rusqlite::Connection;
use serde::Serialize;

use crate::{Error, month::Month};

use super::{
    bar_chart::{BarChart, get_price_range_counts},
    pie_chart::{PieChart, get_category_counts},
    statistics::{SaleStatistics, get_sale_statistics},
};

/// The sale statistics, category pie chart and price range bar chart for a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedCharts {
    /// Sale totals.
    pub statistics: SaleStatistics,
    /// Item counts per category.
    pub pie_chart: PieChart,
    /// Item counts per price range.
    pub bar_chart: BarChart,
}

/// Get every aggregate for `month` using the one `connection`.
///
/// # Errors
/// This function will return a [Error::SqlError] if any of the queries fail.
pub fn get_combined_charts(month: Month, connection: &Connection) -> Result<CombinedCharts, Error> {
    Ok(CombinedCharts {
        statistics: get_sale_statistics(month, connection)?,
        pie_chart: get_category_counts(month, connection)?,
        bar_chart: get_price_range_counts(month, connection)?,
    })
}
