//! Route handlers for the month aggregates.
//!
//! Each handler validates the `month` query parameter, takes one connection
//! from the pool and runs its queries on it. SQL and pool errors are logged
//! where they are converted into [Error].

use axum::{Json, extract::State};

use crate::{Error, db::DbPool, extract::ApiQuery, month::MonthQuery};

use super::{
    bar_chart::{BarChart, get_price_range_counts},
    combined::{CombinedCharts, get_combined_charts},
    pie_chart::{PieChart, get_category_counts},
    statistics::{SaleStatistics, get_sale_statistics},
};

/// Get the total sale amount and the sold and unsold item counts for a month.
pub async fn get_statistics_endpoint(
    State(db_pool): State<DbPool>,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> Result<Json<SaleStatistics>, Error> {
    let month = query.month()?;
    let connection = db_pool.get()?;

    get_sale_statistics(month, &connection).map(Json)
}

/// Get the number of items in each price range for a month.
pub async fn get_bar_chart_endpoint(
    State(db_pool): State<DbPool>,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> Result<Json<BarChart>, Error> {
    let month = query.month()?;
    let connection = db_pool.get()?;

    get_price_range_counts(month, &connection).map(Json)
}

/// Get the number of items in each category for a month.
pub async fn get_pie_chart_endpoint(
    State(db_pool): State<DbPool>,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> Result<Json<PieChart>, Error> {
    let month = query.month()?;
    let connection = db_pool.get()?;

    get_category_counts(month, &connection).map(Json)
}

/// Get the statistics, pie chart and bar chart for a month in one response.
pub async fn get_combined_endpoint(
    State(db_pool): State<DbPool>,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> Result<Json<CombinedCharts>, Error> {
    let month = query.month()?;
    let connection = db_pool.get()?;

    get_combined_charts(month, &connection).map(Json)
}
