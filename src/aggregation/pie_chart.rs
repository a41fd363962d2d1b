//! Item counts per category for a month, displayed as a pie chart.

use rusqlite::{Connection, named_params};
use serde::Serialize;

use crate::{Error, month::Month};

/// The number of items in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// The category name.
    pub category: String,
    /// The number of items in the category.
    pub item_count: u32,
}

/// The data for the category pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieChart {
    /// The item count for each category with at least one item, ordered by
    /// category name.
    pub categories: Vec<CategoryCount>,
}

/// Count the transactions in `month` for each category.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_category_counts(month: Month, connection: &Connection) -> Result<PieChart, Error> {
    let categories = connection
        .prepare(
            "SELECT category, COUNT(*)
            FROM \"transaction\"
            WHERE sale_month = :month
            GROUP BY category
            ORDER BY category ASC",
        )?
        .query_map(named_params! { ":month": month.number() }, |row| {
            Ok(CategoryCount {
                category: row.get(0)?,
                item_count: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PieChart { categories })
}
