//! Total sale amount and sold/unsold item counts for a month.

use rusqlite::{Connection, named_params};
use serde::Serialize;

use crate::{Error, month::Month};

/// Sale totals for the transactions in a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleStatistics {
    /// The sum of the prices of the sold items, zero if nothing was sold.
    pub total_sale_amount: f64,
    /// The number of sold items.
    pub total_sold_items: u32,
    /// The number of items that have not been sold.
    pub total_unsold_items: u32,
}

/// Get the sale totals for the transactions in `month`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_sale_statistics(month: Month, connection: &Connection) -> Result<SaleStatistics, Error> {
    connection
        .prepare(
            "SELECT
                COALESCE(SUM(CASE WHEN sold = 1 THEN price END), 0.0),
                COUNT(CASE WHEN sold = 1 THEN 1 END),
                COUNT(CASE WHEN sold = 0 THEN 1 END)
            FROM \"transaction\"
            WHERE sale_month = :month",
        )?
        .query_row(named_params! { ":month": month.number() }, |row| {
            Ok(SaleStatistics {
                total_sale_amount: row.get(0)?,
                total_sold_items: row.get(1)?,
                total_unsold_items: row.get(2)?,
            })
        })
        .map_err(Error::from)
}
