//! Database query for listing a month's transactions with search and pagination.

use rusqlite::{Connection, named_params};

use crate::{Error, month::Month, pagination::Pagination};

use super::core::{Transaction, map_transaction_row};

/// Which transactions to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    /// Only include transactions sold in this calendar month.
    pub month: Month,
    /// Only include transactions whose title, description or price contains
    /// this text. Matching ignores ASCII case.
    pub search: Option<String>,
    /// The page of results to return.
    pub pagination: Pagination,
}

/// Get one page of the transactions matching `query`, ordered by ID.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_transactions(
    query: &TransactionQuery,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let pattern = query
        .search
        .as_deref()
        .filter(|search| !search.is_empty())
        .map(|search| format!("%{}%", escape_like(search)));

    connection
        .prepare(
            r#"SELECT id, title, description, price, category, image, sold, date_of_sale
            FROM "transaction"
            WHERE sale_month = :month
                AND (:pattern IS NULL
                    OR title LIKE :pattern ESCAPE '\'
                    OR description LIKE :pattern ESCAPE '\'
                    OR CAST(price AS TEXT) LIKE :pattern ESCAPE '\')
            ORDER BY id ASC
            LIMIT :limit OFFSET :offset"#,
        )?
        .query_map(
            named_params! {
                ":month": query.month.number(),
                ":pattern": pattern,
                ":limit": query.pagination.limit(),
                ":offset": query.pagination.offset(),
            },
            map_transaction_row,
        )?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Escape the `LIKE` wildcards in `text` so that it matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}
