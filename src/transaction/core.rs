//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row, named_params, types::Type};
use serde::{Deserialize, Deserializer, Serialize};
use time::{
    Date, OffsetDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// A sale of a single product.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The name of the product.
    pub title: String,
    /// A text description of the product.
    pub description: String,
    /// The price the product was listed for.
    pub price: f64,
    /// The product category, e.g. "electronics".
    pub category: String,
    /// A URL to a picture of the product.
    pub image: Option<String>,
    /// Whether the product has been sold.
    pub sold: bool,
    /// When the product was sold, in the UTC offset it was recorded in.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [NewTransaction] for discoverability.
    pub fn build(title: &str, price: f64, date_of_sale: OffsetDateTime) -> NewTransaction {
        NewTransaction {
            title: title.to_owned(),
            description: String::new(),
            price,
            category: String::new(),
            image: None,
            sold: false,
            date_of_sale,
        }
    }
}

/// A transaction that has not been stored yet.
///
/// This is also the shape of a record in the seed feed, e.g.
///
/// ```json
/// {
///   "id": 1,
///   "title": "Fjallraven  Foldsack No 1 Backpack, Fits 15 Laptops",
///   "price": 329.85,
///   "description": "Your perfect pack for everyday use and walks in the forest.",
///   "category": "men's clothing",
///   "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
///   "sold": false,
///   "dateOfSale": "2021-11-27T20:29:54+05:30"
/// }
/// ```
///
/// The feed's `id` is ignored, the database assigns IDs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// The name of the product.
    pub title: String,
    /// A text description of the product.
    #[serde(default)]
    pub description: String,
    /// The price the product was listed for.
    pub price: f64,
    /// The product category.
    #[serde(default)]
    pub category: String,
    /// A URL to a picture of the product.
    #[serde(default)]
    pub image: Option<String>,
    /// Whether the product has been sold.
    #[serde(default)]
    pub sold: bool,
    /// When the product was sold.
    ///
    /// Either an RFC 3339 timestamp or a plain `YYYY-MM-DD` date, which is
    /// read as midnight UTC.
    #[serde(deserialize_with = "deserialize_date_of_sale")]
    pub date_of_sale: OffsetDateTime,
}

impl NewTransaction {
    /// Set the description of the product.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the product category.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set the URL of the product image.
    pub fn image(mut self, image: Option<&str>) -> Self {
        self.image = image.map(str::to_owned);
        self
    }

    /// Set whether the product has been sold.
    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = sold;
        self
    }
}

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Parse a sale date given as an RFC 3339 timestamp or as a plain date.
///
/// # Errors
/// Returns an error if `text` is in neither format.
pub fn parse_date_of_sale(text: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(text, &Rfc3339)
        .or_else(|_| Date::parse(text, DATE_FORMAT).map(|date| date.midnight().assume_utc()))
}

fn deserialize_date_of_sale<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;

    parse_date_of_sale(&text).map_err(|error| {
        serde::de::Error::custom(format!("invalid dateOfSale \"{text}\": {error}"))
    })
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if the sale date cannot be
/// stored as RFC 3339 text or if there is some other SQL error.
pub fn create_transaction(
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let date_of_sale = transaction
        .date_of_sale
        .format(&Rfc3339)
        .map_err(|error| rusqlite::Error::ToSqlConversionFailure(Box::new(error)))?;

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (title, description, price, category, image, sold, date_of_sale)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id, title, description, price, category, image, sold, date_of_sale",
        )?
        .query_row(
            (
                transaction.title,
                transaction.description,
                transaction.price,
                transaction.category,
                transaction.image,
                transaction.sold,
                date_of_sale,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
#[cfg(test)]
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, title, description, price, category, image, sold, date_of_sale
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_row(named_params! { ":id": id }, map_transaction_row)?;

    Ok(transaction)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// The virtual column `sale_month` holds the calendar month (1-12) of
/// `date_of_sale` as it was recorded, i.e. without converting to UTC first.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL,
                category TEXT NOT NULL,
                image TEXT,
                sold INTEGER NOT NULL CHECK (sold IN (0, 1)),
                date_of_sale TEXT NOT NULL,
                sale_month INTEGER GENERATED ALWAYS AS (CAST(substr(date_of_sale, 6, 2) AS INTEGER)) VIRTUAL
                )",
        (),
    )?;

    // Every query filters on the month.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_sale_month ON \"transaction\"(sale_month);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// Expects the columns `id, title, description, price, category, image, sold,
/// date_of_sale` in that order.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let description = row.get(2)?;
    let price = row.get(3)?;
    let category = row.get(4)?;
    let image = row.get(5)?;
    let sold = row.get(6)?;
    let raw_date_of_sale: String = row.get(7)?;
    let date_of_sale = OffsetDateTime::parse(&raw_date_of_sale, &Rfc3339)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(error)))?;

    Ok(Transaction {
        id,
        title,
        description,
        price,
        category,
        image,
        sold,
        date_of_sale,
    })
}

// ============================================================================
// TESTS
// ============================================================================
