//! Seeding the transaction table from a JSON feed of sales.
//!
//! The feed is a JSON array of [NewTransaction] records. Seeding is not
//! idempotent: every run inserts every record again.

use std::{fs, path::Path, time::Duration};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error,
    db::DbPool,
    transaction::{NewTransaction, create_transaction},
};

/// Where the sample sales data is downloaded from when no other URL is configured.
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// How long to wait for the seed feed before giving up.
pub const SEED_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// The state needed for seeding the database.
#[derive(Clone)]
pub struct SeedState {
    /// The pool of database connections.
    pub db_pool: DbPool,
    /// The client used to download the seed feed.
    pub http_client: reqwest::Client,
    /// The URL of the seed feed.
    pub seed_url: String,
}

impl FromRef<AppState> for SeedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_pool: state.db_pool.clone(),
            http_client: state.http_client.clone(),
            seed_url: state.seed_url.clone(),
        }
    }
}

/// The body of a successful response from the initialize endpoint.
#[derive(Debug, Serialize)]
pub struct SeedResponse {
    /// A human readable confirmation.
    pub message: &'static str,
}

/// Download the seed feed at `url` and insert every record into the database.
///
/// The feed is downloaded before a database connection is taken from the pool.
pub async fn initialize_endpoint(
    State(state): State<SeedState>,
) -> Result<Json<SeedResponse>, Error> {
    let transactions = fetch_seed_transactions(&state.http_client, &state.seed_url).await?;
    let record_count = transactions.len();

    let connection = state.db_pool.get()?;
    let inserted = insert_transactions(transactions, &connection)?;

    tracing::info!(
        "inserted {inserted} of {record_count} transactions from {}",
        state.seed_url
    );

    Ok(Json(SeedResponse {
        message: "Database initialized with seed data",
    }))
}

/// Download and decode the seed feed at `url`.
///
/// # Errors
/// Returns an [Error::SeedFetch] if the request fails, the server responds
/// with an error status, or the body is not a JSON array of transactions.
pub async fn fetch_seed_transactions(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<NewTransaction>, Error> {
    tracing::debug!("fetching seed data from {url}");

    let transactions = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<Vec<NewTransaction>>()
        .await?;

    Ok(transactions)
}

/// Read seed records from a JSON file in the same format as the seed feed.
///
/// # Errors
/// Returns an [Error::SeedFile] if the file cannot be read or parsed.
pub fn read_seed_file(path: &Path) -> Result<Vec<NewTransaction>, Error> {
    let text = fs::read_to_string(path)
        .map_err(|error| Error::SeedFile(format!("{}: {error}", path.display())))?;

    serde_json::from_str(&text)
        .map_err(|error| Error::SeedFile(format!("{}: {error}", path.display())))
}

/// Insert each of `transactions` as a new row, in order.
///
/// Records are inserted one statement at a time without an enclosing SQL
/// transaction. If an insert fails, the rows inserted before it are kept and
/// the error is returned.
///
/// Returns the number of rows inserted.
///
/// # Errors
/// Returns an [Error::SqlError] for the first insert that fails.
pub fn insert_transactions(
    transactions: Vec<NewTransaction>,
    connection: &Connection,
) -> Result<usize, Error> {
    let mut inserted = 0;

    for transaction in transactions {
        create_transaction(transaction, connection).inspect_err(|_| {
            tracing::error!("seeding stopped after inserting {inserted} transactions")
        })?;
        inserted += 1;
    }

    Ok(inserted)
}
