//! Sales analytics is a JSON API over a table of sales transactions.
//!
//! The API can seed the table from a remote JSON feed, list the transactions
//! for a calendar month with search and pagination, and aggregate a month's
//! transactions into sale statistics, a price range histogram and a category
//! breakdown.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod aggregation;
mod app_state;
mod database_id;
mod db;
mod endpoints;
mod extract;
mod logging;
mod month;
mod not_found;
mod pagination;
mod routing;
mod seed;
#[cfg(test)]
mod test_utils;
mod transaction;

pub use app_state::AppState;
pub use db::{DbConfig, DbPool, create_pool, initialize as initialize_db};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use seed::{DEFAULT_SEED_URL, insert_transactions, read_seed_file};
pub use transaction::{NewTransaction, Transaction, count_transactions};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The message sent to clients for any error that is not their fault.
///
/// The details of the underlying error are only written to the server logs.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A query parameter was missing or could not be parsed.
    ///
    /// The string describes the problem and is sent back to the client.
    #[error("{0}")]
    InvalidQuery(String),

    /// The seed data could not be fetched from, or decoded from, the remote
    /// feed.
    #[error("could not fetch seed data: {0}")]
    SeedFetch(String),

    /// The seed data could not be read from a local file.
    #[error("could not read seed file: {0}")]
    SeedFile(String),

    /// A connection could not be acquired from the connection pool, or the
    /// pool could not be created.
    #[error("could not get a database connection: {0}")]
    ConnectionPool(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<r2d2::Error> for Error {
    fn from(value: r2d2::Error) -> Self {
        tracing::error!("could not get a connection from the pool: {}", value);
        Error::ConnectionPool(value.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        tracing::error!("could not fetch seed data: {}", value);
        Error::SeedFetch(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidQuery(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            Error::NotFound => not_found::get_404_not_found_response(),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": INTERNAL_SERVER_ERROR_MESSAGE })),
            )
                .into_response(),
        }
    }
}
