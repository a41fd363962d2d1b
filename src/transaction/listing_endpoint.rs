//! Defines the route handler for listing a month's transactions.

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    db::DbPool,
    extract::ApiQuery,
    month::parse_month,
    pagination::{Pagination, PaginationConfig},
};

use super::{
    core::Transaction,
    query::{TransactionQuery, get_transactions},
};

/// The state needed for listing transactions.
#[derive(Clone)]
pub struct TransactionsState {
    /// The pool of database connections.
    pub db_pool: DbPool,
    /// The config that controls the default page and page size.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_pool: state.db_pool.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The raw query string for the transactions endpoint.
///
/// Values are kept as strings and validated by the handler so that bad numbers
/// get a specific error message.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsParams {
    /// The calendar month number, required.
    pub month: Option<String>,
    /// Text to look for in the title, description or price.
    pub search: Option<String>,
    /// The 1-based page number.
    pub page: Option<String>,
    /// The maximum number of transactions per page.
    pub per_page: Option<String>,
}

/// The body of a successful response from the transactions endpoint.
#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    /// The transactions on the requested page.
    pub transactions: Vec<Transaction>,
}

/// List the transactions for a month, optionally filtered by a search term,
/// one page at a time.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionsState>,
    ApiQuery(params): ApiQuery<TransactionsParams>,
) -> Result<Json<TransactionsResponse>, Error> {
    let query = TransactionQuery {
        month: parse_month(params.month.as_deref())?,
        search: params.search,
        pagination: Pagination::from_query(
            params.page.as_deref(),
            params.per_page.as_deref(),
            &state.pagination_config,
        )?,
    };

    let connection = state.db_pool.get()?;

    let transactions = get_transactions(&query, &connection)?;

    tracing::debug!(
        "found {} transactions for month {} on page {}",
        transactions.len(),
        query.month,
        query.pagination.page()
    );

    Ok(Json(TransactionsResponse { transactions }))
}
