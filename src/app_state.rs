//! Implements a struct that holds the state of the REST server.

use axum::extract::FromRef;

use crate::{
    Error,
    db::DbPool,
    pagination::PaginationConfig,
    seed::SEED_FETCH_TIMEOUT,
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The pool of database connections shared by all requests.
    pub db_pool: DbPool,

    /// The client used to download seed data.
    pub http_client: reqwest::Client,

    /// The URL of the JSON feed used to seed the database.
    pub seed_url: String,

    /// The config that controls how to page transaction listings.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] over an existing connection pool.
    ///
    /// The pool's database should already be initialized, see
    /// [crate::create_pool].
    ///
    /// # Errors
    /// Returns an [Error::SeedFetch] if the HTTP client cannot be created.
    pub fn new(
        db_pool: DbPool,
        seed_url: &str,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        let http_client = reqwest::Client::builder()
            .timeout(SEED_FETCH_TIMEOUT)
            .build()?;

        Ok(Self {
            db_pool,
            http_client,
            seed_url: seed_url.to_owned(),
            pagination_config,
        })
    }
}

// The aggregation handlers only need a database connection.
impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db_pool.clone()
    }
}
