//! Application router configuration.

use axum::{Json, Router, routing::get};

use crate::{
    AppState,
    aggregation::{
        get_bar_chart_endpoint, get_combined_endpoint, get_pie_chart_endpoint,
        get_statistics_endpoint,
    },
    endpoints,
    not_found::get_404_not_found,
    seed::initialize_endpoint,
    transaction::get_transactions_endpoint,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_root))
        .route(endpoints::INITIALIZE, get(initialize_endpoint))
        .route(endpoints::TRANSACTIONS, get(get_transactions_endpoint))
        .route(endpoints::STATISTICS, get(get_statistics_endpoint))
        .route(endpoints::BAR_CHART, get(get_bar_chart_endpoint))
        .route(endpoints::PIE_CHART, get(get_pie_chart_endpoint))
        .route(endpoints::COMBINED, get(get_combined_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Let the client know the server is up.
async fn get_root() -> Json<&'static str> {
    Json("server is running")
}
