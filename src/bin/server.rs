use std::{
    fs::OpenOptions,
    net::SocketAddr,
    path::PathBuf,
    process::exit,
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use sales_analytics::{
    AppState, DEFAULT_SEED_URL, DbConfig, PaginationConfig, build_router, count_transactions,
    create_pool, graceful_shutdown, logging_middleware,
};

/// The REST API server for sales_analytics.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "DB_PATH")]
    db_path: PathBuf,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// The URL of the JSON feed used to seed the database.
    #[arg(long, env = "SEED_URL", default_value = DEFAULT_SEED_URL)]
    seed_url: String,

    /// The maximum number of database connections.
    #[arg(long, env = "POOL_SIZE", default_value_t = 10)]
    pool_size: u32,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let db_pool = match create_pool(&DbConfig::file(&args.db_path).pool_size(args.pool_size)) {
        Ok(db_pool) => db_pool,
        Err(error) => {
            tracing::error!("Could not open database at {:#?}: {error}", args.db_path);
            exit(1);
        }
    };

    match db_pool
        .get()
        .map_err(sales_analytics::Error::from)
        .and_then(|connection| count_transactions(&connection))
    {
        Ok(count) => tracing::info!("Database at {:#?} has {count} transactions", args.db_path),
        Err(error) => tracing::warn!("Could not count transactions: {error}"),
    }

    let state = match AppState::new(db_pool, &args.seed_url, PaginationConfig::default()) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not create app state: {error}");
            exit(1);
        }
    };

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(
        build_router(state).layer(middleware::from_fn(logging_middleware)),
    );

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("Server stopped unexpectedly");
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
