//! Helpers shared by the unit tests.

use axum::{Json, Router, routing::get};
use rusqlite::Connection;
use serde_json::Value;
use time::Date;
use tokio::net::TcpListener;

use crate::{
    AppState, PaginationConfig,
    db::{DbConfig, DbPool, create_pool, initialize},
    month::Month,
    transaction::{NewTransaction, Transaction, create_transaction},
};

/// An initialized in-memory database.
pub fn get_test_connection() -> Connection {
    let conn = Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&conn).expect("Could not initialize database");
    conn
}

/// A pool holding a single connection to an initialized in-memory database.
pub fn get_test_pool() -> DbPool {
    create_pool(&DbConfig::in_memory()).expect("Could not create connection pool")
}

/// App state over `db_pool` that seeds from `seed_url`.
pub fn get_test_state(db_pool: DbPool, seed_url: &str) -> AppState {
    AppState::new(db_pool, seed_url, PaginationConfig::default())
        .expect("Could not create app state")
}

pub fn insert_transaction(connection: &Connection, transaction: NewTransaction) -> Transaction {
    create_transaction(transaction, connection).expect("Could not create transaction")
}

/// Insert 60 transactions, five in each calendar month spread over three
/// years, with prices from 0 to 988.25 in steps of 16.75, two categories and
/// every fourth transaction sold.
pub fn insert_transactions_for_every_month(connection: &Connection) {
    for i in 0..60u8 {
        let month = time::Month::try_from(i % 12 + 1).expect("Invalid month");
        let year = 2021 + i32::from(i % 3);
        let date_of_sale = Date::from_calendar_date(year, month, 1 + i % 28)
            .expect("Invalid date")
            .midnight()
            .assume_utc();
        let category = if i % 2 == 0 { "even" } else { "odd" };

        insert_transaction(
            connection,
            Transaction::build(&format!("Item {i}"), f64::from(i) * 16.75, date_of_sale)
                .category(category)
                .sold(i % 4 == 0),
        );
    }
}

/// Count the transactions sold in `month` of any year.
pub fn count_transactions_in_month(connection: &Connection, month: Month) -> u32 {
    connection
        .query_row(
            "SELECT COUNT(*) FROM \"transaction\" WHERE sale_month = ?1",
            [month.number()],
            |row| row.get(0),
        )
        .expect("Could not count transactions")
}

/// Serve `body` as JSON from a local HTTP server running in the background.
///
/// Returns the URL of the document.
pub async fn serve_json(body: Value) -> String {
    let app = Router::new().route(
        "/product_transaction.json",
        get(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );

    let base_url = serve_router(app).await;

    format!("{base_url}/product_transaction.json")
}

/// Serve `router` over real TCP connections in the background.
///
/// Returns the base URL of the server, e.g. `http://127.0.0.1:12345`.
pub async fn serve_router(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test listener");
    let address = listener
        .local_addr()
        .expect("Could not get test listener address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });

    format!("http://{address}")
}

/// A URL on the local machine that nothing is listening on.
pub async fn unused_local_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test listener");
    let address = listener
        .local_addr()
        .expect("Could not get test listener address");
    drop(listener);

    format!("http://{address}/product_transaction.json")
}
