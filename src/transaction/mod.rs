//! Sales transactions.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the `NewTransaction` builder
//! - Database functions for storing and counting transactions
//! - The month filtered, searchable and paginated listing and its route handler

mod core;
mod listing_endpoint;
mod query;

pub use core::{
    NewTransaction, Transaction, count_transactions, create_transaction, create_transaction_table,
};
pub use listing_endpoint::get_transactions_endpoint;
