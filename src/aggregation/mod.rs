//! Aggregate statistics over a month of transactions.
//!
//! This module contains:
//! - Sale statistics: the total sale amount and the sold and unsold item counts
//! - The bar chart: item counts for fixed price ranges
//! - The pie chart: item counts per category
//! - The combined response with all three
//! - Route handlers for each of the above

mod bar_chart;
mod combined;
mod handlers;
mod pie_chart;
mod statistics;

pub use handlers::{
    get_bar_chart_endpoint, get_combined_endpoint, get_pie_chart_endpoint, get_statistics_endpoint,
};
