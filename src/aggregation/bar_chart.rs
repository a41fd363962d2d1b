//! Item counts per price range for a month, displayed as a bar chart.

use rusqlite::{Connection, named_params};
use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{Error, month::Month};

/// The number of price ranges in the bar chart.
pub const PRICE_RANGE_COUNT: usize = 10;

/// The labels of the price ranges, cheapest first.
///
/// Range `k` covers prices from `100k + 1` up to and including `100(k + 1)`,
/// except that the first range starts at 0 and the last range is open ended.
pub const PRICE_RANGE_LABELS: [&str; PRICE_RANGE_COUNT] = [
    "0 - 100",
    "101 - 200",
    "201 - 300",
    "301 - 400",
    "401 - 500",
    "501 - 600",
    "601 - 700",
    "701 - 800",
    "801 - 900",
    "901 - above",
];

/// The number of items in each price range, in the order of [PRICE_RANGE_LABELS].
///
/// Serializes as a JSON object keyed by label, with the keys in price order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceRangeCounts([u32; PRICE_RANGE_COUNT]);

impl PriceRangeCounts {
    /// The count for the range with `label`, or `None` if there is no such range.
    pub fn get(&self, label: &str) -> Option<u32> {
        PRICE_RANGE_LABELS
            .iter()
            .position(|range_label| *range_label == label)
            .map(|index| self.0[index])
    }

    /// The total number of items over all ranges.
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

impl Serialize for PriceRangeCounts {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(PRICE_RANGE_COUNT))?;

        for (label, count) in PRICE_RANGE_LABELS.iter().zip(self.0) {
            map.serialize_entry(label, &count)?;
        }

        map.end()
    }
}

/// The data for the price range bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    /// The number of items in each price range.
    pub price_ranges: PriceRangeCounts,
}

/// Count the transactions in `month` that fall in each price range,
/// regardless of whether they were sold.
///
/// The ranges are contiguous so every price lands in exactly one range. A
/// fractional price between two ranges, e.g. 100.5, is counted in the lower
/// range.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_price_range_counts(month: Month, connection: &Connection) -> Result<BarChart, Error> {
    let price_ranges = connection
        .prepare(
            "SELECT
                COUNT(CASE WHEN price < 101 THEN 1 END),
                COUNT(CASE WHEN price >= 101 AND price < 201 THEN 1 END),
                COUNT(CASE WHEN price >= 201 AND price < 301 THEN 1 END),
                COUNT(CASE WHEN price >= 301 AND price < 401 THEN 1 END),
                COUNT(CASE WHEN price >= 401 AND price < 501 THEN 1 END),
                COUNT(CASE WHEN price >= 501 AND price < 601 THEN 1 END),
                COUNT(CASE WHEN price >= 601 AND price < 701 THEN 1 END),
                COUNT(CASE WHEN price >= 701 AND price < 801 THEN 1 END),
                COUNT(CASE WHEN price >= 801 AND price < 901 THEN 1 END),
                COUNT(CASE WHEN price >= 901 THEN 1 END)
            FROM \"transaction\"
            WHERE sale_month = :month",
        )?
        .query_row(named_params! { ":month": month.number() }, |row| {
            let mut counts = [0; PRICE_RANGE_COUNT];

            for (index, count) in counts.iter_mut().enumerate() {
                *count = row.get(index)?;
            }

            Ok(PriceRangeCounts(counts))
        })?;

    Ok(BarChart { price_ranges })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use crate::{
        aggregation::bar_chart::{PRICE_RANGE_LABELS, PriceRangeCounts, get_price_range_counts},
        month::Month,
        test_utils::{
            count_transactions_in_month, get_test_connection, insert_transaction,
            insert_transactions_for_every_month,
        },
        transaction::Transaction,
    };

    fn counts_for_prices(prices: &[f64]) -> PriceRangeCounts {
        let conn = get_test_connection();
        for price in prices {
            insert_transaction(
                &conn,
                Transaction::build("Item", *price, datetime!(2022-05-20 14:00 UTC)),
            );
        }

        get_price_range_counts(Month::new(5).unwrap(), &conn)
            .unwrap()
            .price_ranges
    }

    #[test]
    fn single_item_lands_in_its_range() {
        let conn = get_test_connection();
        insert_transaction(
            &conn,
            Transaction::build("Widget", 150.0, datetime!(2023-03-05 0:00 UTC))
                .category("Tools")
                .sold(true),
        );

        let got = get_price_range_counts(Month::new(3).unwrap(), &conn).unwrap();

        for label in PRICE_RANGE_LABELS {
            let want = if label == "101 - 200" { 1 } else { 0 };
            assert_eq!(got.price_ranges.get(label), Some(want), "range {label}");
        }
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let got = counts_for_prices(&[0.0, 100.0, 101.0, 200.0, 900.0, 901.0, 5000.0]);

        assert_eq!(got.get("0 - 100"), Some(2));
        assert_eq!(got.get("101 - 200"), Some(2));
        assert_eq!(got.get("801 - 900"), Some(1));
        assert_eq!(got.get("901 - above"), Some(2));
        assert_eq!(got.total(), 7);
    }

    #[test]
    fn fractional_prices_between_ranges_are_counted() {
        let got = counts_for_prices(&[100.5, 200.99, 900.01]);

        assert_eq!(got.get("0 - 100"), Some(1));
        assert_eq!(got.get("101 - 200"), Some(1));
        assert_eq!(got.get("801 - 900"), Some(1));
        assert_eq!(got.total(), 3);
    }

    #[test]
    fn counts_sold_and_unsold_items() {
        let conn = get_test_connection();
        let date = datetime!(2022-05-20 14:00 UTC);
        insert_transaction(&conn, Transaction::build("A", 350.0, date).sold(true));
        insert_transaction(&conn, Transaction::build("B", 399.0, date).sold(false));

        let got = get_price_range_counts(Month::new(5).unwrap(), &conn).unwrap();

        assert_eq!(got.price_ranges.get("301 - 400"), Some(2));
    }

    #[test]
    fn range_counts_add_up_to_month_total() {
        let conn = get_test_connection();
        insert_transactions_for_every_month(&conn);

        for month in Month::all() {
            let got = get_price_range_counts(month, &conn).unwrap();

            assert_eq!(
                got.price_ranges.total(),
                count_transactions_in_month(&conn, month),
                "month {month}"
            );
        }
    }

    #[test]
    fn unknown_label_has_no_count() {
        assert_eq!(PriceRangeCounts::default().get("1000 - 2000"), None);
    }

    #[test]
    fn serializes_labels_in_price_order() {
        let got = counts_for_prices(&[150.0, 950.0]);

        let json = serde_json::to_string(&got).unwrap();

        assert_eq!(
            json,
            json!({
                "0 - 100": 0,
                "101 - 200": 1,
                "201 - 300": 0,
                "301 - 400": 0,
                "401 - 500": 0,
                "501 - 600": 0,
                "601 - 700": 0,
                "701 - 800": 0,
                "801 - 900": 0,
                "901 - above": 1
            })
            .to_string()
        );
        assert!(json.find("\"101 - 200\"").unwrap() < json.find("\"901 - above\"").unwrap());
    }
}
