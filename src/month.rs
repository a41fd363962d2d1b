//! The calendar month filter shared by the listing and aggregation endpoints.

use std::{fmt::Display, str::FromStr};

use serde::Deserialize;

use crate::Error;

/// A calendar month number from 1 (January) to 12 (December).
///
/// Transactions are matched on the month of their sale date regardless of the
/// year, so month 3 selects sales from March of every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(u8);

impl Month {
    /// Create a month from its number.
    ///
    /// # Errors
    /// Returns an [Error::InvalidQuery] if `number` is not between 1 and 12.
    pub fn new(number: u8) -> Result<Self, Error> {
        if (1..=12).contains(&number) {
            Ok(Self(number))
        } else {
            Err(invalid_month())
        }
    }

    /// The month number, from 1 to 12.
    pub fn number(self) -> u8 {
        self.0
    }

    /// All twelve months in calendar order.
    #[cfg(test)]
    pub fn all() -> impl Iterator<Item = Month> {
        (1..=12).map(Month)
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Month {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s.trim().parse::<u8>().map_err(|_| invalid_month())?;

        Self::new(number)
    }
}

fn invalid_month() -> Error {
    Error::InvalidQuery("month must be a number between 1 and 12".to_owned())
}

/// Parse the raw `month` query parameter.
///
/// # Errors
/// Returns an [Error::InvalidQuery] if `month` is missing or is not a month number.
pub fn parse_month(month: Option<&str>) -> Result<Month, Error> {
    match month {
        Some(month) => month.parse(),
        None => Err(Error::InvalidQuery("month is required".to_owned())),
    }
}

/// The query string for endpoints that only take a month, e.g. `?month=3`.
///
/// The month is kept as a string so that bad values get a specific
/// [Error::InvalidQuery] message instead of a generic deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// The raw month number.
    pub month: Option<String>,
}

impl MonthQuery {
    /// The validated month.
    ///
    /// # Errors
    /// Returns an [Error::InvalidQuery] if the month is missing or invalid.
    pub fn month(&self) -> Result<Month, Error> {
        parse_month(self.month.as_deref())
    }
}
