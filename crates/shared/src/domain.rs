use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar format used on the wire and in the date inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradingDate(pub NaiveDate);

impl TradingDate {
    /// Parses a complete `YYYY-MM-DD` value. Partial or impossible dates yield `None`,
    /// the same way a native date input reports an empty value.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.len() != 10 {
            return None;
        }
        NaiveDate::parse_from_str(input, DATE_FORMAT).ok().map(Self)
    }
}

impl fmt::Display for TradingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Previous,
    Current,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateSelection {
    pub previous: Option<TradingDate>,
    pub current: Option<TradingDate>,
}

impl DateSelection {
    pub fn new(previous: Option<TradingDate>, current: Option<TradingDate>) -> Self {
        Self { previous, current }
    }

    pub fn get(&self, field: DateField) -> Option<TradingDate> {
        match field {
            DateField::Previous => self.previous,
            DateField::Current => self.current,
        }
    }

    pub fn set(&mut self, field: DateField, value: Option<TradingDate>) {
        match field {
            DateField::Previous => self.previous = value,
            DateField::Current => self.current = value,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.previous.is_some() && self.current.is_some()
    }

    /// Both dates, or `None` while either is unset.
    pub fn pair(&self) -> Option<(TradingDate, TradingDate)> {
        Some((self.previous?, self.current?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockChange {
    pub symbol: String,
    pub percent_change: f64,
}

/// Decoded payload of a successful analysis. Stocks keep the order the service sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisResult {
    pub filtered_stocks: Vec<StockChange>,
    pub processed_count: u64,
    pub warnings: Vec<String>,
}
