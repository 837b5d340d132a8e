use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One trading day.
///
/// ```json
/// {
///     "date": "2024-01-02",
///     "open": 187.15,
///     "high": 188.44,
///     "low": 183.89,
///     "close": 185.64,
///     "volume": 82488700
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl PriceBar {
    /// Same bar with every price rounded to cents.
    pub fn rounded(&self) -> Self {
        Self {
            open: round2(self.open),
            high: round2(self.high),
            low: round2(self.low),
            close: round2(self.close),
            ..self.clone()
        }
    }
}

/// Round to 2 decimal places, ties to even: `12.125` becomes `12.12`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Daily bars for one ticker, oldest first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub ticker: String,
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(ticker: &str, mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|bar| bar.date);
        Self {
            ticker: ticker.to_string(),
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// The bar before the latest one.
    pub fn second_last(&self) -> Option<&PriceBar> {
        self.bars.len().checked_sub(2).map(|i| &self.bars[i])
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|bar| bar.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }
}

/// Everything a provider returns for a single ticker.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Quote {
    pub series: PriceSeries,
    pub name: Option<String>,
}

impl Quote {
    /// "No data found" answer.
    pub fn empty(ticker: &str) -> Self {
        Self {
            series: PriceSeries::new(ticker, vec![]),
            name: None,
        }
    }
}

/// Daily history for `ticker` from `start` (inclusive) up to `end` (exclusive).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: DateTime<Utc>,
}

impl QuoteRequest {
    pub fn new(ticker: &str, start: NaiveDate, end: DateTime<Utc>) -> Self {
        Self {
            ticker: ticker.to_string(),
            start,
            end,
        }
    }

    /// `start` as a unix timestamp at midnight UTC.
    pub fn period1(&self) -> i64 {
        self.start
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or_default()
    }

    /// `end` as a unix timestamp.
    pub fn period2(&self) -> i64 {
        self.end.timestamp()
    }
}
