#![allow(dead_code)]

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;
use tracker_fetch::prelude::*;

/// Serves canned closes and records every request it receives.
pub struct MockFetcher {
    closes: Vec<f64>,
    name: Option<String>,
    fail: bool,
    pub requests: Mutex<Vec<QuoteRequest>>,
}

impl MockFetcher {
    pub fn with_closes(closes: &[f64], name: Option<&str>) -> Self {
        Self {
            closes: closes.to_vec(),
            name: name.map(str::to_string),
            fail: false,
            requests: Mutex::new(vec![]),
        }
    }

    pub fn empty() -> Self {
        Self::with_closes(&[], None)
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }

    pub fn requests(&self) -> Vec<QuoteRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteFetcher for MockFetcher {
    async fn fetch_quote(&self, request: &QuoteRequest) -> anyhow::Result<Quote> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(anyhow!("[{}] price fetching error: timed out", request.ticker));
        }

        let bars = self
            .closes
            .iter()
            .enumerate()
            .map(|(i, close)| PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap() + chrono::Days::new(i as u64),
                open: close - 0.5,
                high: close + 1.0,
                low: close - 1.0,
                close: *close,
                volume: 1_000_000,
            })
            .collect();
        Ok(Quote {
            series: PriceSeries::new(&request.ticker, bars),
            name: self.name.clone(),
        })
    }
}
