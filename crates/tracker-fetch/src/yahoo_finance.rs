use crate::api::QuoteFetcher;
use crate::de::{de_nullable_volume, de_timestamps_to_naive_date};
use crate::models::{PriceBar, PriceSeries, Quote, QuoteRequest};
use anyhow::{anyhow, bail};
use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, error, trace, warn};
use reqwest::Client;
use serde::Deserialize;

///////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Daily prices from Yahoo Finance, per ticker
//
///////////////////////////////////////////////////////////////////////////////////////////////////////

pub const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo's error code for an unknown or delisted symbol.
const NOT_FOUND: &str = "Not Found";

pub struct YahooFinance {
    client: Client,
    base_url: String,
}

impl YahooFinance {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point at a different chart endpoint, e.g. `query2.finance.yahoo.com`.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn url(&self, request: &QuoteRequest) -> String {
        let tckr = request.ticker.to_uppercase();
        format!(
            "{}/{tckr}?symbol={tckr}&period1={}&period2={}&interval=1d&events=div|split",
            self.base_url,
            request.period1(),
            request.period2(),
        )
    }
}

#[async_trait]
impl QuoteFetcher for YahooFinance {
    async fn fetch_quote(&self, request: &QuoteRequest) -> anyhow::Result<Quote> {
        let time = std::time::Instant::now();
        let ticker = &request.ticker;
        let url = self.url(request);

        trace!("Fetching price data for [{ticker}] from Yahoo Finance");
        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("[{ticker}] price fetching error: {e}\nURL: {url}");
            e
        })?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            error!("[{ticker}] byte transformation error: {e}\nURL: {url}");
            e
        })?;

        // Yahoo answers unknown symbols with a 404 *and* a JSON error body, so deserialize
        // before judging the status
        trace!("Deserializing price data for [{ticker}] from Yahoo Finance");
        let de = match serde_json::from_slice::<PriceHistory>(&body) {
            Ok(data) => data,
            Err(e) if !status.is_success() => {
                error!("[{ticker}] HTTP {status} with unreadable body: {e}\nURL: {url}");
                bail!("[{ticker}] Yahoo Finance responded with HTTP {status}");
            }
            Err(e) => {
                error!("[{ticker}] deserialization error: {e}\nURL: {url}");
                return Err(e.into());
            }
        };

        let quote = transform(ticker, de)?;
        if quote.series.is_empty() && !status.is_success() && status.as_u16() != 404 {
            bail!("[{ticker}] Yahoo Finance responded with HTTP {status}");
        }

        debug!(
            "[{ticker}] {} bars fetched. Elapsed time: {} ms",
            quote.series.len(),
            time.elapsed().as_millis()
        );
        Ok(quote)
    }
}

/// Turn Yahoo's column-oriented chart into rounded daily bars.
///
/// Rows where any of open/high/low/close/volume is `null` (halted days, partial current day) are
/// dropped.
pub fn transform(ticker: &str, de: PriceHistory) -> anyhow::Result<Quote> {
    if let Some(err) = de.chart.error {
        if err.code == NOT_FOUND {
            debug!("[{ticker}] not found on Yahoo Finance: {}", err.description());
            return Ok(Quote::empty(ticker));
        }
        return Err(anyhow!(
            "[{ticker}] Yahoo Finance error {}: {}",
            err.code,
            err.description()
        ));
    }

    let Some(base) = de.chart.result.and_then(|result| result.into_iter().next()) else {
        warn!("[{ticker}] contained no \"chart.result\" object; returning an empty series");
        return Ok(Quote::empty(ticker));
    };

    let name = base.meta.display_name();
    let Some(price) = base.indicators.quote.into_iter().next() else {
        return Ok(Quote {
            series: PriceSeries::new(ticker, vec![]),
            name,
        });
    };

    trace!("Transforming price data for [{ticker}]");
    let bars = price
        .open
        .iter()
        .zip(price.high.iter())
        .zip(price.low.iter())
        .zip(price.close.iter())
        .zip(price.volume.iter())
        .zip(base.timestamp.iter())
        .filter_map(|(((((open, high), low), close), volume), date)| {
            Some(
                PriceBar {
                    date: *date,
                    open: (*open)?,
                    high: (*high)?,
                    low: (*low)?,
                    close: (*close)?,
                    volume: (*volume)?,
                }
                .rounded(),
            )
        })
        .collect();

    Ok(Quote {
        series: PriceSeries::new(ticker, bars),
        name,
    })
}

///////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Deserialization
//
///////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Deserialize, Debug)]
pub struct PriceHistory {
    pub chart: PriceResponse,
}

#[derive(Deserialize, Debug)]
pub struct PriceResponse {
    pub result: Option<Vec<PriceCategories>>,
    pub error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
pub struct ChartError {
    pub code: String,
    pub description: Option<String>,
}

impl ChartError {
    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("no description")
    }
}

#[derive(Deserialize, Debug)]
pub struct PriceCategories {
    #[serde(default)]
    pub meta: Meta,
    // absent when the range holds no trading days
    #[serde(default, deserialize_with = "de_timestamps_to_naive_date")]
    pub timestamp: Vec<NaiveDate>,
    pub indicators: Indicators,
}

#[derive(Deserialize, Debug, Default)]
pub struct Meta {
    pub symbol: Option<String>,
    #[serde(rename = "longName")]
    pub long_name: Option<String>,
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
}

impl Meta {
    pub fn display_name(&self) -> Option<String> {
        self.long_name
            .as_ref()
            .or(self.short_name.as_ref())
            .filter(|name| !name.trim().is_empty())
            .cloned()
    }
}

#[derive(Deserialize, Debug)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteColumns>,
}

#[derive(Deserialize, Debug, Default)]
pub struct QuoteColumns {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "de_nullable_volume")]
    pub volume: Vec<Option<i64>>,
}
