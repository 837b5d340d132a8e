use crate::change::{fmt_decimal, ChangeResult, StyleTag};
use crate::config::AppConfig;
use chrono::Utc;
use log::{debug, trace};
use serde::Serialize;
use thiserror::Error;
use tracker_fetch::prelude::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Ticker summary: fetch -> last two closes -> change -> view model
//
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Why a summary could not be produced; the caller keeps showing whatever it showed before.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("failed to fetch quote: {0:#}")]
    Fetch(#[from] anyhow::Error),

    #[error("[{ticker}] needs at least 2 bars to compute a change, found {bars}")]
    InsufficientData { ticker: String, bars: usize },

    #[error("[{ticker}] previous close is zero; percent change is undefined")]
    ZeroBasePrice { ticker: String },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummaryOutcome {
    Summary(SummaryView),
    NotFound(NotFoundView),
}

/// Everything the summary layout shows for one ticker.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub ticker: String,
    pub name: String,
    pub series: PriceSeries,
    pub latest: PriceBar,
    pub change: ChangeResult,
    pub change_text: String,
    pub style: StyleTag,
}

impl SummaryView {
    pub fn close_text(&self) -> String {
        fmt_decimal(self.latest.close)
    }

    pub fn open_text(&self) -> String {
        fmt_decimal(self.latest.open)
    }

    pub fn high_text(&self) -> String {
        fmt_decimal(self.latest.high)
    }

    pub fn low_text(&self) -> String {
        fmt_decimal(self.latest.low)
    }

    pub fn volume_text(&self) -> String {
        self.latest.volume.to_string()
    }

    /// Chart title, e.g. `Apple Inc. (AAPL)`.
    pub fn title(&self) -> String {
        format!("{} ({})", self.name, self.ticker)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NotFoundView {
    pub ticker: String,
}

/// Uppercase symbol with surrounding whitespace removed.
pub fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}

pub async fn build_summary(
    fetcher: &dyn QuoteFetcher,
    config: &AppConfig,
    raw_ticker: &str,
) -> Result<SummaryOutcome, SummaryError> {
    let ticker = normalize_ticker(raw_ticker);
    if ticker.is_empty() {
        trace!("Blank ticker input; nothing to fetch");
        return Ok(SummaryOutcome::NotFound(NotFoundView { ticker }));
    }

    let request = QuoteRequest::new(&ticker, config.start_date, Utc::now());
    let quote = fetcher.fetch_quote(&request).await?;
    summarize(&ticker, quote)
}

/// Build the view model from a fetched quote.
pub fn summarize(ticker: &str, quote: Quote) -> Result<SummaryOutcome, SummaryError> {
    let Quote { series, name } = quote;
    if series.is_empty() {
        debug!("[{ticker}] no data found");
        return Ok(SummaryOutcome::NotFound(NotFoundView {
            ticker: ticker.to_string(),
        }));
    }

    let (previous, latest) = match (series.second_last(), series.last()) {
        (Some(previous), Some(latest)) => (previous.clone(), latest.clone()),
        _ => {
            return Err(SummaryError::InsufficientData {
                ticker: ticker.to_string(),
                bars: series.len(),
            })
        }
    };

    let change = ChangeResult::new(previous.close, latest.close).ok_or_else(|| {
        SummaryError::ZeroBasePrice {
            ticker: ticker.to_string(),
        }
    })?;
    let (change_text, style) = change.display();
    debug!(
        "[{ticker}] close {} -> {} ({change_text}, {:?})",
        previous.close, latest.close, change.direction
    );

    Ok(SummaryOutcome::Summary(SummaryView {
        ticker: ticker.to_string(),
        name: name.unwrap_or_else(|| ticker.to_string()),
        series,
        latest,
        change,
        change_text,
        style,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::{format_change, percent_change};
    use chrono::NaiveDate;

    fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close - 1.0,
            high: close + 2.0,
            low: close - 2.0,
            close,
            volume: 1_000 * day as i64,
        }
    }

    fn quote(closes: &[f64], name: Option<&str>) -> Quote {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, close)| bar(i as u32 + 1, *close))
            .collect();
        Quote {
            series: PriceSeries::new("AAPL", bars),
            name: name.map(str::to_string),
        }
    }

    fn unwrap_summary(outcome: SummaryOutcome) -> SummaryView {
        match outcome {
            SummaryOutcome::Summary(view) => view,
            other => panic!("expected a summary, got {other:?}"),
        }
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_ticker("aapl"), "AAPL");
        assert_eq!(normalize_ticker("  msft \n"), "MSFT");
        assert_eq!(normalize_ticker("brk-b"), "BRK-B");
    }

    #[test]
    fn empty_series_is_not_found() {
        let outcome = summarize("AAPL", Quote::empty("AAPL")).unwrap();
        assert_eq!(
            outcome,
            SummaryOutcome::NotFound(NotFoundView {
                ticker: "AAPL".into()
            })
        );
    }

    #[test]
    fn latest_bar_and_change() {
        let view = unwrap_summary(summarize("AAPL", quote(&[148.5, 150.0, 153.0], None)).unwrap());
        assert_eq!(view.close_text(), "153.0");
        assert_eq!(view.open_text(), "152.0");
        assert_eq!(view.high_text(), "155.0");
        assert_eq!(view.low_text(), "151.0");
        assert_eq!(view.volume_text(), "3000");
        assert_eq!(view.series.len(), 3);

        let expected = format_change(percent_change(150.0, 153.0));
        assert_eq!((view.change_text.clone(), view.style), expected);
    }

    #[test]
    fn name_falls_back_to_ticker() {
        let view = unwrap_summary(summarize("AAPL", quote(&[1.0, 2.0], None)).unwrap());
        assert_eq!(view.name, "AAPL");
        assert_eq!(view.title(), "AAPL (AAPL)");

        let view = unwrap_summary(summarize("AAPL", quote(&[1.0, 2.0], Some("Apple Inc."))).unwrap());
        assert_eq!(view.title(), "Apple Inc. (AAPL)");
    }

    #[test]
    fn single_bar_is_insufficient() {
        let err = summarize("NEWCO", quote(&[10.0], None)).unwrap_err();
        assert!(matches!(
            err,
            SummaryError::InsufficientData { bars: 1, .. }
        ));
    }

    #[test]
    fn zero_previous_close_is_rejected() {
        let err = summarize("ZERO", quote(&[0.0, 1.0], None)).unwrap_err();
        assert!(matches!(err, SummaryError::ZeroBasePrice { .. }));
        assert!(err.to_string().contains("ZERO"));
    }
}
