use crate::models::{Quote, QuoteRequest};
use anyhow::Result;
use async_trait::async_trait;

/// Source of historical daily prices.
///
/// An implementation answers a [`QuoteRequest`] with the bars it found, in ascending date order,
/// and the company's display name when the provider knows it. "No data for this symbol" is an
/// empty series, not an error; `Err` is reserved for transport and payload failures.
///
/// ```rust
/// use async_trait::async_trait;
/// use tracker_fetch::prelude::*;
///
/// struct Offline;
///
/// #[async_trait]
/// impl QuoteFetcher for Offline {
///     async fn fetch_quote(&self, request: &QuoteRequest) -> anyhow::Result<Quote> {
///         Ok(Quote::empty(&request.ticker))
///     }
/// }
/// ```
#[async_trait]
pub trait QuoteFetcher: Send + Sync {
    async fn fetch_quote(&self, request: &QuoteRequest) -> Result<Quote>;
}

