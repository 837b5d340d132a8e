pub mod api;
pub mod de;
pub mod models;
pub mod yahoo_finance;

pub mod prelude {
    pub use crate::api::QuoteFetcher;
    pub use crate::models::{PriceBar, PriceSeries, Quote, QuoteRequest};
    pub use crate::yahoo_finance::YahooFinance;

    /// Browser-like agent; Yahoo rejects requests without one.
    pub const DEFAULT_USER_AGENT: &str =
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko)";

    pub fn build_client(user_agent: &str) -> anyhow::Result<reqwest::Client> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(user_agent)
            .build()?;
        Ok(client)
    }
}
