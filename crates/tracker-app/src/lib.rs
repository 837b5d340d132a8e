pub mod callbacks;
pub mod change;
pub mod component;
pub mod config;
pub mod layout;
pub mod router;
pub mod server;
pub mod summary;

pub use config::AppConfig;
pub use server::{serve, ServerConfig};
pub use summary::{build_summary, SummaryError, SummaryOutcome};
