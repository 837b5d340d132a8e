use chrono::NaiveDate;
use std::time::Duration;

/// Runtime settings shared by every request.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// First day of the charted history.
    pub start_date: NaiveDate,

    /// How long a failed update waits before answering.
    pub error_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2017, 1, 1).unwrap_or_default(),
            error_delay: Duration::from_secs(1),
        }
    }
}
