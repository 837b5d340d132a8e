use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Defaults to `serve`.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Sets the level of logging (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the dashboard web server.
    Serve(ServeArgs),

    /// Print the latest summary for a ticker and exit.
    Quote {
        ticker: String,

        /// First day of the history window.
        #[arg(long, default_value = "2017-01-01")]
        start_date: NaiveDate,

        /// Print the full summary as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, default_value_t = 8050)]
    pub port: u16,

    /// Number of HTTP workers.
    #[arg(long, default_value_t = 1)]
    pub workers: usize,

    /// Directory served under `/static`.
    #[arg(long, default_value = "./static")]
    pub static_dir: PathBuf,

    /// Directory holding `index.html.tera`.
    #[arg(long, default_value = "./templates")]
    pub template_dir: PathBuf,

    /// First day of the charted history.
    #[arg(long, default_value = "2017-01-01")]
    pub start_date: NaiveDate,

    /// Pause before answering a failed update, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pub error_delay_ms: u64,
}

impl Default for ServeArgs {
    fn default() -> Self {
        // parse the defaults declared above
        ServeCli::parse_from(["serve"]).args
    }
}

#[derive(Parser, Debug)]
struct ServeCli {
    #[command(flatten)]
    args: ServeArgs,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
