use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, ServeArgs};
use dotenv::{dotenv, var};
use log::{info, trace, LevelFilter};
use std::sync::Arc;
use std::time::Duration;
use tracker_app::{build_summary, summary::SummaryOutcome, AppConfig, ServerConfig};
use tracker_fetch::prelude::*;

mod cli;

fn preprocess(level: LevelFilter) {
    // grant access to .env
    dotenv().ok();

    // initialise logger; RUST_LOG takes precedence over --log-level
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn provider() -> Result<YahooFinance> {
    let user_agent = var("USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
    Ok(YahooFinance::new(build_client(&user_agent)?))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    preprocess(cli.log_level.into());
    trace!("Command line input recorded: {cli:#?}");

    // cli framework:
    // "> tracker <COMMAND>"
    match cli.command {
        // "> tracker [serve --port 8050 ...]"
        None => serve(ServeArgs::default()).await?,
        Some(Commands::Serve(args)) => serve(args).await?,

        // "> tracker quote AAPL [--json]"
        // one-shot summary, printed to stdout
        Some(Commands::Quote {
            ticker,
            start_date,
            json,
        }) => {
            let config = AppConfig {
                start_date,
                ..Default::default()
            };
            let outcome = build_summary(&provider()?, &config, &ticker).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_outcome(&outcome);
            }
        }
    }

    Ok(())
}

async fn serve(args: ServeArgs) -> Result<()> {
    let config = AppConfig {
        start_date: args.start_date,
        error_delay: Duration::from_millis(args.error_delay_ms),
    };
    let server = ServerConfig {
        host: args.host,
        port: args.port,
        workers: args.workers,
        static_dir: args.static_dir,
        template_dir: args.template_dir,
    };
    info!("Price history starts {}", config.start_date);

    tracker_app::serve(server, config, Arc::new(provider()?)).await
}

fn print_outcome(outcome: &SummaryOutcome) {
    match outcome {
        SummaryOutcome::NotFound(view) => println!("No data found for ticker: {}", view.ticker),
        SummaryOutcome::Summary(view) => {
            println!("{}", view.title());
            println!("{:<8}{:>14}  {}", "Close", view.close_text(), view.change_text);
            println!("{:<8}{:>14}", "Open", view.open_text());
            println!("{:<8}{:>14}", "High", view.high_text());
            println!("{:<8}{:>14}", "Low", view.low_text());
            println!("{:<8}{:>14}", "Volume", view.volume_text());
            println!("{:<8}{:>14}", "Bars", view.series.len());
        }
    }
}
