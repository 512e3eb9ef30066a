// In app/src/main.rs

use anyhow::{Context, Result};
use clap::Parser;
use engine::{Pipeline, PipelineOutcome};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Classifies recent news headlines about a company with a language model and \
                  combines the result with the latest daily price move into a Buy, Sell or Keep decision."
)]
struct Cli {
    /// Company name used as the news search query (e.g., "Apple").
    #[arg(long)]
    company: String,

    /// Ticker symbol used for the price history (e.g., "AAPL").
    #[arg(long)]
    ticker: String,
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    println!("\nProject AI Investing - Using LLMs for Investment Analytics");

    let settings = app_config::load_settings().context("Failed to load settings")?;
    let rust_log = std::env::var("RUST_LOG").ok();
    init_tracing(log_filter(&settings.app.log_level, rust_log.as_deref())?);
    tracing::info!(environment = %settings.app.environment, "Application settings loaded successfully.");

    let pipeline = Pipeline::from_settings(&settings).context("Failed to build API clients")?;

    println!("\nThe AI Investing Robot is Working. Please wait!\n");
    let outcome = pipeline.run(&cli.company, &cli.ticker).await?;

    print_report(&outcome);
    Ok(())
}

/// Builds the log filter. `RUST_LOG` wins when set; otherwise the configured
/// level applies, with the HTTP stack held at WARN.
fn log_filter(log_level: &str, rust_log: Option<&str>) -> Result<EnvFilter> {
    let directives = match rust_log {
        Some(env) if !env.trim().is_empty() => env.to_string(),
        _ => format!("{log_level},hyper=warn,hyper_util=warn,reqwest=warn"),
    };
    EnvFilter::try_new(&directives).with_context(|| format!("Invalid log filter `{directives}`"))
}

/// Logs go to stderr so stdout carries only the report.
fn init_tracing(filter: EnvFilter) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);
    tracing_subscriber::registry().with(fmt_layer).init();
}

/// Helper function to print the final decision summary.
fn print_report(outcome: &PipelineOutcome) {
    println!("Number of news items retrieved: {}", outcome.headlines.len());

    match &outcome.sentiments {
        Some(sentiments) => {
            println!();
            for (label, headline) in sentiments.iter().zip(&outcome.headlines) {
                println!("Sentiment: {} \t {}", label, headline);
            }
            if let (Some(avg), Some(change)) = (outcome.avg_sentiment, outcome.recent_change) {
                println!("\nAverage sentiment: {:.2} | Last daily change: {:+.2}%", avg, change * 100.0);
            }
        }
        None => println!("No news was retrieved."),
    }

    println!("\nInvestment Decision: {}", outcome.decision);
    println!("\nThanks for Using Sentiment Stocks AI - Come Back Soon!\n");
}
