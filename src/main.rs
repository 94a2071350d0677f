//! # Tweetmojo
//!
//! Reads the latest tweet of a Twitter/X user and, if it is an offer tweet, creates the
//! matching Instamojo offer.
//!
//! ## Usage
//!
//! ```bash
//! tweetmojo <twitter_username>
//! ```
//!
//! ## Environment Variables
//!
//! - `TWITTER_CONSUMER_KEY`, `TWITTER_CONSUMER_SECRET`, `TWITTER_TOKEN`,
//!   `TWITTER_TOKEN_SECRET`: Twitter OAuth 1.0a credentials
//! - `MOJO_APPID`, `MOJO_USERNAME`, `MOJO_PASSWORD`: Instamojo credentials
//! - `TWEETMOJO_LOG_FILE`: log file path (defaults to `debug.log`)
//! - `RUST_LOG`: log filter (defaults to `debug`)

use log::{debug, error, info};
use std::fs::OpenOptions;

use tweetmojo::{
    get_log_file, run_offer, AppConfig, Error, InstamojoClient, Result, TwitterClient,
};

/// Sends all log output to `path`, appending to whatever is already there.
fn init_logging(path: &str) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Runs one offer pass for the username given on the command line.
async fn run() -> Result<()> {
    let username = std::env::args()
        .nth(1)
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| Error::Usage("Please mention the username.".to_string()))?;
    debug!("username: {}", username);

    let config = AppConfig::from_env()?;
    let twitter = TwitterClient::new(config.twitter.clone(), &config.twitter_api_base);
    let mut instamojo =
        InstamojoClient::new(&config.instamojo.app_id, &config.instamojo_api_base);

    let report = run_offer(&username, &config.instamojo, &twitter, &mut instamojo).await?;

    println!("{}", serde_json::to_string_pretty(&report.payload)?);
    println!("{}", serde_json::to_string_pretty(&report.response)?);
    Ok(())
}

/// Main entry point for tweetmojo.
///
/// Sets up file logging, then performs exactly one run on a single-threaded runtime.
/// Any error is logged, printed to stderr and turned into exit status 1.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let log_file = get_log_file();
    if let Err(e) = init_logging(&log_file) {
        eprintln!("Failed to open log file {}: {}", log_file, e);
        std::process::exit(1);
    }

    match run().await {
        Ok(()) => info!("Offer run completed"),
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
