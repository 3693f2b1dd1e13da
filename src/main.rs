//! Counts the ballots of a voting and stores the result on the voting.
//!
//! usage:
//!   count-voting --name NAME [--message MESSAGE] [--winner WINNER]
//!                [--hls URL --mp4 URL [--youtube URL] [--subtitles URL] [--poster URL]]
//!                [--no-freeze] [--verbose]
mod args;
mod config;
mod db;
mod error;
mod models;
mod stats;
mod tasks;
mod voting;

use args::Args;
use clap::Parser;
use config::Config;
use db::Database;
use error::CountError;
use log::{error, info};
use models::CountRequest;
use stats::PostgresVoteStatistics;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    // Every rejected input exits with 1, not clap's default of 2
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(args::exit_code(&e));
        }
    };

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    if let Err(e) = run(args).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), CountError> {
    // Input is validated before any connection is made
    let request = CountRequest::try_from(args)?;
    let config = Config::from_env()?;
    let database = Database::connect(&config).await?;

    info!("counting vote...");
    let stored = tasks::count_voting::count_voting(database.pool(), &PostgresVoteStatistics, &request).await;
    database.close().await;
    let stored = stored?;

    info!("finished! The result is:");
    println!("{}", serde_json::to_string_pretty(&stored)?);
    Ok(())
}
