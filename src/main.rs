use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

mod config;
mod display;
mod error;
mod model;
mod pool;
mod ranking;
mod sources;
mod teams;

use config::Config;
use pool::{Credentials, PoolClient};
use sources::{EspnScoreboard, LinesSource, RecordsSource};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    if config.dry_run {
        info!("DRY RUN mode – picks will be printed but not submitted");
    }

    // One feed carries both lines and records; fetch the two views
    // concurrently through the source traits.
    let scoreboard = Arc::new(EspnScoreboard::new(Some(&config.scoreboard_url))?);
    let lines: Arc<dyn LinesSource> = scoreboard.clone();
    let standings: Arc<dyn RecordsSource> = scoreboard;
    info!(
        "Fetching {} and {}",
        lines.name(),
        standings.name()
    );
    let (raw_games, raw_records) =
        tokio::try_join!(lines.fetch_lines(), standings.fetch_records())?;
    info!(
        "Fetched {} games and {} standings rows",
        raw_games.len(),
        raw_records.len()
    );

    let records = teams::resolve_records(&raw_records)?;
    let games = raw_games
        .iter()
        .map(teams::resolve_game)
        .collect::<Result<Vec<_>, _>>()?;

    let picks = ranking::rank(games, &records, config.confidence_base)?;
    let week = ranking::week_number(&records);

    println!("{}", display::format_records(&records));
    println!();
    println!("{}", display::format_slate(&picks, &records));
    println!("\nWeek: {}\n", week);
    println!("{}", display::format_confidence(&picks));

    if config.dry_run {
        info!("Dry run complete, skipping submission");
        return Ok(());
    }

    let credentials = match (&config.username, &config.password) {
        (Some(username), Some(password)) => Credentials {
            username: username.clone(),
            password: password.clone(),
        },
        _ => {
            println!("\nEnter username and password to update picks.\n");
            Credentials::prompt()?
        }
    };

    println!("\nUpdating picks...");

    let client = PoolClient::new(&config.pool_url)?;
    client.login(&credentials).await?;

    let form = client.fetch_picksheet().await?;
    client
        .submit_picks(&form, &picks, config.tiebreaker_points)
        .await?;

    let review_path = client.fetch_review(config.pool_sheet_id, week).await?;
    info!("Pick review sheet saved to {}", review_path.display());
    if !config.no_browser {
        pool::open_in_browser(&review_path)?;
    }

    println!("Fin.");
    Ok(())
}
