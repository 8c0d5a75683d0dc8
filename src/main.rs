mod handlers;
mod models;
mod utils;

use std::error::Error;

use handlers::{
    fetcher::FtpStore,
    leaderboard::{run, RunOutcome},
    publisher::PublishOutcome,
};
use tracing::info;
use utils::{config::Config, logging, state::AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    let config = Config::init()?;
    logging::init(&config.log_level);
    info!("Configuration loaded successfully");

    let store = FtpStore::from_config(&config);
    let state = AppState::init(config)?;

    match run(&state, &store, chrono::Utc::now()).await? {
        RunOutcome::Published(PublishOutcome::Edited(id)) => println!("Edited message {id}"),
        RunOutcome::Published(PublishOutcome::Created(id)) => println!("Posted new message {id}"),
        RunOutcome::DryRun(payload) => println!("{}", serde_json::to_string_pretty(&payload)?),
    }

    Ok(())
}
