use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    handlers::{
        fetcher::{fetch_leaderboard, get_saved_ref, RemoteStore},
        publisher::{publish, PublishOutcome, Publisher},
        ranker::rank,
        renderer::{render, Branding},
    },
    models::{error::Result, message::WebhookPayload},
    utils::{
        config::{CAR, TOP_N, TRACK},
        state::AppState,
    },
};

#[derive(Debug)]
pub enum RunOutcome {
    Published(PublishOutcome),
    DryRun(WebhookPayload),
}

pub async fn run(state: &AppState, store: &dyn RemoteStore, now: DateTime<Utc>) -> Result<RunOutcome> {
    let config = &state.config;

    let doc = fetch_leaderboard(store, &config.leaderboard_file).await?;
    let ranked = rank(&doc, TRACK, CAR, TOP_N);
    info!(entries = ranked.len(), track = TRACK, car = CAR, "ranked lap times");

    let payload = render(&ranked, TRACK, CAR, now, &Branding::from_config(config));
    if config.dry_run {
        return Ok(RunOutcome::DryRun(payload));
    }

    let saved_ref = get_saved_ref(store, &config.message_id_file).await?;
    let publisher = Publisher::from_state(state)?;
    let outcome = publish(
        &publisher,
        store,
        &config.message_id_file,
        saved_ref,
        &payload,
    )
    .await?;

    Ok(RunOutcome::Published(outcome))
}
