use chrono::{DateTime, SecondsFormat, Utc};

use crate::{
    models::{
        leaderboard::LapEntry,
        message::{Embed, EmbedField, EmbedFooter, EmbedImage, WebhookPayload},
    },
    utils::{
        config::Config,
        race_utils::{format_lap_time, position_marker, truncate_name, NAME_WIDTH},
    },
};

const TITLE: &str = "🏆 KMR Leaderboard";
const COLOR: u32 = 0xFF0000;
const EMPTY_COLUMN: &str = "—";
const DATA_SOURCE: &str = "Data by AC Elite Leaderboard";

#[derive(Debug, Clone, Default)]
pub struct Branding {
    pub server_url: Option<String>,
    pub logo_url: Option<String>,
}

impl Branding {
    pub fn from_config(config: &Config) -> Self {
        Self {
            server_url: config.server_url.clone(),
            logo_url: config.logo_url.clone(),
        }
    }
}

pub fn render(
    ranked: &[LapEntry],
    track: &str,
    car: &str,
    generated_at: DateTime<Utc>,
    branding: &Branding,
) -> WebhookPayload {
    let mut positions = Vec::with_capacity(ranked.len());
    let mut drivers = Vec::with_capacity(ranked.len());
    let mut times = Vec::with_capacity(ranked.len());

    for (idx, lap) in ranked.iter().enumerate() {
        positions.push(position_marker(idx + 1));
        drivers.push(truncate_name(&lap.name, NAME_WIDTH));
        times.push(format_lap_time(lap.lap_time_ms));
    }

    let mut description = format!("**Track:** `{track}`\n**Car:** `{car}`");
    if ranked.is_empty() {
        description.push_str("\n\nNo lap times recorded yet.");
    }

    let embed = Embed {
        title: TITLE.to_string(),
        url: branding.server_url.clone(),
        color: COLOR,
        description,
        fields: vec![
            column("Pos", &positions),
            column("Driver", &drivers),
            column("Time", &times),
        ],
        thumbnail: branding
            .logo_url
            .clone()
            .map(|url| EmbedImage { url }),
        footer: EmbedFooter {
            text: format!(
                "Last updated: {} • {DATA_SOURCE}",
                generated_at.format("%Y-%m-%d %H:%M (UTC)")
            ),
        },
        timestamp: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    };

    WebhookPayload {
        embeds: vec![embed],
    }
}

fn column(name: &str, rows: &[String]) -> EmbedField {
    let value = if rows.is_empty() {
        EMPTY_COLUMN.to_string()
    } else {
        rows.join("\n")
    };
    EmbedField {
        name: name.to_string(),
        value,
        inline: true,
    }
}
