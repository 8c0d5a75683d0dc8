use crate::models::error::{Error, Result};

pub const TRACK: &str = "ks_nurburgring_layout_gp_a";
pub const CAR: &str = "tatuusfa1";
pub const TOP_N: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub ftp_host: String,
    pub ftp_user: String,
    pub ftp_pass: String,
    pub discord_webhook: String,
    pub leaderboard_file: String,
    pub message_id_file: String,
    pub server_url: Option<String>,
    pub logo_url: Option<String>,
    pub log_level: String,
    pub http_timeout_secs: u64,
    pub ftp_timeout_secs: u64,
    pub dry_run: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.dry_run |= args.iter().any(|arg| arg == "--dry-run");
        Ok(config)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::config(key))
        };
        let optional = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let seconds = |key: &str| match optional(key) {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| Error::Config(format!("{key} is not a number: {raw}"))),
            None => Ok(30),
        };

        let dry_run = optional("DRY_RUN")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Config {
            ftp_host: required("FTP_HOST")?,
            ftp_user: required("FTP_USER")?,
            ftp_pass: required("FTP_PASS")?,
            discord_webhook: required("DISCORD_WEBHOOK")?
                .trim_end_matches('/')
                .to_string(),
            leaderboard_file: optional("LEADERBOARD_FILE")
                .unwrap_or_else(|| "leaderboard.json".to_string()),
            message_id_file: optional("MESSAGE_ID_FILE")
                .unwrap_or_else(|| "discord_message_id.txt".to_string()),
            server_url: optional("LEADERBOARD_SERVER_URL"),
            logo_url: optional("LEADERBOARD_LOGO_URL"),
            log_level: optional("LOG_LEVEL")
                .unwrap_or_else(|| "info".to_string())
                .to_lowercase(),
            http_timeout_secs: seconds("HTTP_TIMEOUT_SECS")?,
            ftp_timeout_secs: seconds("FTP_TIMEOUT_SECS")?,
            dry_run,
        })
    }
}
