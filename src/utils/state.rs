use reqwest::Client;
use std::time::Duration;

use crate::models::error::Result;
use crate::utils::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http_client: Client,
}

impl AppState {
    pub fn init(config: Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            config,
            http_client,
        })
    }
}
