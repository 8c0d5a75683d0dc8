use http::StatusCode;
use reqwest::{Client, Url};
use tracing::{debug, info, warn};

use crate::{
    handlers::fetcher::{save_ref, RemoteStore},
    models::{
        error::{Error, Result},
        message::{CreatedMessage, WebhookPayload},
    },
    utils::state::AppState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishState {
    NoPriorMessage,
    HasPriorRef(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Edited(String),
    Created(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum EditResult {
    Edited,
    NotFound,
}

pub struct Publisher {
    client: Client,
    webhook_url: Url,
}

impl Publisher {
    pub fn new(client: Client, webhook_url: &str) -> Result<Self> {
        let webhook_url = Url::parse(webhook_url)
            .map_err(|err| Error::Config(format!("DISCORD_WEBHOOK is not a valid url: {err}")))?;
        if webhook_url.cannot_be_a_base() {
            return Err(Error::Config("DISCORD_WEBHOOK must be an http(s) url".to_string()));
        }
        Ok(Self {
            client,
            webhook_url,
        })
    }

    pub fn from_state(state: &AppState) -> Result<Self> {
        Self::new(state.http_client.clone(), &state.config.discord_webhook)
    }

    /// `{webhook}/messages/{id}`, keeping any query the webhook carries.
    fn message_url(&self, id: &str) -> Url {
        let mut url = self.webhook_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["messages", id]);
        }
        url
    }

    pub async fn edit_message(&self, id: &str, payload: &WebhookPayload) -> Result<EditResult> {
        let res = self
            .client
            .patch(self.message_url(id))
            .json(payload)
            .send()
            .await?;

        match res.status() {
            StatusCode::NOT_FOUND => Ok(EditResult::NotFound),
            status if status.is_success() => Ok(EditResult::Edited),
            status => {
                let body = res.text().await.unwrap_or_default();
                Err(Error::publish_status("edit", status, &body))
            }
        }
    }

    /// `wait=true` makes the webhook answer with the created message.
    pub async fn create_message(&self, payload: &WebhookPayload) -> Result<String> {
        let res = self
            .client
            .post(self.webhook_url.clone())
            .query(&[("wait", "true")])
            .json(payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(Error::publish_status("create", status, &body));
        }

        let created: CreatedMessage = res.json().await?;
        created
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::Publish("create response did not include a message id".to_string()))
    }
}

pub async fn publish(
    publisher: &Publisher,
    store: &dyn RemoteStore,
    ref_path: &str,
    saved_ref: Option<String>,
    payload: &WebhookPayload,
) -> Result<PublishOutcome> {
    let mut state = match saved_ref {
        Some(id) => PublishState::HasPriorRef(id),
        None => PublishState::NoPriorMessage,
    };

    loop {
        debug!(?state, "publishing leaderboard");
        state = match state {
            PublishState::HasPriorRef(id) => match publisher.edit_message(&id, payload).await? {
                EditResult::Edited => return Ok(PublishOutcome::Edited(id)),
                EditResult::NotFound => {
                    warn!(message_id = %id, "saved message is gone, posting a new one");
                    PublishState::NoPriorMessage
                }
            },
            PublishState::NoPriorMessage => {
                let id = publisher.create_message(payload).await?;
                info!(message_id = %id, "posted new leaderboard message");
                save_ref(store, ref_path, &id).await?;
                return Ok(PublishOutcome::Created(id));
            }
        };
    }
}
