//! Bot Framework connector REST client. Sends go to
//! `POST {serviceUrl}/v3/conversations/{id}/activities`; in-place updates
//! go to `PUT .../activities/{activityId}` and hand back the id the channel
//! now knows the message by.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use meetbot_common::error::Error;
use meetbot_common::models::{Activity, Attachment, ConversationReference, ResourceResponse};
use meetbot_common::traits::ConversationChannel;

pub struct BotConnectorChannel {
    client: reqwest::Client,
    /// Service-to-service bearer token for the connector. Acquisition is
    /// outside this subsystem; `None` sends unauthenticated (emulator).
    bearer_token: Option<String>,
}

impl BotConnectorChannel {
    pub fn new(bearer_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            bearer_token,
        }
    }

    fn activities_url(&self, reference: &ConversationReference) -> String {
        format!(
            "{}/v3/conversations/{}/activities",
            reference.service_url.trim_end_matches('/'),
            reference.conversation_id
        )
    }

    async fn post_activity(
        &self,
        reference: &ConversationReference,
        activity: &Activity,
    ) -> Result<String, Error> {
        let mut request = self
            .client
            .post(self.activities_url(reference))
            .json(activity);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Error::ChannelResumeFailed(format!(
                "send returned {}",
                response.status()
            )));
        }
        let resource: ResourceResponse = response.json().await?;
        Ok(resource.id)
    }
}

#[async_trait]
impl ConversationChannel for BotConnectorChannel {
    async fn resume(
        &self,
        app_id: &str,
        reference: &ConversationReference,
    ) -> Result<(), Error> {
        // The reference was captured from an earlier inbound activity and
        // may be arbitrarily stale; its service URL must still parse before
        // anything is driven through it.
        Url::parse(&reference.service_url).map_err(|e| {
            Error::ChannelResumeFailed(format!(
                "bad service url '{}': {}",
                reference.service_url, e
            ))
        })?;
        debug!(
            "resuming conversation {} for app {}",
            reference.conversation_id, app_id
        );
        Ok(())
    }

    async fn send_text(
        &self,
        reference: &ConversationReference,
        text: &str,
    ) -> Result<String, Error> {
        self.post_activity(reference, &Activity::message_text(text))
            .await
    }

    async fn send_card(
        &self,
        reference: &ConversationReference,
        attachment: Attachment,
    ) -> Result<String, Error> {
        self.post_activity(reference, &Activity::message_attachment(attachment))
            .await
    }

    async fn update_card(
        &self,
        reference: &ConversationReference,
        activity_id: &str,
        attachment: Attachment,
    ) -> Result<String, Error> {
        let mut activity = Activity::message_attachment(attachment);
        activity.id = Some(activity_id.to_string());

        let url = format!("{}/{}", self.activities_url(reference), activity_id);
        let mut request = self.client.put(url).json(&activity);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Error::ChannelResumeFailed(format!(
                "update returned {}",
                response.status()
            )));
        }
        let resource: ResourceResponse = response.json().await?;
        Ok(resource.id)
    }
}
