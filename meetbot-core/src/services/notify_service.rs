//! The notification orchestrator: resumes a user's conversation out of
//! band, branches on the submitted intent, and keeps the favorites
//! availability card synchronized in place instead of sending new copies.
//!
//! Every failure here is terminal for the current trigger - the user gets
//! at most one generic message and nothing is retried. Retry belongs to
//! whoever fires the trigger, not to this flow.

use std::sync::Arc;

use chrono_tz::Tz;
use tracing::{debug, error, info, warn};

use meetbot_common::error::Error;
use meetbot_common::models::{
    ActivityRecord, Attachment, ConversationReference, FavoriteRoom, MeetingSubmit, RoomSchedule,
    UserSettings, MEETING_FROM_TASK_MODULE,
};
use meetbot_common::traits::{
    ActivityMappingRepository, AvailabilityProvider, ConversationChannel, FavoriteRoomRepository,
    RoomFilter, TokenProvider, UserSettingsRepository,
};

use crate::cards;
use crate::config::NotifyConfig;
use crate::registry::ConversationRegistry;
use crate::services::card_state::{CardEvent, CardState};

pub const GENERIC_FAILURE_TEXT: &str = "Something went wrong. Please try again later.";
pub const CARD_NOT_FOUND_TEXT: &str =
    "Your favorites card could not be located. It may have been removed from the conversation.";

pub struct NotifyService {
    registry: Arc<ConversationRegistry>,
    channel: Arc<dyn ConversationChannel>,
    settings_repo: Arc<dyn UserSettingsRepository>,
    favorites_repo: Arc<dyn FavoriteRoomRepository>,
    activity_repo: Arc<dyn ActivityMappingRepository>,
    availability: Arc<dyn AvailabilityProvider>,
    room_filter: Arc<dyn RoomFilter>,
    tokens: Arc<dyn TokenProvider>,
    config: NotifyConfig,
}

impl NotifyService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        registry: Arc<ConversationRegistry>,
        channel: Arc<dyn ConversationChannel>,
        settings_repo: Arc<dyn UserSettingsRepository>,
        favorites_repo: Arc<dyn FavoriteRoomRepository>,
        activity_repo: Arc<dyn ActivityMappingRepository>,
        availability: Arc<dyn AvailabilityProvider>,
        room_filter: Arc<dyn RoomFilter>,
        tokens: Arc<dyn TokenProvider>,
        config: NotifyConfig,
    ) -> Self {
        Self {
            registry,
            channel,
            settings_repo,
            favorites_repo,
            activity_repo,
            availability,
            room_filter,
            tokens,
            config,
        }
    }

    /// Entry point for one inbound trigger. Resolves the user's channel,
    /// resumes it, then branches on the submitted intent token.
    pub async fn handle_submit(&self, submit: MeetingSubmit) -> Result<(), Error> {
        let reference = self
            .registry
            .get(&submit.user_id)
            .ok_or_else(|| Error::ChannelUnavailable(submit.user_id.clone()))?;

        self.channel.resume(&self.config.app_id, &reference).await?;

        let settings = match self.settings_repo.get(&submit.user_id).await? {
            Some(settings) => settings,
            None => {
                warn!("user settings missing for {}", submit.user_id);
                self.channel.send_text(&reference, GENERIC_FAILURE_TEXT).await?;
                return Err(Error::SettingsMissing(submit.user_id.clone()));
            }
        };

        if submit.text.eq_ignore_ascii_case(MEETING_FROM_TASK_MODULE) {
            self.confirm_booking(&reference, &settings, &submit).await
        } else {
            let correlation_id = submit.correlation_id().unwrap_or_default().to_string();
            self.refresh_favorites_card(&reference, &settings, &submit.user_id, &correlation_id)
                .await
        }
    }

    /// Booking just succeeded: swap the card the task module was opened
    /// from for a static success card, then confirm in plain text. A
    /// successful booking always has a prior record by construction, so a
    /// missing one is only logged - never answered with a fresh card.
    async fn confirm_booking(
        &self,
        reference: &ConversationReference,
        settings: &UserSettings,
        submit: &MeetingSubmit,
    ) -> Result<(), Error> {
        let tz = parse_timezone(settings)?;
        let attachment = cards::success_attachment(submit, tz);

        if let Some(correlation_id) = submit.correlation_id() {
            match self.activity_repo.get(&submit.user_id, correlation_id).await? {
                Some(record) => {
                    self.channel
                        .update_card(reference, &record.activity_id, attachment)
                        .await?;
                }
                None => {
                    warn!(
                        "{}",
                        Error::ActivityRecordMissing(correlation_id.to_string())
                    );
                }
            }
        }

        let text = match submit.room_name.as_deref() {
            Some(name) => format!("Meeting room {} is booked.", name),
            None => "Your meeting room is booked.".to_string(),
        };
        self.channel.send_text(reference, &text).await?;
        info!("booking confirmed for user {}", submit.user_id);
        Ok(())
    }

    /// Rebuilds the favorites-availability card and synchronizes it in
    /// place. Strictly sequential: each step's result gates the next.
    async fn refresh_favorites_card(
        &self,
        reference: &ConversationReference,
        settings: &UserSettings,
        user_id: &str,
        correlation_id: &str,
    ) -> Result<(), Error> {
        let tz = parse_timezone(settings)?;

        let token = match self.tokens.user_token(user_id).await {
            Ok(token) => token,
            Err(e) => {
                warn!("token lookup failed for {}: {}", user_id, e);
                self.channel.send_text(reference, GENERIC_FAILURE_TEXT).await?;
                return Err(e);
            }
        };

        let rooms = self.favorites_repo.list(user_id).await?;
        let rooms = self.room_filter.filter_rooms(&token, rooms).await?;

        // The query window stays UTC; the timezone matters only for what
        // the card displays.
        let window = self.config.window();

        let schedules = if rooms.is_empty() {
            // Zero favorites is a valid terminal state: render the empty
            // card rather than failing.
            Vec::new()
        } else {
            let emails: Vec<String> = rooms.iter().map(|r| r.room_email.clone()).collect();
            match self
                .availability
                .rooms_schedule(&window, &emails, &token)
                .await
            {
                Ok(schedules) => schedules,
                Err(e) => {
                    error!("availability query failed for {}: {}", user_id, e);
                    self.channel.send_text(reference, GENERIC_FAILURE_TEXT).await?;
                    return Err(e);
                }
            }
        };

        let schedules = merge_room_metadata(schedules, &rooms);
        let attachment =
            cards::favorite_rooms_list_attachment(&schedules, &window, tz, correlation_id);

        self.deliver(reference, user_id, correlation_id, attachment)
            .await
    }

    /// The idempotent delivery decision. A prior record means the card is
    /// updated in place and the mapping re-written with the id the update
    /// returned (the channel may reassign it). No record means the card is
    /// orphaned: the user gets a notice and nothing is written - a fresh
    /// card is deliberately not sent.
    async fn deliver(
        &self,
        reference: &ConversationReference,
        user_id: &str,
        correlation_id: &str,
        attachment: Attachment,
    ) -> Result<(), Error> {
        let record = self.activity_repo.get(user_id, correlation_id).await?;
        let event = if record.is_some() {
            CardEvent::RefreshHit
        } else {
            CardEvent::RefreshMiss
        };

        match (CardState::Sent.transition(event), record) {
            (CardState::Updated, Some(record)) => {
                let new_id = self
                    .channel
                    .update_card(reference, &record.activity_id, attachment)
                    .await?;
                self.activity_repo
                    .put(&ActivityRecord {
                        user_id: user_id.to_string(),
                        correlation_id: correlation_id.to_string(),
                        activity_id: new_id,
                    })
                    .await?;
                debug!("card {}/{} updated in place", user_id, correlation_id);
                Ok(())
            }
            (state, _) => {
                warn!(
                    "card {}/{} is {:?}; sending notice instead of a new card",
                    user_id, correlation_id, state
                );
                self.channel.send_text(reference, CARD_NOT_FOUND_TEXT).await?;
                Ok(())
            }
        }
    }
}

/// Copies display metadata from the favorite list onto each returned
/// schedule, matching on the contact address the query was keyed by.
/// Schedules with no matching favorite keep `None` metadata; the renderer
/// handles those.
pub fn merge_room_metadata(
    mut schedules: Vec<RoomSchedule>,
    rooms: &[FavoriteRoom],
) -> Vec<RoomSchedule> {
    for schedule in &mut schedules {
        if let Some(room) = rooms.iter().find(|r| r.room_email == schedule.schedule_id) {
            schedule.display_name = Some(room.display_name.clone());
            schedule.building_name = Some(room.building_name.clone());
        }
    }
    schedules
}

fn parse_timezone(settings: &UserSettings) -> Result<Tz, Error> {
    settings
        .iana_timezone
        .parse::<Tz>()
        .map_err(|e| Error::Parse(format!("bad IANA timezone '{}': {}", settings.iana_timezone, e)))
}
