// File: meetbot-core/tests/notify_service_tests.rs

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use meetbot_common::error::Error;
use meetbot_common::models::{
    Attachment, AvailabilityWindow, BusySlot, ConversationReference, FavoriteRoom, MeetingSubmit,
    RoomSchedule, UserSettings, MEETING_FROM_TASK_MODULE,
};
use meetbot_common::traits::{
    ActivityMappingRepository, AvailabilityProvider, ConversationChannel, FavoriteRoomRepository,
    UserSettingsRepository,
};
use meetbot_core::config::NotifyConfig;
use meetbot_core::registry::ConversationRegistry;
use meetbot_core::repositories::memory::{
    InMemoryActivityMappingRepository, InMemoryFavoriteRoomRepository, InMemoryTokenProvider,
    InMemoryUserSettingsRepository, PassthroughRoomFilter,
};
use meetbot_core::services::notify_service::{
    merge_room_metadata, NotifyService, CARD_NOT_FOUND_TEXT, GENERIC_FAILURE_TEXT,
};

const USER: &str = "user-1";

/// A mock channel that records everything pushed through it and hands back
/// predictable message ids.
#[derive(Default)]
struct RecordingChannel {
    texts: Mutex<Vec<String>>,
    cards: Mutex<Vec<Attachment>>,
    updates: Mutex<Vec<(String, Attachment)>>,
    send_counter: AtomicU32,
    update_counter: AtomicU32,
}

#[async_trait]
impl ConversationChannel for RecordingChannel {
    async fn resume(
        &self,
        _app_id: &str,
        _reference: &ConversationReference,
    ) -> Result<(), Error> {
        Ok(())
    }

    async fn send_text(
        &self,
        _reference: &ConversationReference,
        text: &str,
    ) -> Result<String, Error> {
        self.texts.lock().unwrap().push(text.to_string());
        let n = self.send_counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("send-{}", n))
    }

    async fn send_card(
        &self,
        _reference: &ConversationReference,
        attachment: Attachment,
    ) -> Result<String, Error> {
        self.cards.lock().unwrap().push(attachment);
        let n = self.send_counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("send-{}", n))
    }

    async fn update_card(
        &self,
        _reference: &ConversationReference,
        activity_id: &str,
        attachment: Attachment,
    ) -> Result<String, Error> {
        self.updates
            .lock()
            .unwrap()
            .push((activity_id.to_string(), attachment));
        let n = self.update_counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("update-{}", n))
    }
}

/// Settings repo wrapper that counts reads, so tests can prove no store
/// call happened when the channel was unavailable.
#[derive(Default)]
struct CountingSettingsRepo {
    inner: InMemoryUserSettingsRepository,
    reads: AtomicU32,
}

#[async_trait]
impl UserSettingsRepository for CountingSettingsRepo {
    async fn get(&self, user_id: &str) -> Result<Option<UserSettings>, Error> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get(user_id).await
    }

    async fn upsert(&self, settings: &UserSettings) -> Result<(), Error> {
        self.inner.upsert(settings).await
    }
}

/// Returns the same schedules on every call.
#[derive(Default)]
struct StaticAvailability {
    schedules: Vec<RoomSchedule>,
    calls: AtomicU32,
}

#[async_trait]
impl AvailabilityProvider for StaticAvailability {
    async fn rooms_schedule(
        &self,
        _window: &AvailabilityWindow,
        _room_emails: &[String],
        _token: &str,
    ) -> Result<Vec<RoomSchedule>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.schedules.clone())
    }
}

struct FailingAvailability;

#[async_trait]
impl AvailabilityProvider for FailingAvailability {
    async fn rooms_schedule(
        &self,
        _window: &AvailabilityWindow,
        _room_emails: &[String],
        _token: &str,
    ) -> Result<Vec<RoomSchedule>, Error> {
        Err(Error::AvailabilityQueryFailed(
            "schedule service unavailable".to_string(),
        ))
    }
}

struct Harness {
    service: NotifyService,
    registry: Arc<ConversationRegistry>,
    channel: Arc<RecordingChannel>,
    settings: Arc<CountingSettingsRepo>,
    favorites: Arc<InMemoryFavoriteRoomRepository>,
    activity: Arc<InMemoryActivityMappingRepository>,
}

fn build_harness(availability: Arc<dyn AvailabilityProvider>) -> Harness {
    let registry = Arc::new(ConversationRegistry::new());
    let channel = Arc::new(RecordingChannel::default());
    let settings = Arc::new(CountingSettingsRepo::default());
    let favorites = Arc::new(InMemoryFavoriteRoomRepository::new());
    let activity = Arc::new(InMemoryActivityMappingRepository::new());
    let tokens = Arc::new(InMemoryTokenProvider::new());
    tokens.set_token(USER, "token-abc");

    let service = NotifyService::new(
        registry.clone(),
        channel.clone(),
        settings.clone(),
        favorites.clone(),
        activity.clone(),
        availability,
        Arc::new(PassthroughRoomFilter),
        tokens,
        NotifyConfig::new("app-1"),
    );

    Harness {
        service,
        registry,
        channel,
        settings,
        favorites,
        activity,
    }
}

fn reference() -> ConversationReference {
    ConversationReference {
        user_id: USER.to_string(),
        user_name: Some("Pat".to_string()),
        conversation_id: "conv-1".to_string(),
        service_url: "https://smba.example.com/amer".to_string(),
        bot_id: "bot-1".to_string(),
    }
}

fn settings() -> UserSettings {
    UserSettings {
        user_id: USER.to_string(),
        iana_timezone: "America/New_York".to_string(),
        windows_timezone: "Eastern Standard Time".to_string(),
    }
}

fn favorite(room_id: &str, name: &str, email: &str) -> FavoriteRoom {
    FavoriteRoom {
        user_id: USER.to_string(),
        room_id: room_id.to_string(),
        display_name: name.to_string(),
        building_name: "Building 9".to_string(),
        room_email: email.to_string(),
    }
}

fn schedule(id: &str, busy: bool) -> RoomSchedule {
    let busy_slots = if busy {
        vec![BusySlot {
            status: "busy".to_string(),
            start_utc: chrono::Utc::now(),
            end_utc: chrono::Utc::now() + chrono::Duration::minutes(30),
        }]
    } else {
        Vec::new()
    };
    RoomSchedule {
        schedule_id: id.to_string(),
        display_name: None,
        building_name: None,
        busy_slots,
    }
}

fn refresh_submit(reply_to: &str) -> MeetingSubmit {
    MeetingSubmit {
        user_id: USER.to_string(),
        text: String::new(),
        reply_to: Some(reply_to.to_string()),
        room_name: None,
        building_name: None,
        room_email: None,
        start_utc: None,
        end_utc: None,
    }
}

fn booking_submit(reply_to: Option<&str>) -> MeetingSubmit {
    MeetingSubmit {
        user_id: USER.to_string(),
        text: MEETING_FROM_TASK_MODULE.to_uppercase(),
        reply_to: reply_to.map(String::from),
        room_name: Some("RoomA".to_string()),
        building_name: Some("Building 9".to_string()),
        room_email: Some("a@x".to_string()),
        start_utc: Some(chrono::Utc::now()),
        end_utc: Some(chrono::Utc::now() + chrono::Duration::minutes(30)),
    }
}

async fn seed_record(harness: &Harness, correlation_id: &str, activity_id: &str) {
    harness
        .activity
        .put(&meetbot_common::models::ActivityRecord {
            user_id: USER.to_string(),
            correlation_id: correlation_id.to_string(),
            activity_id: activity_id.to_string(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn unregistered_user_fails_before_any_store_call() {
    let harness = build_harness(Arc::new(StaticAvailability::default()));
    // No registry entry for USER.

    let result = harness.service.handle_submit(refresh_submit("corr-1")).await;

    assert!(matches!(result, Err(Error::ChannelUnavailable(_))));
    assert_eq!(harness.settings.reads.load(Ordering::SeqCst), 0);
    assert!(harness.activity.is_empty());
    assert!(harness.channel.texts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_settings_sends_generic_failure() {
    let harness = build_harness(Arc::new(StaticAvailability::default()));
    harness.registry.register(reference());
    // No settings stored for USER.

    let result = harness.service.handle_submit(refresh_submit("corr-1")).await;

    assert!(matches!(result, Err(Error::SettingsMissing(_))));
    assert_eq!(
        *harness.channel.texts.lock().unwrap(),
        vec![GENERIC_FAILURE_TEXT.to_string()]
    );
}

#[tokio::test]
async fn refresh_enriches_matched_rooms_and_keeps_unmatched() {
    let availability = Arc::new(StaticAvailability {
        schedules: vec![schedule("a@x", true), schedule("c@x", false)],
        calls: AtomicU32::new(0),
    });
    let harness = build_harness(availability.clone());
    harness.registry.register(reference());
    harness.settings.upsert(&settings()).await.unwrap();
    harness.favorites.add(&favorite("r-a", "RoomA", "a@x")).await.unwrap();
    harness.favorites.add(&favorite("r-b", "RoomB", "b@x")).await.unwrap();
    seed_record(&harness, "corr-1", "activity-0").await;

    harness
        .service
        .handle_submit(refresh_submit("corr-1"))
        .await
        .unwrap();

    assert_eq!(availability.calls.load(Ordering::SeqCst), 1);
    let updates = harness.channel.updates.lock().unwrap();
    assert_eq!(updates.len(), 1);
    let rendered = updates[0].1.content.to_string();
    // RoomA enriched and busy; the unmatched schedule renders with its
    // placeholder name rather than erroring.
    assert!(rendered.contains("RoomA"));
    assert!(rendered.contains("Busy"));
    assert!(rendered.contains("Unknown room"));
}

#[tokio::test]
async fn refresh_twice_keeps_exactly_one_live_record() {
    let availability = Arc::new(StaticAvailability {
        schedules: vec![schedule("a@x", false)],
        calls: AtomicU32::new(0),
    });
    let harness = build_harness(availability);
    harness.registry.register(reference());
    harness.settings.upsert(&settings()).await.unwrap();
    harness.favorites.add(&favorite("r-a", "RoomA", "a@x")).await.unwrap();

    let correlation_id = Uuid::new_v4().to_string();
    seed_record(&harness, &correlation_id, "activity-0").await;

    harness
        .service
        .handle_submit(refresh_submit(&correlation_id))
        .await
        .unwrap();
    harness
        .service
        .handle_submit(refresh_submit(&correlation_id))
        .await
        .unwrap();

    // One update per refresh, never a fresh send.
    assert_eq!(harness.channel.updates.lock().unwrap().len(), 2);
    assert!(harness.channel.cards.lock().unwrap().is_empty());
    assert!(harness.channel.texts.lock().unwrap().is_empty());

    // The second update targeted the id the first one returned, and the
    // single live record now carries the second update's id.
    let updates = harness.channel.updates.lock().unwrap();
    assert_eq!(updates[0].0, "activity-0");
    assert_eq!(updates[1].0, "update-1");
    assert_eq!(harness.activity.len(), 1);
    let record = harness
        .activity
        .get(USER, &correlation_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.activity_id, "update-2");
}

#[tokio::test]
async fn refresh_with_zero_favorites_still_updates_card() {
    let availability = Arc::new(StaticAvailability::default());
    let harness = build_harness(availability.clone());
    harness.registry.register(reference());
    harness.settings.upsert(&settings()).await.unwrap();
    seed_record(&harness, "corr-1", "activity-0").await;

    harness
        .service
        .handle_submit(refresh_submit("corr-1"))
        .await
        .unwrap();

    // No rooms means no query at all, but the card still refreshes.
    assert_eq!(availability.calls.load(Ordering::SeqCst), 0);
    let updates = harness.channel.updates.lock().unwrap();
    assert_eq!(updates.len(), 1);
    assert!(updates[0].1.content.to_string().contains("no favorite rooms"));
}

#[tokio::test]
async fn orphaned_refresh_sends_notice_and_writes_nothing() {
    let availability = Arc::new(StaticAvailability {
        schedules: vec![schedule("a@x", false)],
        calls: AtomicU32::new(0),
    });
    let harness = build_harness(availability);
    harness.registry.register(reference());
    harness.settings.upsert(&settings()).await.unwrap();
    harness.favorites.add(&favorite("r-a", "RoomA", "a@x")).await.unwrap();
    // No activity record for this correlation id.

    harness
        .service
        .handle_submit(refresh_submit("corr-lost"))
        .await
        .unwrap();

    assert_eq!(
        *harness.channel.texts.lock().unwrap(),
        vec![CARD_NOT_FOUND_TEXT.to_string()]
    );
    assert!(harness.channel.updates.lock().unwrap().is_empty());
    assert!(harness.channel.cards.lock().unwrap().is_empty());
    assert!(harness.activity.is_empty());
}

#[tokio::test]
async fn availability_failure_sends_only_generic_failure() {
    let harness = build_harness(Arc::new(FailingAvailability));
    harness.registry.register(reference());
    harness.settings.upsert(&settings()).await.unwrap();
    harness.favorites.add(&favorite("r-a", "RoomA", "a@x")).await.unwrap();
    seed_record(&harness, "corr-1", "activity-0").await;

    let result = harness.service.handle_submit(refresh_submit("corr-1")).await;

    assert!(matches!(result, Err(Error::AvailabilityQueryFailed(_))));
    assert_eq!(
        *harness.channel.texts.lock().unwrap(),
        vec![GENERIC_FAILURE_TEXT.to_string()]
    );
    assert!(harness.channel.updates.lock().unwrap().is_empty());
    assert!(harness.channel.cards.lock().unwrap().is_empty());
    // The mapping is untouched: no partial progress was persisted.
    let record = harness.activity.get(USER, "corr-1").await.unwrap().unwrap();
    assert_eq!(record.activity_id, "activity-0");
}

#[tokio::test]
async fn booking_confirmation_updates_prior_card_and_confirms() {
    let harness = build_harness(Arc::new(StaticAvailability::default()));
    harness.registry.register(reference());
    harness.settings.upsert(&settings()).await.unwrap();
    seed_record(&harness, "corr-1", "activity-0").await;

    // Intent matching is case-insensitive; the helper upper-cases it.
    harness
        .service
        .handle_submit(booking_submit(Some("corr-1")))
        .await
        .unwrap();

    let updates = harness.channel.updates.lock().unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, "activity-0");

    let texts = harness.channel.texts.lock().unwrap();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("RoomA"));
}

#[tokio::test]
async fn booking_confirmation_without_record_skips_update() {
    let harness = build_harness(Arc::new(StaticAvailability::default()));
    harness.registry.register(reference());
    harness.settings.upsert(&settings()).await.unwrap();
    // No prior record for the correlation id.

    harness
        .service
        .handle_submit(booking_submit(Some("corr-gone")))
        .await
        .unwrap();

    assert!(harness.channel.updates.lock().unwrap().is_empty());
    // The plain confirmation still goes out.
    assert_eq!(harness.channel.texts.lock().unwrap().len(), 1);
}

#[test]
fn merge_copies_metadata_onto_matching_schedules_only() {
    let rooms = vec![favorite("r-a", "RoomA", "a@x"), favorite("r-b", "RoomB", "b@x")];
    let merged = merge_room_metadata(vec![schedule("a@x", true), schedule("c@x", false)], &rooms);

    assert_eq!(merged[0].display_name.as_deref(), Some("RoomA"));
    assert_eq!(merged[0].building_name.as_deref(), Some("Building 9"));
    assert!(merged[1].display_name.is_none());
    assert!(merged[1].building_name.is_none());
}
