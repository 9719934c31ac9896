// File: meetbot-common/src/models/mod.rs
pub mod activity;
pub mod channel;
pub mod conversation;
pub mod notify;
pub mod room;
pub mod schedule;
pub mod settings;

pub use activity::ActivityRecord;
pub use channel::{Activity, Attachment, ChannelAccount, ConversationAccount, ResourceResponse};
pub use conversation::ConversationReference;
pub use notify::{MeetingSubmit, MEETING_FROM_TASK_MODULE};
pub use room::FavoriteRoom;
pub use schedule::{AvailabilityWindow, BusySlot, RoomSchedule};
pub use settings::UserSettings;
