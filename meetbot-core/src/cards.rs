//! Adaptive Card builders. Pure data transforms: no I/O, no clock reads -
//! everything shown comes in through the arguments, with UTC instants
//! converted to the user's timezone here and nowhere else.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde_json::json;

use meetbot_common::models::{Attachment, AvailabilityWindow, MeetingSubmit, RoomSchedule};

pub const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";

const UNKNOWN_ROOM: &str = "Unknown room";
const TIME_FORMAT: &str = "%l:%M %p";
const DATE_FORMAT: &str = "%b %e, %Y";

fn format_local_time(utc: DateTime<Utc>, tz: Tz) -> String {
    utc.with_timezone(&tz).format(TIME_FORMAT).to_string()
}

fn format_local_date(utc: DateTime<Utc>, tz: Tz) -> String {
    utc.with_timezone(&tz).format(DATE_FORMAT).to_string()
}

fn adaptive_card(body: Vec<serde_json::Value>, actions: Vec<serde_json::Value>) -> Attachment {
    Attachment {
        content_type: ADAPTIVE_CARD_CONTENT_TYPE.to_string(),
        content: json!({
            "$schema": "http://adaptivecards.io/schemas/adaptive-card.json",
            "type": "AdaptiveCard",
            "version": "1.2",
            "body": body,
            "actions": actions,
        }),
    }
}

fn room_row(schedule: &RoomSchedule) -> serde_json::Value {
    // Unmatched schedules carry no metadata; render a placeholder rather
    // than dropping the row.
    let name = schedule.display_name.as_deref().unwrap_or(UNKNOWN_ROOM);
    let building = schedule.building_name.as_deref().unwrap_or("");
    let status = if schedule.busy_slots.is_empty() {
        "Available"
    } else {
        "Busy"
    };
    json!({
        "type": "ColumnSet",
        "columns": [
            {
                "type": "Column",
                "width": "stretch",
                "items": [
                    { "type": "TextBlock", "text": name, "weight": "Bolder", "wrap": true },
                    { "type": "TextBlock", "text": building, "isSubtle": true, "spacing": "None", "wrap": true },
                ],
            },
            {
                "type": "Column",
                "width": "auto",
                "items": [
                    {
                        "type": "TextBlock",
                        "text": status,
                        "color": if schedule.busy_slots.is_empty() { "Good" } else { "Attention" },
                    },
                ],
            },
        ],
    })
}

/// The favorites-availability card. Works for an empty schedule list too:
/// zero favorites is a valid terminal state and renders an empty-state hint
/// instead of erroring.
pub fn favorite_rooms_list_attachment(
    schedules: &[RoomSchedule],
    window: &AvailabilityWindow,
    tz: Tz,
    correlation_id: &str,
) -> Attachment {
    let mut body = vec![
        json!({
            "type": "TextBlock",
            "size": "Medium",
            "weight": "Bolder",
            "text": "Your favorite rooms",
        }),
        json!({
            "type": "TextBlock",
            "isSubtle": true,
            "spacing": "None",
            "wrap": true,
            "text": format!(
                "{} · {} – {}",
                format_local_date(window.start_utc, tz),
                format_local_time(window.start_utc, tz),
                format_local_time(window.end_utc, tz),
            ),
        }),
    ];

    if schedules.is_empty() {
        body.push(json!({
            "type": "TextBlock",
            "wrap": true,
            "text": "You have no favorite rooms yet. Add some to see their availability here.",
        }));
    } else {
        body.extend(schedules.iter().map(room_row));
    }

    let actions = vec![json!({
        "type": "Action.Submit",
        "title": "Refresh",
        "data": { "text": "refresh", "replyTo": correlation_id },
    })];

    adaptive_card(body, actions)
}

/// Static booking-confirmation card, built entirely from the submit payload.
pub fn success_attachment(submit: &MeetingSubmit, tz: Tz) -> Attachment {
    let room = submit.room_name.as_deref().unwrap_or(UNKNOWN_ROOM);
    let building = submit.building_name.as_deref().unwrap_or("");
    let when = match (submit.start_utc, submit.end_utc) {
        (Some(start), Some(end)) => format!(
            "{} · {} – {}",
            format_local_date(start, tz),
            format_local_time(start, tz),
            format_local_time(end, tz),
        ),
        (Some(start), None) => format!(
            "{} · {}",
            format_local_date(start, tz),
            format_local_time(start, tz),
        ),
        _ => String::new(),
    };

    let mut body = vec![
        json!({
            "type": "TextBlock",
            "size": "Medium",
            "weight": "Bolder",
            "text": "Meeting room booked",
        }),
        json!({
            "type": "TextBlock",
            "wrap": true,
            "text": format!("{} {}", room, building).trim_end().to_string(),
        }),
    ];
    if !when.is_empty() {
        body.push(json!({
            "type": "TextBlock",
            "isSubtle": true,
            "spacing": "None",
            "wrap": true,
            "text": when,
        }));
    }

    adaptive_card(body, Vec::new())
}
