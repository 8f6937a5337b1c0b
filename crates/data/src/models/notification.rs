//! Notifications. One table, four payload kinds: the row embeds at most one
//! of a friend request, a tagged check-in, or a reaction, and otherwise
//! falls back to its plain message.

use serde::{Deserialize, Serialize};
use tastelog_core::types::{DbId, Timestamp};
use tastelog_postgrest::selection::select;

use crate::models::check_in::{self, CheckIn, CheckInReactionJoinedCheckIn};
use crate::models::friend::{self, Friend};

pub const TABLE: &str = "notifications";

pub fn query(with_table_name: bool) -> String {
    let friend_request = friend::query(true);
    let tagged = tagged_check_in_query(true);
    let reaction = check_in::reaction_query(check_in::ReactionShape::JoinedProfileCheckIn, true);
    select(
        TABLE,
        &[
            "id, message, created_at, seen_at",
            &friend_request,
            &tagged,
            &reaction,
        ],
        with_table_name,
    )
}

fn tagged_check_in_query(with_table_name: bool) -> String {
    let check_in = check_in::query(check_in::Shape::Joined, true);
    select(
        check_in::TAGGED_PROFILES_TABLE,
        &["id", &check_in],
        with_table_name,
    )
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaggedCheckIn {
    pub id: DbId,
    #[serde(rename = "check_ins")]
    pub check_in: CheckIn,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NotificationContent {
    Message(String),
    FriendRequest(Friend),
    TaggedCheckIn(Box<TaggedCheckIn>),
    CheckInReaction(Box<CheckInReactionJoinedCheckIn>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: DbId,
    pub created_at: Timestamp,
    pub seen_at: Option<Timestamp>,
    pub content: NotificationContent,
}

impl Notification {
    pub fn is_read(&self) -> bool {
        self.seen_at.is_some()
    }
}

#[derive(Deserialize)]
struct NotificationRow {
    id: DbId,
    created_at: Timestamp,
    #[serde(default)]
    seen_at: Option<Timestamp>,
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "friends", default)]
    friend_request: Option<Friend>,
    #[serde(rename = "check_in_tagged_profiles", default)]
    tagged_check_in: Option<TaggedCheckIn>,
    #[serde(rename = "check_in_reactions", default)]
    check_in_reaction: Option<CheckInReactionJoinedCheckIn>,
}

impl<'de> Deserialize<'de> for Notification {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let row = NotificationRow::deserialize(deserializer)?;
        let content = if let Some(friend_request) = row.friend_request {
            NotificationContent::FriendRequest(friend_request)
        } else if let Some(tagged) = row.tagged_check_in {
            NotificationContent::TaggedCheckIn(Box::new(tagged))
        } else if let Some(reaction) = row.check_in_reaction {
            NotificationContent::CheckInReaction(Box::new(reaction))
        } else {
            NotificationContent::Message(row.message.unwrap_or_default())
        };
        Ok(Notification {
            id: row.id,
            created_at: row.created_at,
            seen_at: row.seen_at,
            content,
        })
    }
}

// ---- wire DTOs ----

#[derive(Debug, Clone, Serialize)]
pub struct MarkReadParams {
    #[serde(rename = "p_notification_id")]
    pub notification_id: DbId,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkCheckInReadParams {
    #[serde(rename = "p_check_in_id")]
    pub check_in_id: DbId,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn query_embeds_all_three_payload_relations() {
        let q = query(false);
        assert!(q.starts_with("id, message, created_at, seen_at, friends(id, status, sender:"));
        assert!(q.contains("check_in_tagged_profiles(id, check_ins("));
        assert!(q.contains("check_in_reactions(id, profiles("));
    }

    #[test]
    fn message_row_decodes_to_the_fallback_content() {
        let notification: Notification = serde_json::from_value(serde_json::json!({
            "id": 7,
            "created_at": "2023-11-15T08:00:00+00:00",
            "seen_at": null,
            "message": "Welcome!",
            "friends": null,
            "check_in_tagged_profiles": null,
            "check_in_reactions": null
        }))
        .unwrap();
        assert!(!notification.is_read());
        assert_eq!(
            notification.content,
            NotificationContent::Message("Welcome!".into())
        );
    }

    #[test]
    fn friend_request_payload_wins_over_the_message() {
        let notification: Notification = serde_json::from_value(serde_json::json!({
            "id": 8,
            "created_at": "2023-11-15T08:00:00+00:00",
            "seen_at": "2023-11-15T09:00:00+00:00",
            "message": "ignored",
            "friends": {
                "id": 1,
                "status": "pending",
                "sender": {
                    "id": "00000000-0000-0000-0000-000000000001",
                    "is_private": false, "preferred_name": "a", "joined_at": "2023-01-01"
                },
                "receiver": {
                    "id": "00000000-0000-0000-0000-000000000002",
                    "is_private": false, "preferred_name": "b", "joined_at": "2023-01-02"
                }
            }
        }))
        .unwrap();
        assert!(notification.is_read());
        assert_matches!(notification.content, NotificationContent::FriendRequest(_));
    }
}
