//! Friend relations. One row per pair; the sender/receiver embeds are
//! disambiguated by the referencing columns.

use serde::{Deserialize, Serialize};
use tastelog_core::types::{DbId, ProfileId};
use tastelog_postgrest::selection::{select, select_aliased};

use crate::models::profile::{self, Profile};

pub const TABLE: &str = "friends";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendStatus {
    Pending,
    Accepted,
    Blocked,
}

pub fn query(with_table_name: bool) -> String {
    let profile = profile::query(profile::Shape::Minimal, false);
    let sender = select_aliased("sender", "user_id_1", &[&profile]);
    let receiver = select_aliased("receiver", "user_id_2", &[&profile]);
    select(TABLE, &["id, status", &sender, &receiver], with_table_name)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Friend {
    pub id: DbId,
    pub status: FriendStatus,
    pub sender: Profile,
    pub receiver: Profile,
}

impl Friend {
    pub fn contains(&self, profile_id: ProfileId) -> bool {
        self.sender.id == profile_id || self.receiver.id == profile_id
    }

    /// The side of the relation that is not `profile_id`.
    pub fn other_party(&self, profile_id: ProfileId) -> &Profile {
        if self.sender.id == profile_id {
            &self.receiver
        } else {
            &self.sender
        }
    }

    /// Blocked relations are only surfaced to their participants.
    pub fn is_visible_to(&self, profile_id: ProfileId) -> bool {
        self.status != FriendStatus::Blocked || self.contains(profile_id)
    }
}

// ---- wire DTOs ----

#[derive(Debug, Clone, Serialize)]
pub struct NewFriend {
    pub user_id_2: ProfileId,
    pub status: FriendStatus,
}

impl NewFriend {
    pub fn request(receiver: ProfileId) -> Self {
        Self {
            user_id_2: receiver,
            status: FriendStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateFriend {
    pub status: FriendStatus,
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn query_golden() {
        assert_eq!(
            query(false),
            "id, status, \
             sender:user_id_1(id, is_private, preferred_name, joined_at, \
             profile_avatars(id, file, blur_hash, created_by)), \
             receiver:user_id_2(id, is_private, preferred_name, joined_at, \
             profile_avatars(id, file, blur_hash, created_by))"
        );
    }

    #[test]
    fn visibility_and_other_party() {
        let friend: Friend = serde_json::from_value(serde_json::json!({
            "id": 1,
            "status": "blocked",
            "sender": {
                "id": "00000000-0000-0000-0000-000000000001",
                "is_private": false, "preferred_name": "a", "joined_at": "2023-01-01"
            },
            "receiver": {
                "id": "00000000-0000-0000-0000-000000000002",
                "is_private": false, "preferred_name": "b", "joined_at": "2023-01-02"
            }
        }))
        .unwrap();

        let sender = friend.sender.id;
        let outsider = Uuid::parse_str("00000000-0000-0000-0000-000000000003").unwrap();
        assert!(friend.is_visible_to(sender));
        assert!(!friend.is_visible_to(outsider));
        assert_eq!(friend.other_party(sender).id, friend.receiver.id);
    }

    #[test]
    fn new_request_is_pending() {
        let value = serde_json::to_value(NewFriend::request(Uuid::nil())).unwrap();
        assert_eq!(value["status"], "pending");
    }
}
