//! Friend relations.

use tastelog_core::types::{DbId, ProfileId};
use tastelog_core::Result;
use tastelog_postgrest::Client;

use crate::models::friend::{self, Friend, FriendStatus, NewFriend, UpdateFriend};

pub struct FriendRepo;

impl FriendRepo {
    /// Relations where `profile_id` is either party, optionally narrowed to
    /// one status.
    pub async fn get_by_profile_id(
        client: &Client,
        profile_id: ProfileId,
        status: Option<FriendStatus>,
    ) -> Result<Vec<Friend>> {
        let mut builder = client
            .from(friend::TABLE)
            .select(friend::query(false))
            .or(format!(
                "user_id_1.eq.{profile_id},user_id_2.eq.{profile_id}"
            ));
        if let Some(status) = status {
            builder = builder.eq("status", status_literal(status));
        }
        builder.fetch_all().await
    }

    pub async fn insert(client: &Client, request: &NewFriend) -> Result<Friend> {
        client
            .from(friend::TABLE)
            .insert(request)
            .select(friend::query(false))
            .fetch_one()
            .await
    }

    pub async fn update(client: &Client, id: DbId, status: FriendStatus) -> Result<Friend> {
        client
            .from(friend::TABLE)
            .update(&UpdateFriend { status })
            .eq("id", id)
            .select(friend::query(false))
            .fetch_one()
            .await
    }

    pub async fn delete(client: &Client, id: DbId) -> Result<()> {
        client
            .from(friend::TABLE)
            .delete()
            .eq("id", id)
            .execute()
            .await
    }
}

fn status_literal(status: FriendStatus) -> &'static str {
    match status {
        FriendStatus::Pending => "pending",
        FriendStatus::Accepted => "accepted",
        FriendStatus::Blocked => "blocked",
    }
}
