//! Notification listing and read-state RPCs.

use tastelog_core::types::{DbId, ProfileId};
use tastelog_core::Result;
use tastelog_postgrest::Client;

use crate::models::notification::{
    self, MarkCheckInReadParams, MarkReadParams, Notification,
};

const FNC_MARK_NOTIFICATION_AS_READ: &str = "fnc__mark_notification_as_read";
const FNC_MARK_ALL_NOTIFICATIONS_READ: &str = "fnc__mark_all_notification_read";
const FNC_MARK_CHECK_IN_NOTIFICATION_AS_READ: &str = "fnc__mark_check_in_notification_as_read";

pub struct NotificationRepo;

impl NotificationRepo {
    pub async fn get_all(client: &Client) -> Result<Vec<Notification>> {
        client
            .from(notification::TABLE)
            .select(notification::query(false))
            .order("id", false)
            .fetch_all()
            .await
    }

    pub async fn mark_read(client: &Client, id: DbId) -> Result<Notification> {
        client
            .rpc(
                FNC_MARK_NOTIFICATION_AS_READ,
                &MarkReadParams { notification_id: id },
            )
            .select(notification::query(false))
            .fetch_one()
            .await
    }

    pub async fn mark_all_read(client: &Client) -> Result<()> {
        client
            .rpc(FNC_MARK_ALL_NOTIFICATIONS_READ, &serde_json::json!({}))
            .execute()
            .await
    }

    /// Mark every notification hanging off one check-in, returning the
    /// updated rows.
    pub async fn mark_check_in_read(
        client: &Client,
        check_in_id: DbId,
    ) -> Result<Vec<Notification>> {
        client
            .rpc(
                FNC_MARK_CHECK_IN_NOTIFICATION_AS_READ,
                &MarkCheckInReadParams { check_in_id },
            )
            .select(notification::query(false))
            .fetch_all()
            .await
    }

    pub async fn delete(client: &Client, id: DbId) -> Result<()> {
        client
            .from(notification::TABLE)
            .delete()
            .eq("id", id)
            .execute()
            .await
    }

    pub async fn delete_all(client: &Client, profile_id: ProfileId) -> Result<()> {
        client
            .from(notification::TABLE)
            .delete()
            .eq("profile_id", profile_id)
            .execute()
            .await
    }
}
