//! The flavor vocabulary.

use tastelog_core::types::DbId;
use tastelog_core::Result;
use tastelog_postgrest::Client;

use crate::models::flavor::{self, Flavor, NewFlavor};

pub struct FlavorRepo;

impl FlavorRepo {
    pub async fn get_all(client: &Client) -> Result<Vec<Flavor>> {
        client
            .from(flavor::TABLE)
            .select(flavor::query(false))
            .order("name", true)
            .fetch_all()
            .await
    }

    pub async fn insert(client: &Client, new_flavor: &NewFlavor) -> Result<Flavor> {
        client
            .from(flavor::TABLE)
            .insert(new_flavor)
            .select(flavor::query(false))
            .fetch_one()
            .await
    }

    pub async fn delete(client: &Client, id: DbId) -> Result<()> {
        client
            .from(flavor::TABLE)
            .delete()
            .eq("id", id)
            .execute()
            .await
    }
}
