//! Direct access to image rows, independent of their owning entity.

use tastelog_core::types::DbId;
use tastelog_core::Result;
use tastelog_postgrest::{Bucket, Client};

use crate::models::image_entity::{self, ImageEntity};

pub struct ImageEntityRepo;

impl ImageEntityRepo {
    pub async fn get_by_file(client: &Client, bucket: Bucket, file: &str) -> Result<ImageEntity> {
        client
            .from(bucket.relation())
            .select(image_entity::query(bucket, false))
            .eq("file", file)
            .fetch_one()
            .await
    }

    pub async fn delete(client: &Client, bucket: Bucket, id: DbId) -> Result<()> {
        client
            .from(bucket.relation())
            .delete()
            .eq("id", id)
            .execute()
            .await
    }
}
