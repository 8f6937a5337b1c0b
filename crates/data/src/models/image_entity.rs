//! Image rows shared by every entity with a bucket.

use serde::Deserialize;
use tastelog_core::blurhash::BlurHash;
use tastelog_core::types::{DbId, ProfileId};
use tastelog_postgrest::selection::select;
use tastelog_postgrest::Bucket;

const SAVED_COLUMNS: &str = "id, file, blur_hash, created_by";

/// One stored image. The embed key in a parent selection is the bucket's
/// backing table, e.g. `profile_avatars` or `brand_logos`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageEntity {
    pub id: DbId,
    pub file: String,
    #[serde(default)]
    pub blur_hash: Option<BlurHash>,
    #[serde(default)]
    pub created_by: Option<ProfileId>,
}

/// Selection for the image rows behind `bucket`.
pub fn query(bucket: Bucket, with_table_name: bool) -> String {
    select(bucket.relation(), &[SAVED_COLUMNS], with_table_name)
}
