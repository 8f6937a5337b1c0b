//! Repository facades, one per entity family.
//!
//! Repositories are stateless: every operation is an associated async
//! function taking the shared [`tastelog_postgrest::Client`] first. They
//! compose selections from the model layer, so the decoded projection always
//! matches the requested shape.

use serde::Deserialize;
use tastelog_core::types::DbId;

pub mod auth_repo;
pub mod brand_repo;
pub mod category_repo;
pub mod check_in_repo;
pub mod company_repo;
pub mod flavor_repo;
pub mod friend_repo;
pub mod image_entity_repo;
pub mod location_repo;
pub mod notification_repo;
pub mod product_repo;
pub mod profile_repo;
pub mod report_repo;
pub mod sub_brand_repo;

/// Bare id row, for RPCs that return only the created key.
#[derive(Debug, Deserialize)]
pub(crate) struct RowId {
    pub id: DbId,
}
