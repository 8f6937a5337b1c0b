//! Sub-brand mutations. Reparenting moves the products with the row and
//! leaves the emptied sub-brand for moderators to remove.

use tastelog_core::types::DbId;
use tastelog_core::Result;
use tastelog_postgrest::Client;

use crate::models::sub_brand::{
    self, NewSubBrand, Shape, SubBrand, SubBrandJoinedBrand, UpdateBrand, UpdateName, VerifyParams,
};

const FNC_VERIFY_SUB_BRAND: &str = "fnc__verify_sub_brand";

pub struct SubBrandRepo;

impl SubBrandRepo {
    pub async fn insert(client: &Client, new_sub_brand: &NewSubBrand) -> Result<SubBrand> {
        client
            .from(sub_brand::TABLE)
            .insert(new_sub_brand)
            .select(sub_brand::query(Shape::Saved, false))
            .fetch_one()
            .await
    }

    pub async fn update_name(client: &Client, id: DbId, name: &str) -> Result<()> {
        client
            .from(sub_brand::TABLE)
            .update(&UpdateName { name: name.into() })
            .eq("id", id)
            .execute()
            .await
    }

    pub async fn change_brand(client: &Client, id: DbId, brand_id: DbId) -> Result<()> {
        client
            .from(sub_brand::TABLE)
            .update(&UpdateBrand { brand_id })
            .eq("id", id)
            .execute()
            .await
    }

    pub async fn verify(client: &Client, id: DbId, is_verified: bool) -> Result<()> {
        client
            .rpc(
                FNC_VERIFY_SUB_BRAND,
                &VerifyParams {
                    sub_brand_id: id,
                    is_verified,
                },
            )
            .execute()
            .await
    }

    pub async fn delete(client: &Client, id: DbId) -> Result<()> {
        client
            .from(sub_brand::TABLE)
            .delete()
            .eq("id", id)
            .execute()
            .await
    }

    pub async fn get_unverified(client: &Client) -> Result<Vec<SubBrandJoinedBrand>> {
        client
            .from(sub_brand::TABLE)
            .select(sub_brand::query(Shape::JoinedBrand, false))
            .eq("is_verified", false)
            .fetch_all()
            .await
    }
}
