//! Brand reads and curation mutations.

use tastelog_core::types::DbId;
use tastelog_core::Result;
use tastelog_postgrest::Client;

use crate::models::brand::{
    self, BrandDetailed, BrandJoined, BrandJoinedCompany, BrandJoinedSubBrands, NewBrand, Shape,
    UpdateBrand, VerifyParams,
};

const FNC_VERIFY_BRAND: &str = "fnc__verify_brand";

pub struct BrandRepo;

impl BrandRepo {
    pub async fn get_by_id(client: &Client, id: DbId) -> Result<BrandJoined> {
        client
            .from(brand::TABLE)
            .select(brand::query(Shape::Joined, false))
            .eq("id", id)
            .fetch_one()
            .await
    }

    pub async fn get_detailed(client: &Client, id: DbId) -> Result<BrandDetailed> {
        client
            .from(brand::TABLE)
            .select(brand::query(Shape::Detailed, false))
            .eq("id", id)
            .fetch_one()
            .await
    }

    pub async fn get_by_brand_owner_id(
        client: &Client,
        brand_owner_id: DbId,
    ) -> Result<Vec<BrandJoinedSubBrands>> {
        client
            .from(brand::TABLE)
            .select(brand::query(Shape::JoinedSubBrands, false))
            .eq("brand_owner_id", brand_owner_id)
            .order("name", true)
            .fetch_all()
            .await
    }

    pub async fn insert(client: &Client, new_brand: &NewBrand) -> Result<BrandJoinedSubBrands> {
        client
            .from(brand::TABLE)
            .insert(new_brand)
            .select(brand::query(Shape::JoinedSubBrands, false))
            .fetch_one()
            .await
    }

    pub async fn update_name(client: &Client, id: DbId, name: &str) -> Result<()> {
        client
            .from(brand::TABLE)
            .update(&UpdateBrand { name: name.into() })
            .eq("id", id)
            .execute()
            .await
    }

    pub async fn verify(client: &Client, id: DbId, is_verified: bool) -> Result<()> {
        client
            .rpc(
                FNC_VERIFY_BRAND,
                &VerifyParams {
                    brand_id: id,
                    is_verified,
                },
            )
            .execute()
            .await
    }

    pub async fn delete(client: &Client, id: DbId) -> Result<()> {
        client
            .from(brand::TABLE)
            .delete()
            .eq("id", id)
            .execute()
            .await
    }

    pub async fn get_unverified(client: &Client) -> Result<Vec<BrandJoinedCompany>> {
        client
            .from(brand::TABLE)
            .select(brand::query(Shape::JoinedCompany, false))
            .eq("is_verified", false)
            .order("created_at", false)
            .fetch_all()
            .await
    }
}
