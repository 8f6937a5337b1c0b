//! Product reads, curation mutations, barcodes, and the wishlist.

use tastelog_core::types::{DbId, ProfileId};
use tastelog_core::Result;
use tastelog_postgrest::Client;

use crate::models::product::{
    self, EditProductParams, MergeParams, NewBarcode, NewEditSuggestionParams, NewProductParams,
    NewWishlistItem, ProductDetailed, ProductJoined, ProductJoinedCreator, ProductJoinedRatings,
    ProductSummary, SearchParams, Shape, SummaryParams, VerifyParams, WishlistItem,
};
use crate::repositories::RowId;

const FNC_CREATE_PRODUCT: &str = "fnc__create_product";
const FNC_EDIT_PRODUCT: &str = "fnc__edit_product";
const FNC_CREATE_PRODUCT_EDIT_SUGGESTION: &str = "fnc__create_product_edit_suggestion";
const FNC_VERIFY_PRODUCT: &str = "fnc__verify_product";
const FNC_MERGE_PRODUCTS: &str = "fnc__merge_products";
const FNC_SEARCH_PRODUCTS: &str = "fnc__search_products";
const FNC_GET_PRODUCT_SUMMARY: &str = "fnc__get_product_summary";

pub struct ProductRepo;

impl ProductRepo {
    /// Full-text search, decoded with the per-user rating aggregates the
    /// result list renders.
    pub async fn search(
        client: &Client,
        params: &SearchParams,
    ) -> Result<Vec<ProductJoinedRatings>> {
        client
            .rpc(FNC_SEARCH_PRODUCTS, params)
            .select(product::query(Shape::JoinedBrandSubcategoriesRatings, false))
            .fetch_all()
            .await
    }

    pub async fn get_by_id(client: &Client, id: DbId) -> Result<ProductJoinedRatings> {
        client
            .from(product::TABLE)
            .select(product::query(Shape::JoinedBrandSubcategoriesRatings, false))
            .eq("id", id)
            .fetch_one()
            .await
    }

    pub async fn get_detailed(client: &Client, id: DbId) -> Result<ProductDetailed> {
        client
            .from(product::TABLE)
            .select(product::query(Shape::Detailed, false))
            .eq("id", id)
            .fetch_one()
            .await
    }

    pub async fn get_by_barcode(client: &Client, barcode: &str) -> Result<Vec<ProductJoined>> {
        // The inner embed makes the barcode filter restrict parent rows.
        let mut selection = product::query(Shape::JoinedBrandSubcategories, false);
        selection.push_str(", product_barcodes!inner(barcode)");
        client
            .from(product::TABLE)
            .select(selection)
            .eq("product_barcodes.barcode", barcode)
            .fetch_all()
            .await
    }

    /// The creation RPC returns only the new key; re-read the row in the
    /// same shape listings use so the caller can splice it in directly.
    pub async fn create(client: &Client, params: &NewProductParams) -> Result<ProductJoined> {
        let row: RowId = client
            .rpc(FNC_CREATE_PRODUCT, params)
            .select("id")
            .fetch_one()
            .await?;
        client
            .from(product::TABLE)
            .select(product::query(Shape::JoinedBrandSubcategories, false))
            .eq("id", row.id)
            .fetch_one()
            .await
    }

    pub async fn edit(client: &Client, params: &EditProductParams) -> Result<()> {
        client.rpc(FNC_EDIT_PRODUCT, params).execute().await
    }

    pub async fn create_edit_suggestion(
        client: &Client,
        params: &NewEditSuggestionParams,
    ) -> Result<()> {
        client
            .rpc(FNC_CREATE_PRODUCT_EDIT_SUGGESTION, params)
            .execute()
            .await
    }

    pub async fn verify(client: &Client, id: DbId, is_verified: bool) -> Result<()> {
        client
            .rpc(
                FNC_VERIFY_PRODUCT,
                &VerifyParams {
                    product_id: id,
                    is_verified,
                },
            )
            .execute()
            .await
    }

    pub async fn merge(client: &Client, params: &MergeParams) -> Result<()> {
        client.rpc(FNC_MERGE_PRODUCTS, params).execute().await
    }

    pub async fn delete(client: &Client, id: DbId) -> Result<()> {
        client
            .from(product::TABLE)
            .delete()
            .eq("id", id)
            .execute()
            .await
    }

    pub async fn get_unverified(client: &Client) -> Result<Vec<ProductJoinedCreator>> {
        client
            .from(product::TABLE)
            .select(product::query(Shape::JoinedBrandSubcategoriesCreator, false))
            .eq("is_verified", false)
            .order("created_at", false)
            .fetch_all()
            .await
    }

    pub async fn get_summary(client: &Client, id: DbId) -> Result<ProductSummary> {
        client
            .rpc(FNC_GET_PRODUCT_SUMMARY, &SummaryParams { product_id: id })
            .fetch_one()
            .await
    }

    // ---- barcodes ----

    pub async fn add_barcode(client: &Client, barcode: &NewBarcode) -> Result<()> {
        client
            .from(product::BARCODES_TABLE)
            .insert(barcode)
            .execute()
            .await
    }

    pub async fn delete_barcode(client: &Client, id: DbId) -> Result<()> {
        client
            .from(product::BARCODES_TABLE)
            .delete()
            .eq("id", id)
            .execute()
            .await
    }

    // ---- wishlist ----

    pub async fn get_wishlist(client: &Client, profile_id: ProfileId) -> Result<Vec<WishlistItem>> {
        client
            .from(product::WISHLIST_TABLE)
            .select(product::wishlist_query(false))
            .eq("created_by", profile_id)
            .fetch_all()
            .await
    }

    pub async fn add_to_wishlist(client: &Client, product_id: DbId) -> Result<()> {
        client
            .from(product::WISHLIST_TABLE)
            .insert(&NewWishlistItem { product_id })
            .execute()
            .await
    }

    pub async fn remove_from_wishlist(
        client: &Client,
        profile_id: ProfileId,
        product_id: DbId,
    ) -> Result<()> {
        client
            .from(product::WISHLIST_TABLE)
            .delete()
            .eq("created_by", profile_id)
            .eq("product_id", product_id)
            .execute()
            .await
    }
}
