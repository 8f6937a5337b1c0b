//! Products, barcodes, variants, and edit suggestions.
//!
//! `JoinedCategory` is the shape used when a product is reached through its
//! sub-brand: it carries category data only, so brand embeds never recurse.

use serde::{Deserialize, Serialize};
use tastelog_core::types::{DbId, ProfileId, Timestamp};
use tastelog_postgrest::selection::{select, select_aliased_fk, select_fk};
use tastelog_postgrest::Bucket;

use crate::models::category::{self, Category, SubcategoryJoinedCategory};
use crate::models::company::{self, Company};
use crate::models::image_entity::{self, ImageEntity};
use crate::models::profile::{self, Profile};
use crate::models::sub_brand::{self, SubBrandJoinedBrand};

pub const TABLE: &str = "products";
pub const BARCODES_TABLE: &str = "product_barcodes";
pub const VARIANTS_TABLE: &str = "product_variants";
pub const EDIT_SUGGESTIONS_TABLE: &str = "product_edit_suggestions";
pub const WISHLIST_TABLE: &str = "profile_wishlist_items";

const SAVED_COLUMNS: &str = "id, name, description, is_verified, is_discontinued";
const RATING_COLUMNS: &str = "current_user_check_ins, average_rating";
const BARCODE_COLUMNS: &str = "id, barcode, type";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Saved,
    JoinedCategory,
    JoinedBrandSubcategories,
    JoinedBrandSubcategoriesCreator,
    JoinedBrandSubcategoriesRatings,
    Detailed,
}

pub fn query(shape: Shape, with_table_name: bool) -> String {
    let logos = image_entity::query(Bucket::ProductLogos, true);
    match shape {
        Shape::Saved => select(TABLE, &[SAVED_COLUMNS, &logos], with_table_name),
        Shape::JoinedCategory => {
            let cat = category::query(category::Shape::Saved, true);
            let subcategories =
                category::subcategory_query(category::SubcategoryShape::JoinedCategory, true);
            select(
                TABLE,
                &[SAVED_COLUMNS, &cat, &subcategories, &logos],
                with_table_name,
            )
        }
        Shape::JoinedBrandSubcategories => select_parts(&joined_parts(&logos), with_table_name),
        Shape::JoinedBrandSubcategoriesCreator => {
            let creator = select_fk(
                "profiles",
                "products_created_by_fkey",
                &[&profile::query(profile::Shape::Minimal, false)],
            );
            let mut parts = joined_parts(&logos);
            parts.push(creator);
            select_parts(&parts, with_table_name)
        }
        Shape::JoinedBrandSubcategoriesRatings => {
            let mut parts = joined_parts(&logos);
            parts.insert(1, RATING_COLUMNS.to_owned());
            select_parts(&parts, with_table_name)
        }
        Shape::Detailed => {
            let creator = select_aliased_fk(
                "created_by",
                "profiles",
                "products_created_by_fkey",
                &[&profile::query(profile::Shape::Minimal, false)],
            );
            let variants = variant_query(true);
            let suggestions = edit_suggestions_query(true);
            let mut parts = joined_parts(&logos);
            parts.push("created_at".to_owned());
            parts.push(creator);
            parts.push(variants);
            parts.push(suggestions);
            select_parts(&parts, with_table_name)
        }
    }
}

fn joined_parts(logos: &str) -> Vec<String> {
    vec![
        SAVED_COLUMNS.to_owned(),
        sub_brand::query(sub_brand::Shape::JoinedBrand, true),
        category::query(category::Shape::Saved, true),
        category::subcategory_query(category::SubcategoryShape::JoinedCategory, true),
        barcode_query(true),
        logos.to_owned(),
    ]
}

fn select_parts(parts: &[String], with_table_name: bool) -> String {
    let refs: Vec<&str> = parts.iter().map(String::as_str).collect();
    select(TABLE, &refs, with_table_name)
}

pub fn barcode_query(with_table_name: bool) -> String {
    select(BARCODES_TABLE, &[BARCODE_COLUMNS], with_table_name)
}

pub fn variant_query(with_table_name: bool) -> String {
    let manufacturer = company::query(company::Shape::Saved, true);
    select(VARIANTS_TABLE, &["id", &manufacturer], with_table_name)
}

pub fn edit_suggestions_query(with_table_name: bool) -> String {
    let duplicate = select_aliased_fk(
        "duplicate_of",
        "products",
        "fk_duplicate_product_id",
        &[SAVED_COLUMNS],
    );
    select(
        EDIT_SUGGESTIONS_TABLE,
        &[
            "id, name, description, is_discontinued, created_at, resolved_at",
            &duplicate,
            &profile::query(profile::Shape::Minimal, true),
        ],
        with_table_name,
    )
}

// ---- projections ----

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_verified: bool,
    pub is_discontinued: bool,
    #[serde(rename = "product_logos", default)]
    pub logos: Vec<ImageEntity>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductJoinedCategory {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_verified: bool,
    pub is_discontinued: bool,
    #[serde(rename = "categories")]
    pub category: Category,
    pub subcategories: Vec<SubcategoryJoinedCategory>,
    #[serde(rename = "product_logos", default)]
    pub logos: Vec<ImageEntity>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductJoined {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_verified: bool,
    pub is_discontinued: bool,
    #[serde(rename = "sub_brands")]
    pub sub_brand: SubBrandJoinedBrand,
    #[serde(rename = "categories")]
    pub category: Category,
    pub subcategories: Vec<SubcategoryJoinedCategory>,
    #[serde(rename = "product_barcodes", default)]
    pub barcodes: Vec<Barcode>,
    #[serde(rename = "product_logos", default)]
    pub logos: Vec<ImageEntity>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductJoinedCreator {
    #[serde(flatten)]
    pub product: ProductJoined,
    #[serde(rename = "profiles", default)]
    pub created_by: Option<Profile>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductJoinedRatings {
    #[serde(flatten)]
    pub product: ProductJoined,
    #[serde(default)]
    pub current_user_check_ins: Option<i64>,
    #[serde(default)]
    pub average_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductDetailed {
    #[serde(flatten)]
    pub product: ProductJoined,
    pub created_at: Timestamp,
    #[serde(default)]
    pub created_by: Option<Profile>,
    #[serde(rename = "product_variants", default)]
    pub variants: Vec<ProductVariant>,
    #[serde(rename = "product_edit_suggestions", default)]
    pub edit_suggestions: Vec<ProductEditSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Barcode {
    pub id: DbId,
    pub barcode: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A manufacturer-specific variant of a product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductVariant {
    pub id: DbId,
    #[serde(rename = "companies", default)]
    pub manufacturer: Option<Company>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductEditSuggestion {
    pub id: DbId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_discontinued: Option<bool>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub resolved_at: Option<Timestamp>,
    #[serde(default)]
    pub duplicate_of: Option<Product>,
    #[serde(rename = "profiles")]
    pub created_by: Profile,
}

/// One row of a profile's wishlist.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WishlistItem {
    pub created_by: ProfileId,
    #[serde(rename = "products")]
    pub product: ProductJoined,
}

pub fn wishlist_query(with_table_name: bool) -> String {
    let product = query(Shape::JoinedBrandSubcategories, true);
    select(WISHLIST_TABLE, &["created_by", &product], with_table_name)
}

// ---- wire DTOs ----

#[derive(Debug, Clone, Serialize)]
pub struct NewProductParams {
    #[serde(rename = "p_name")]
    pub name: String,
    #[serde(rename = "p_description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "p_category_id")]
    pub category_id: DbId,
    #[serde(rename = "p_sub_category_ids")]
    pub subcategory_ids: Vec<DbId>,
    #[serde(rename = "p_brand_id")]
    pub brand_id: DbId,
    #[serde(rename = "p_sub_brand_id", skip_serializing_if = "Option::is_none")]
    pub sub_brand_id: Option<DbId>,
    #[serde(rename = "p_barcode_code", skip_serializing_if = "Option::is_none")]
    pub barcode_code: Option<String>,
    #[serde(rename = "p_barcode_type", skip_serializing_if = "Option::is_none")]
    pub barcode_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EditProductParams {
    #[serde(rename = "p_product_id")]
    pub product_id: DbId,
    #[serde(rename = "p_name")]
    pub name: String,
    #[serde(rename = "p_description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "p_category_id")]
    pub category_id: DbId,
    #[serde(rename = "p_sub_category_ids")]
    pub subcategory_ids: Vec<DbId>,
    #[serde(rename = "p_sub_brand_id")]
    pub sub_brand_id: DbId,
    #[serde(rename = "p_is_discontinued")]
    pub is_discontinued: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewEditSuggestionParams {
    #[serde(rename = "p_product_id")]
    pub product_id: DbId,
    #[serde(rename = "p_name")]
    pub name: String,
    #[serde(rename = "p_description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "p_category_id")]
    pub category_id: DbId,
    #[serde(rename = "p_sub_category_ids")]
    pub subcategory_ids: Vec<DbId>,
    #[serde(rename = "p_sub_brand_id")]
    pub sub_brand_id: DbId,
    #[serde(rename = "p_is_discontinued")]
    pub is_discontinued: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyParams {
    #[serde(rename = "p_product_id")]
    pub product_id: DbId,
    #[serde(rename = "p_is_verified")]
    pub is_verified: bool,
}

/// Folds `product_id` into `to_product_id`, repointing check-ins and
/// barcodes before deleting the source row.
#[derive(Debug, Clone, Serialize)]
pub struct MergeParams {
    #[serde(rename = "p_product_id")]
    pub product_id: DbId,
    #[serde(rename = "p_to_product_id")]
    pub to_product_id: DbId,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchParams {
    #[serde(rename = "p_search_term")]
    pub search_term: String,
    #[serde(rename = "p_category_name", skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(rename = "p_subcategory_id", skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<DbId>,
    #[serde(rename = "p_only_non_checked_in")]
    pub only_non_checked_in: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryParams {
    #[serde(rename = "p_product_id")]
    pub product_id: DbId,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductSummary {
    pub total_check_ins: i64,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub current_user_average_rating: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewBarcode {
    pub product_id: DbId,
    pub barcode: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewWishlistItem {
    pub product_id: DbId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_query_golden() {
        assert_eq!(
            query(Shape::Saved, false),
            "id, name, description, is_verified, is_discontinued, \
             product_logos(id, file, blur_hash, created_by)"
        );
    }

    #[test]
    fn joined_query_embeds_the_full_brand_chain() {
        let q = query(Shape::JoinedBrandSubcategories, false);
        assert!(q.contains("sub_brands(id, name, is_verified, brands(id, name, is_verified, companies("));
        assert!(q.contains("subcategories(id, name, is_verified, categories(id, name, icon))"));
        assert!(q.contains("product_barcodes(id, barcode, type)"));
    }

    #[test]
    fn ratings_shape_adds_the_aggregate_columns_after_saved() {
        let q = query(Shape::JoinedBrandSubcategoriesRatings, false);
        assert!(q.starts_with(
            "id, name, description, is_verified, is_discontinued, \
             current_user_check_ins, average_rating, sub_brands("
        ));
    }

    #[test]
    fn joined_category_shape_never_embeds_brands() {
        let q = query(Shape::JoinedCategory, false);
        assert!(!q.contains("sub_brands"));
        assert!(!q.contains("brands"));
    }

    #[test]
    fn detailed_query_aliases_the_creator_embed() {
        let q = query(Shape::Detailed, false);
        assert!(q.contains("created_by:profiles!products_created_by_fkey("));
        assert!(q.contains("duplicate_of:products!fk_duplicate_product_id("));
    }

    #[test]
    fn ratings_projection_decodes_with_flattened_base() {
        let product: ProductJoinedRatings = serde_json::from_value(serde_json::json!({
            "id": 90,
            "name": "Talvi IPA",
            "description": null,
            "is_verified": true,
            "is_discontinued": false,
            "current_user_check_ins": 2,
            "average_rating": 7.5,
            "sub_brands": {
                "id": 4, "name": null, "is_verified": true,
                "brands": {
                    "id": 2, "name": "Nordic Hops", "is_verified": true,
                    "companies": { "id": 1, "name": "Ostrobothnia Brewing", "is_verified": true }
                }
            },
            "categories": { "id": 3, "name": "beer", "icon": "🍺" },
            "subcategories": [],
            "product_barcodes": []
        }))
        .unwrap();
        assert_eq!(product.product.id, 90);
        assert_eq!(product.current_user_check_ins, Some(2));
        assert_eq!(product.product.sub_brand.brand.brand_owner.name, "Ostrobothnia Brewing");
    }

    #[test]
    fn new_product_params_use_rpc_wire_names() {
        let params = NewProductParams {
            name: "Talvi IPA".into(),
            description: None,
            category_id: 3,
            subcategory_ids: vec![7, 8],
            brand_id: 2,
            sub_brand_id: None,
            barcode_code: None,
            barcode_type: None,
        };
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["p_name"], "Talvi IPA");
        assert_eq!(value["p_sub_category_ids"], serde_json::json!([7, 8]));
        assert!(value.get("p_description").is_none());
    }
}
