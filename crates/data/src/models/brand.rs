//! Brands. The hierarchy is company -> brand -> sub-brand -> product; brand
//! shapes differ in which side of that chain they pull in.

use serde::{Deserialize, Serialize};
use tastelog_core::types::{DbId, Timestamp};
use tastelog_postgrest::selection::{select, select_aliased_fk};
use tastelog_postgrest::Bucket;

use crate::models::company::{self, Company};
use crate::models::image_entity::{self, ImageEntity};
use crate::models::profile::{self, Profile};
use crate::models::sub_brand::{self, SubBrand, SubBrandWithProducts};

pub const TABLE: &str = "brands";
pub const EDIT_SUGGESTIONS_TABLE: &str = "brand_edit_suggestions";

const SAVED_COLUMNS: &str = "id, name, is_verified";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Saved,
    JoinedSubBrands,
    Joined,
    JoinedCompany,
    JoinedSubBrandsCompany,
    Detailed,
}

pub fn query(shape: Shape, with_table_name: bool) -> String {
    let logos = image_entity::query(Bucket::BrandLogos, true);
    match shape {
        Shape::Saved => select(TABLE, &[SAVED_COLUMNS, &logos], with_table_name),
        Shape::JoinedSubBrands => {
            let sub_brands = sub_brand::query(sub_brand::Shape::Saved, true);
            select(TABLE, &[SAVED_COLUMNS, &sub_brands, &logos], with_table_name)
        }
        Shape::Joined => {
            let sub_brands = sub_brand::query(sub_brand::Shape::JoinedProducts, true);
            select(TABLE, &[SAVED_COLUMNS, &sub_brands, &logos], with_table_name)
        }
        Shape::JoinedCompany => {
            let owner = company::query(company::Shape::Saved, true);
            select(TABLE, &[SAVED_COLUMNS, &owner, &logos], with_table_name)
        }
        Shape::JoinedSubBrandsCompany => {
            let sub_brands = sub_brand::query(sub_brand::Shape::JoinedProducts, true);
            let owner = company::query(company::Shape::Saved, true);
            select(
                TABLE,
                &[SAVED_COLUMNS, &sub_brands, &owner, &logos],
                with_table_name,
            )
        }
        Shape::Detailed => {
            let sub_brands = sub_brand::query(sub_brand::Shape::JoinedProducts, true);
            let owner = company::query(company::Shape::Saved, true);
            let creator = select_aliased_fk(
                "created_by",
                "profiles",
                "brands_created_by_fkey",
                &[&profile::query(profile::Shape::Minimal, false)],
            );
            let suggestions = edit_suggestions_query(true);
            select(
                TABLE,
                &[
                    SAVED_COLUMNS,
                    "created_at",
                    &creator,
                    &sub_brands,
                    &owner,
                    &suggestions,
                    &logos,
                ],
                with_table_name,
            )
        }
    }
}

pub fn edit_suggestions_query(with_table_name: bool) -> String {
    select(
        EDIT_SUGGESTIONS_TABLE,
        &[
            "id, name, created_at, resolved_at",
            &profile::query(profile::Shape::Minimal, true),
        ],
        with_table_name,
    )
}

// ---- projections ----

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Brand {
    pub id: DbId,
    pub name: String,
    pub is_verified: bool,
    #[serde(rename = "brand_logos", default)]
    pub logos: Vec<ImageEntity>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BrandJoinedSubBrands {
    pub id: DbId,
    pub name: String,
    pub is_verified: bool,
    pub sub_brands: Vec<SubBrand>,
    #[serde(rename = "brand_logos", default)]
    pub logos: Vec<ImageEntity>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BrandJoined {
    pub id: DbId,
    pub name: String,
    pub is_verified: bool,
    pub sub_brands: Vec<SubBrandWithProducts>,
    #[serde(rename = "brand_logos", default)]
    pub logos: Vec<ImageEntity>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BrandJoinedCompany {
    pub id: DbId,
    pub name: String,
    pub is_verified: bool,
    #[serde(rename = "companies")]
    pub brand_owner: Company,
    #[serde(rename = "brand_logos", default)]
    pub logos: Vec<ImageEntity>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BrandJoinedSubBrandsCompany {
    pub id: DbId,
    pub name: String,
    pub is_verified: bool,
    pub sub_brands: Vec<SubBrandWithProducts>,
    #[serde(rename = "companies")]
    pub brand_owner: Company,
    #[serde(rename = "brand_logos", default)]
    pub logos: Vec<ImageEntity>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BrandDetailed {
    pub id: DbId,
    pub name: String,
    pub is_verified: bool,
    pub created_at: Timestamp,
    #[serde(default)]
    pub created_by: Option<Profile>,
    pub sub_brands: Vec<SubBrandWithProducts>,
    #[serde(rename = "companies")]
    pub brand_owner: Company,
    #[serde(rename = "brand_edit_suggestions", default)]
    pub edit_suggestions: Vec<BrandEditSuggestion>,
    #[serde(rename = "brand_logos", default)]
    pub logos: Vec<ImageEntity>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BrandEditSuggestion {
    pub id: DbId,
    #[serde(default)]
    pub name: Option<String>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub resolved_at: Option<Timestamp>,
    #[serde(rename = "profiles")]
    pub created_by: Profile,
}

// ---- wire DTOs ----

#[derive(Debug, Clone, Serialize)]
pub struct NewBrand {
    pub name: String,
    pub brand_owner_id: DbId,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateBrand {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyParams {
    #[serde(rename = "p_brand_id")]
    pub brand_id: DbId,
    #[serde(rename = "p_is_verified")]
    pub is_verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_query_golden() {
        assert_eq!(
            query(Shape::Saved, false),
            "id, name, is_verified, brand_logos(id, file, blur_hash, created_by)"
        );
    }

    #[test]
    fn joined_company_query_embeds_the_owner() {
        let q = query(Shape::JoinedCompany, true);
        assert!(q.starts_with("brands(id, name, is_verified, companies("));
    }

    #[test]
    fn joined_query_reaches_products_through_sub_brands() {
        let q = query(Shape::Joined, false);
        assert!(q.contains("sub_brands(id, name, is_verified, products("));
        // Products nested under a brand never re-embed the brand.
        assert!(!q.contains("products(id, name, description, is_verified, is_discontinued, sub_brands"));
    }

    #[test]
    fn detailed_query_has_creator_and_suggestions() {
        let q = query(Shape::Detailed, false);
        assert!(q.contains("created_by:profiles!brands_created_by_fkey("));
        assert!(q.contains("brand_edit_suggestions("));
    }
}
