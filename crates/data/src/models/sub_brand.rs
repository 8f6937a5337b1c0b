//! Sub-brands. A sub-brand's `name` is nullable: every brand carries one
//! unnamed default sub-brand that products attach to directly.

use serde::{Deserialize, Serialize};
use tastelog_core::types::DbId;
use tastelog_postgrest::selection::select;

use crate::models::brand::{self, BrandJoinedCompany};
use crate::models::product::{self, ProductJoinedCategory};

pub const TABLE: &str = "sub_brands";

const SAVED_COLUMNS: &str = "id, name, is_verified";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Saved,
    JoinedBrand,
    JoinedProducts,
}

pub fn query(shape: Shape, with_table_name: bool) -> String {
    match shape {
        Shape::Saved => select(TABLE, &[SAVED_COLUMNS], with_table_name),
        Shape::JoinedBrand => {
            let brand = brand::query(brand::Shape::JoinedCompany, true);
            select(TABLE, &[SAVED_COLUMNS, &brand], with_table_name)
        }
        Shape::JoinedProducts => {
            let products = product::query(product::Shape::JoinedCategory, true);
            select(TABLE, &[SAVED_COLUMNS, &products], with_table_name)
        }
    }
}

// ---- projections ----

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubBrand {
    pub id: DbId,
    #[serde(default)]
    pub name: Option<String>,
    pub is_verified: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubBrandJoinedBrand {
    pub id: DbId,
    #[serde(default)]
    pub name: Option<String>,
    pub is_verified: bool,
    #[serde(rename = "brands")]
    pub brand: BrandJoinedCompany,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubBrandWithProducts {
    pub id: DbId,
    #[serde(default)]
    pub name: Option<String>,
    pub is_verified: bool,
    pub products: Vec<ProductJoinedCategory>,
}

// ---- wire DTOs ----

#[derive(Debug, Clone, Serialize)]
pub struct NewSubBrand {
    pub name: String,
    pub brand_id: DbId,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateName {
    pub name: String,
}

/// Reparents the sub-brand under another brand. Products follow; the emptied
/// sub-brand is left in place for moderators to clean up.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateBrand {
    pub brand_id: DbId,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyParams {
    #[serde(rename = "p_sub_brand_id")]
    pub sub_brand_id: DbId,
    #[serde(rename = "p_is_verified")]
    pub is_verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_query_golden() {
        assert_eq!(query(Shape::Saved, true), "sub_brands(id, name, is_verified)");
    }

    #[test]
    fn joined_brand_query_reaches_the_owning_company() {
        let q = query(Shape::JoinedBrand, false);
        assert!(q.starts_with("id, name, is_verified, brands(id, name, is_verified, companies("));
    }

    #[test]
    fn unnamed_default_sub_brand_decodes() {
        let row: SubBrand = serde_json::from_value(serde_json::json!({
            "id": 5, "name": null, "is_verified": true
        }))
        .unwrap();
        assert_eq!(row.name, None);
    }
}
