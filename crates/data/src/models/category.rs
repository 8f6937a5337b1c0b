//! Categories, subcategories, and serving styles.

use serde::{Deserialize, Serialize};
use tastelog_core::types::DbId;
use tastelog_postgrest::selection::select;

pub const TABLE: &str = "categories";
pub const SUBCATEGORIES_TABLE: &str = "subcategories";
pub const SERVING_STYLES_TABLE: &str = "serving_styles";
/// Join table linking a category to its selectable serving styles.
pub const CATEGORY_SERVING_STYLES_TABLE: &str = "category_serving_styles";

const SAVED_COLUMNS: &str = "id, name, icon";
const SUBCATEGORY_COLUMNS: &str = "id, name, is_verified";
const SERVING_STYLE_COLUMNS: &str = "id, name";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Saved,
    JoinedSubcategoriesServingStyles,
}

pub fn query(shape: Shape, with_table_name: bool) -> String {
    match shape {
        Shape::Saved => select(TABLE, &[SAVED_COLUMNS], with_table_name),
        Shape::JoinedSubcategoriesServingStyles => {
            let subcategories = subcategory_query(SubcategoryShape::Saved, true);
            let serving_styles = serving_style_query(true);
            select(
                TABLE,
                &[SAVED_COLUMNS, &subcategories, &serving_styles],
                with_table_name,
            )
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubcategoryShape {
    Saved,
    JoinedCategory,
}

pub fn subcategory_query(shape: SubcategoryShape, with_table_name: bool) -> String {
    match shape {
        SubcategoryShape::Saved => select(SUBCATEGORIES_TABLE, &[SUBCATEGORY_COLUMNS], with_table_name),
        SubcategoryShape::JoinedCategory => {
            let category = query(Shape::Saved, true);
            select(
                SUBCATEGORIES_TABLE,
                &[SUBCATEGORY_COLUMNS, &category],
                with_table_name,
            )
        }
    }
}

pub fn serving_style_query(with_table_name: bool) -> String {
    select(SERVING_STYLES_TABLE, &[SERVING_STYLE_COLUMNS], with_table_name)
}

// ---- projections ----

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryJoinedSubcategoriesServingStyles {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub subcategories: Vec<Subcategory>,
    pub serving_styles: Vec<ServingStyle>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Subcategory {
    pub id: DbId,
    pub name: String,
    pub is_verified: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubcategoryJoinedCategory {
    pub id: DbId,
    pub name: String,
    pub is_verified: bool,
    #[serde(rename = "categories")]
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServingStyle {
    pub id: DbId,
    pub name: String,
}

// ---- wire DTOs ----

#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewSubcategory {
    pub name: String,
    pub category_id: DbId,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewServingStyle {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateServingStyle {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryServingStyle {
    pub category_id: DbId,
    pub serving_style_id: DbId,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifySubcategoryParams {
    #[serde(rename = "p_subcategory_id")]
    pub subcategory_id: DbId,
    #[serde(rename = "p_is_verified")]
    pub is_verified: bool,
}
