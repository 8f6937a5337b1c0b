//! Category, subcategory, and serving-style administration.

use tastelog_core::types::DbId;
use tastelog_core::Result;
use tastelog_postgrest::Client;

use crate::models::category::{
    self, Category, CategoryJoinedSubcategoriesServingStyles, CategoryServingStyle, NewCategory,
    NewServingStyle, NewSubcategory, ServingStyle, Shape, Subcategory, SubcategoryShape,
    UpdateServingStyle, VerifySubcategoryParams,
};

const FNC_VERIFY_SUBCATEGORY: &str = "fnc__verify_subcategory";

pub struct CategoryRepo;

impl CategoryRepo {
    pub async fn get_all(
        client: &Client,
    ) -> Result<Vec<CategoryJoinedSubcategoriesServingStyles>> {
        client
            .from(category::TABLE)
            .select(category::query(Shape::JoinedSubcategoriesServingStyles, false))
            .order("name", true)
            .fetch_all()
            .await
    }

    pub async fn insert(client: &Client, new_category: &NewCategory) -> Result<Category> {
        client
            .from(category::TABLE)
            .insert(new_category)
            .select(category::query(Shape::Saved, false))
            .fetch_one()
            .await
    }

    // ---- subcategories ----

    pub async fn insert_subcategory(
        client: &Client,
        new_subcategory: &NewSubcategory,
    ) -> Result<Subcategory> {
        client
            .from(category::SUBCATEGORIES_TABLE)
            .insert(new_subcategory)
            .select(category::subcategory_query(SubcategoryShape::Saved, false))
            .fetch_one()
            .await
    }

    pub async fn verify_subcategory(client: &Client, id: DbId, is_verified: bool) -> Result<()> {
        client
            .rpc(
                FNC_VERIFY_SUBCATEGORY,
                &VerifySubcategoryParams {
                    subcategory_id: id,
                    is_verified,
                },
            )
            .execute()
            .await
    }

    pub async fn delete_subcategory(client: &Client, id: DbId) -> Result<()> {
        client
            .from(category::SUBCATEGORIES_TABLE)
            .delete()
            .eq("id", id)
            .execute()
            .await
    }

    // ---- serving styles ----

    pub async fn insert_serving_style(
        client: &Client,
        new_style: &NewServingStyle,
    ) -> Result<ServingStyle> {
        client
            .from(category::SERVING_STYLES_TABLE)
            .insert(new_style)
            .select(category::serving_style_query(false))
            .fetch_one()
            .await
    }

    pub async fn update_serving_style(
        client: &Client,
        id: DbId,
        name: &str,
    ) -> Result<ServingStyle> {
        client
            .from(category::SERVING_STYLES_TABLE)
            .update(&UpdateServingStyle { name: name.into() })
            .eq("id", id)
            .select(category::serving_style_query(false))
            .fetch_one()
            .await
    }

    pub async fn delete_serving_style(client: &Client, id: DbId) -> Result<()> {
        client
            .from(category::SERVING_STYLES_TABLE)
            .delete()
            .eq("id", id)
            .execute()
            .await
    }

    /// Make a serving style selectable for a category.
    pub async fn add_serving_style_to_category(
        client: &Client,
        link: &CategoryServingStyle,
    ) -> Result<()> {
        client
            .from(category::CATEGORY_SERVING_STYLES_TABLE)
            .insert(link)
            .execute()
            .await
    }

    pub async fn remove_serving_style_from_category(
        client: &Client,
        link: &CategoryServingStyle,
    ) -> Result<()> {
        client
            .from(category::CATEGORY_SERVING_STYLES_TABLE)
            .delete()
            .eq("category_id", link.category_id)
            .eq("serving_style_id", link.serving_style_id)
            .execute()
            .await
    }
}
