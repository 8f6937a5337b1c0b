//! Companies (brand owners and product manufacturers).

use serde::{Deserialize, Serialize};
use tastelog_core::types::{DbId, Timestamp};
use tastelog_postgrest::selection::{select, select_aliased_fk};
use tastelog_postgrest::Bucket;

use crate::models::image_entity::{self, ImageEntity};
use crate::models::profile::{self, Profile};

pub const TABLE: &str = "companies";
pub const EDIT_SUGGESTIONS_TABLE: &str = "company_edit_suggestions";

const SAVED_COLUMNS: &str = "id, name, is_verified";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Saved,
    Detailed,
}

pub fn query(shape: Shape, with_table_name: bool) -> String {
    let logos = image_entity::query(Bucket::CompanyLogos, true);
    match shape {
        Shape::Saved => select(TABLE, &[SAVED_COLUMNS, &logos], with_table_name),
        Shape::Detailed => {
            let creator = select_aliased_fk(
                "created_by",
                "profiles",
                "companies_created_by_fkey",
                &[&profile::query(profile::Shape::Minimal, false)],
            );
            let suggestions = edit_suggestions_query(true);
            select(
                TABLE,
                &[SAVED_COLUMNS, "created_at", &creator, &suggestions, &logos],
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

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Company {
    pub id: DbId,
    pub name: String,
    pub is_verified: bool,
    #[serde(rename = "company_logos", default)]
    pub logos: Vec<ImageEntity>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompanyDetailed {
    pub id: DbId,
    pub name: String,
    pub is_verified: bool,
    pub created_at: Timestamp,
    #[serde(default)]
    pub created_by: Option<Profile>,
    #[serde(rename = "company_edit_suggestions", default)]
    pub edit_suggestions: Vec<CompanyEditSuggestion>,
    #[serde(rename = "company_logos", default)]
    pub logos: Vec<ImageEntity>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompanyEditSuggestion {
    pub id: DbId,
    #[serde(default)]
    pub name: Option<String>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub resolved_at: Option<Timestamp>,
    #[serde(rename = "profiles")]
    pub created_by: Profile,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompanySummary {
    pub total_check_ins: i64,
    #[serde(default)]
    pub average_rating: Option<f64>,
}

// ---- wire DTOs ----

#[derive(Debug, Clone, Serialize)]
pub struct NewCompany {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateCompany {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewEditSuggestion {
    pub company_id: DbId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyParams {
    #[serde(rename = "p_company_id")]
    pub company_id: DbId,
    #[serde(rename = "p_is_verified")]
    pub is_verified: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryParams {
    #[serde(rename = "p_company_id")]
    pub company_id: DbId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_query_golden() {
        assert_eq!(
            query(Shape::Saved, true),
            "companies(id, name, is_verified, company_logos(id, file, blur_hash, created_by))"
        );
    }

    #[test]
    fn detailed_query_embeds_creator_and_suggestions() {
        let q = query(Shape::Detailed, false);
        assert!(q.contains("created_by:profiles!companies_created_by_fkey("));
        assert!(q.contains("company_edit_suggestions(id, name, created_at, resolved_at"));
    }

    #[test]
    fn projections_of_the_same_row_agree_on_identity() {
        let company: Company = serde_json::from_value(serde_json::json!({
            "id": 12, "name": "Ostrobothnia Brewing", "is_verified": true
        }))
        .unwrap();
        let detailed: CompanyDetailed = serde_json::from_value(serde_json::json!({
            "id": 12, "name": "Ostrobothnia Brewing", "is_verified": true,
            "created_at": "2023-04-01T10:00:00+00:00"
        }))
        .unwrap();
        assert_eq!(company.id, detailed.id);
    }
}
