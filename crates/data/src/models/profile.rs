//! Profiles, their settings, roles, statistics, and contributions.
//!
//! Three projections with strictly widening column sets:
//! - `Profile` (minimal): what any list row or embed needs
//! - `ProfileExtended`: the signed-in user, with settings and roles
//! - `ProfileDetailed`: moderation view, roles without settings

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tastelog_core::types::{DbId, LocationId, ProfileId};
use tastelog_postgrest::selection::select;
use tastelog_postgrest::Bucket;

use crate::models::image_entity::{self, ImageEntity};

pub const TABLE: &str = "profiles";
pub const SETTINGS_TABLE: &str = "profile_settings";

const MINIMAL_COLUMNS: &str = "id, is_private, preferred_name, joined_at";
const SAVED_COLUMNS: &str =
    "id, first_name, last_name, username, name_display, preferred_name, is_private, is_onboarded, joined_at";
const SETTINGS_COLUMNS: &str =
    "id, send_reaction_notifications, send_tagged_check_in_notifications, send_friend_request_notifications";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Minimal,
    Extended,
    Detailed,
}

pub fn query(shape: Shape, with_table_name: bool) -> String {
    let avatars = image_entity::query(Bucket::ProfileAvatars, true);
    match shape {
        Shape::Minimal => select(TABLE, &[MINIMAL_COLUMNS, &avatars], with_table_name),
        Shape::Extended => {
            let settings = settings_query(true);
            let roles = roles_query(true);
            select(
                TABLE,
                &[SAVED_COLUMNS, &settings, &roles, &avatars],
                with_table_name,
            )
        }
        Shape::Detailed => {
            let roles = roles_query(true);
            select(TABLE, &[SAVED_COLUMNS, &roles, &avatars], with_table_name)
        }
    }
}

pub fn settings_query(with_table_name: bool) -> String {
    select(SETTINGS_TABLE, &[SETTINGS_COLUMNS], with_table_name)
}

pub fn roles_query(with_table_name: bool) -> String {
    let permissions = select("permissions", &["id, name"], true);
    select("roles", &["id, name", &permissions], with_table_name)
}

/// Selection pulling every entity the profile has created, keyed by the
/// `created_by` foreign key of each table.
pub fn contributions_query(with_table_name: bool) -> String {
    use crate::models::{brand, company, product, sub_brand};
    use tastelog_postgrest::selection::select_fk;

    let products = select_fk(
        "products",
        "products_created_by_fkey",
        &[&product::query(product::Shape::JoinedBrandSubcategories, false)],
    );
    let companies = select_fk(
        "companies",
        "companies_created_by_fkey",
        &[&company::query(company::Shape::Saved, false)],
    );
    let brands = select_fk(
        "brands",
        "brands_created_by_fkey",
        &[&brand::query(brand::Shape::Saved, false)],
    );
    let sub_brands = select_fk(
        "sub_brands",
        "sub_brands_created_by_fkey",
        &[&sub_brand::query(sub_brand::Shape::JoinedBrand, false)],
    );
    let barcodes = select_fk(
        "product_barcodes",
        "product_barcodes_created_by_fkey",
        &["id, barcode, type"],
    );
    select(
        TABLE,
        &[&products, &companies, &brands, &sub_brands, &barcodes],
        with_table_name,
    )
}

// ---- projections ----

/// How a profile's public name is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameDisplay {
    FullName,
    Username,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub is_private: bool,
    #[serde(default)]
    pub preferred_name: Option<String>,
    pub joined_at: NaiveDate,
    #[serde(rename = "profile_avatars", default)]
    pub avatars: Vec<ImageEntity>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileExtended {
    pub id: ProfileId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub preferred_name: Option<String>,
    pub name_display: NameDisplay,
    pub is_private: bool,
    pub is_onboarded: bool,
    pub joined_at: NaiveDate,
    #[serde(rename = "profile_settings")]
    pub settings: ProfileSettings,
    pub roles: Vec<Role>,
    #[serde(rename = "profile_avatars", default)]
    pub avatars: Vec<ImageEntity>,
}

impl ProfileExtended {
    pub fn has_permission(&self, name: &str) -> bool {
        self.roles
            .iter()
            .flat_map(|role| role.permissions.iter())
            .any(|permission| permission.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileDetailed {
    pub id: ProfileId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub preferred_name: Option<String>,
    pub name_display: NameDisplay,
    pub is_private: bool,
    pub is_onboarded: bool,
    pub joined_at: NaiveDate,
    pub roles: Vec<Role>,
    #[serde(rename = "profile_avatars", default)]
    pub avatars: Vec<ImageEntity>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileSettings {
    pub id: ProfileId,
    pub send_reaction_notifications: bool,
    pub send_tagged_check_in_notifications: bool,
    pub send_friend_request_notifications: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Permission {
    pub id: DbId,
    pub name: String,
}

// ---- contributions ----

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Contributions {
    pub products: Vec<crate::models::product::ProductJoined>,
    pub companies: Vec<crate::models::company::Company>,
    pub brands: Vec<crate::models::brand::Brand>,
    pub sub_brands: Vec<crate::models::sub_brand::SubBrandJoinedBrand>,
    #[serde(rename = "product_barcodes")]
    pub barcodes: Vec<crate::models::product::Barcode>,
}

// ---- statistics ----

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileSummary {
    pub total_check_ins: i64,
    pub unique_check_ins: i64,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub rating_1: i64,
    #[serde(default)]
    pub rating_2: i64,
    #[serde(default)]
    pub rating_3: i64,
    #[serde(default)]
    pub rating_4: i64,
    #[serde(default)]
    pub rating_5: i64,
    #[serde(default)]
    pub rating_6: i64,
    #[serde(default)]
    pub rating_7: i64,
    #[serde(default)]
    pub rating_8: i64,
    #[serde(default)]
    pub rating_9: i64,
    #[serde(default)]
    pub rating_10: i64,
}

impl ProfileSummary {
    /// Histogram buckets in rating order, for chart rendering.
    pub fn rating_counts(&self) -> [i64; 10] {
        [
            self.rating_1,
            self.rating_2,
            self.rating_3,
            self.rating_4,
            self.rating_5,
            self.rating_6,
            self.rating_7,
            self.rating_8,
            self.rating_9,
            self.rating_10,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticsTimePeriod {
    Week,
    Month,
    Year,
    All,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimePeriodStatistic {
    pub total_check_ins: i64,
    pub unique_check_ins: i64,
    #[serde(default)]
    pub average_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryStatistics {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubcategoryStatistics {
    pub id: DbId,
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckInsPerDay {
    pub check_in_date: NaiveDate,
    pub num_check_ins: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopLocation {
    pub id: LocationId,
    pub name: String,
    pub count: i64,
}

// ---- wire DTOs ----

#[derive(Debug, Default, Clone, Serialize)]
pub struct UpdateProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_display: Option<NameDisplay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_onboarded: Option<bool>,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct UpdateProfileSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_reaction_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_tagged_check_in_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_friend_request_notifications: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryParams {
    #[serde(rename = "p_uid")]
    pub profile_id: ProfileId,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryStatsParams {
    #[serde(rename = "p_user_id")]
    pub profile_id: ProfileId,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubcategoryStatsParams {
    #[serde(rename = "p_user_id")]
    pub profile_id: ProfileId,
    #[serde(rename = "p_category_id")]
    pub category_id: DbId,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimePeriodStatsParams {
    #[serde(rename = "p_user_id")]
    pub profile_id: ProfileId,
    #[serde(rename = "p_time_period")]
    pub time_period: StatisticsTimePeriod,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckInsPerDayParams {
    #[serde(rename = "p_profile_id")]
    pub profile_id: ProfileId,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopLocationsParams {
    #[serde(rename = "p_profile_id")]
    pub profile_id: ProfileId,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsernameParams<'a> {
    #[serde(rename = "p_username")]
    pub username: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_query_golden() {
        assert_eq!(
            query(Shape::Minimal, false),
            "id, is_private, preferred_name, joined_at, \
             profile_avatars(id, file, blur_hash, created_by)"
        );
    }

    #[test]
    fn extended_query_embeds_settings_and_roles() {
        let q = query(Shape::Extended, false);
        assert!(q.starts_with(SAVED_COLUMNS));
        assert!(q.contains("profile_settings(id, send_reaction_notifications"));
        assert!(q.contains("roles(id, name, permissions(id, name))"));
    }

    #[test]
    fn detailed_query_has_roles_but_no_settings() {
        let q = query(Shape::Detailed, false);
        assert!(q.contains("roles(id, name"));
        assert!(!q.contains("profile_settings"));
    }

    #[test]
    fn extended_profile_decodes_and_resolves_permissions() {
        let profile: ProfileExtended = serde_json::from_value(serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "username": "tamara",
            "first_name": null,
            "last_name": null,
            "preferred_name": "tamara",
            "name_display": "username",
            "is_private": false,
            "is_onboarded": true,
            "joined_at": "2023-04-01",
            "profile_settings": {
                "id": "00000000-0000-0000-0000-000000000001",
                "send_reaction_notifications": true,
                "send_tagged_check_in_notifications": false,
                "send_friend_request_notifications": true
            },
            "roles": [{
                "id": 1,
                "name": "moderator",
                "permissions": [{ "id": 9, "name": "can_verify" }]
            }],
            "profile_avatars": []
        }))
        .unwrap();

        assert!(profile.has_permission(tastelog_core::roles::PERMISSION_CAN_VERIFY));
        assert!(!profile.has_permission("can_merge_products"));
        assert_eq!(profile.name_display, NameDisplay::Username);
    }

    #[test]
    fn profile_update_skips_unset_fields() {
        let update = UpdateProfile {
            preferred_name: Some("T".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "preferred_name": "T" })
        );
    }

    #[test]
    fn summary_params_use_rpc_wire_names() {
        let params = SummaryParams {
            profile_id: uuid::Uuid::nil(),
        };
        let value = serde_json::to_value(&params).unwrap();
        assert!(value.get("p_uid").is_some());
    }
}
