//! Check-ins: the core activity record, plus reactions, tagged profiles,
//! and per-check-in flavors.
//!
//! Listing always decodes the full joined projection so a row rendered in
//! the feed, on a product page, or after creation is byte-for-byte the same
//! value. Visibility segments map to backend views; the selection string is
//! identical across them.

use chrono::SecondsFormat;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use tastelog_core::blurhash::BlurHash;
use tastelog_core::pagination::PageRange;
use tastelog_core::types::{DbId, LocationId, ProfileId, Timestamp};
use tastelog_postgrest::selection::{select, select_aliased};
use tastelog_postgrest::storage;

use crate::models::flavor::Flavor;
use crate::models::location::{self, Location};
use crate::models::product::{self, ProductJoined, ProductVariant};
use crate::models::profile::{self, Profile};

pub const TABLE: &str = "check_ins";
pub const REACTIONS_TABLE: &str = "check_in_reactions";
pub const TAGGED_PROFILES_TABLE: &str = "check_in_tagged_profiles";
pub const FLAVORS_TABLE: &str = "check_in_flavors";
/// Flattened view over check-in image columns, filterable by product.
pub const IMAGES_VIEW: &str = "check_in_images";
pub const ACTIVITY_FEED_VIEW: &str = "view__activity_feed";

const SAVED_COLUMNS: &str = "id, rating, review, image_file, check_in_at, blur_hash";
const IMAGE_COLUMNS: &str = "id, created_by, image_file, blur_hash";

/// Whose check-ins a listing covers. Each segment is a separate relation
/// with row-level filtering applied server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Everyone,
    Friends,
    You,
}

impl Segment {
    pub fn relation(self) -> &'static str {
        match self {
            Segment::Everyone => TABLE,
            Segment::Friends => "view__friend_check_ins",
            Segment::You => "view__current_user_check_ins",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Joined,
    Image,
}

pub fn query(shape: Shape, with_table_name: bool) -> String {
    match shape {
        Shape::Joined => {
            let profile = profile::query(profile::Shape::Minimal, true);
            let product = product::query(product::Shape::JoinedBrandSubcategories, true);
            let reactions = reaction_query(ReactionShape::JoinedProfile, true);
            let tagged = tagged_profiles_query(true);
            let flavors = flavors_query(true);
            let variant = product::variant_query(true);
            let serving_style = crate::models::category::serving_style_query(true);
            let location = select_aliased(
                "locations",
                "location_id",
                &[&location::query(location::Shape::Joined, false)],
            );
            let purchase_location = select_aliased(
                "purchase_location",
                "purchase_location_id",
                &[&location::query(location::Shape::Joined, false)],
            );
            select(
                TABLE,
                &[
                    SAVED_COLUMNS,
                    &profile,
                    &product,
                    &reactions,
                    &tagged,
                    &flavors,
                    &variant,
                    &serving_style,
                    &location,
                    &purchase_location,
                ],
                with_table_name,
            )
        }
        Shape::Image => select(IMAGES_VIEW, &[IMAGE_COLUMNS], with_table_name),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionShape {
    JoinedProfile,
    JoinedProfileCheckIn,
}

pub fn reaction_query(shape: ReactionShape, with_table_name: bool) -> String {
    let profile = profile::query(profile::Shape::Minimal, true);
    match shape {
        ReactionShape::JoinedProfile => {
            select(REACTIONS_TABLE, &["id", &profile], with_table_name)
        }
        ReactionShape::JoinedProfileCheckIn => {
            let check_in = query(Shape::Joined, true);
            select(REACTIONS_TABLE, &["id", &profile, &check_in], with_table_name)
        }
    }
}

pub fn tagged_profiles_query(with_table_name: bool) -> String {
    let profile = profile::query(profile::Shape::Minimal, true);
    select(TAGGED_PROFILES_TABLE, &[&profile], with_table_name)
}

pub fn flavors_query(with_table_name: bool) -> String {
    let flavor = crate::models::flavor::query(true);
    select(FLAVORS_TABLE, &[&flavor], with_table_name)
}

// ---- projections ----

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckIn {
    pub id: DbId,
    /// Wire scale 0-10 in half steps, rendered as 0-5 stars.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub image_file: Option<String>,
    #[serde(default)]
    pub check_in_at: Option<Timestamp>,
    #[serde(default)]
    pub blur_hash: Option<BlurHash>,
    #[serde(rename = "profiles")]
    pub profile: Profile,
    #[serde(rename = "products")]
    pub product: ProductJoined,
    #[serde(rename = "check_in_reactions", default)]
    pub reactions: Vec<CheckInReaction>,
    #[serde(rename = "check_in_tagged_profiles", default)]
    pub tagged_profiles: Vec<TaggedProfile>,
    #[serde(rename = "check_in_flavors", default)]
    pub flavors: Vec<CheckInFlavor>,
    #[serde(rename = "product_variants", default)]
    pub variant: Option<ProductVariant>,
    #[serde(rename = "serving_styles", default)]
    pub serving_style: Option<crate::models::category::ServingStyle>,
    #[serde(rename = "locations", default)]
    pub location: Option<Location>,
    #[serde(rename = "purchase_location", default)]
    pub purchase_location: Option<Location>,
}

impl CheckIn {
    /// True when the check-in carries no user-entered content beyond the
    /// product reference.
    pub fn is_empty(&self) -> bool {
        self.rating.is_none()
            && self.review.as_deref().map_or(true, |r| r.trim().is_empty())
            && self.flavors.is_empty()
            && self.purchase_location.is_none()
    }

    /// Bucket path of the attached image, `None` without one.
    pub fn image_path(&self) -> Option<String> {
        let file = self.image_file.as_deref()?;
        Some(storage::object_path(self.profile.id, file))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckInReaction {
    pub id: DbId,
    #[serde(rename = "profiles")]
    pub profile: Profile,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckInReactionJoinedCheckIn {
    pub id: DbId,
    #[serde(rename = "profiles")]
    pub profile: Profile,
    #[serde(rename = "check_ins")]
    pub check_in: CheckIn,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaggedProfile {
    #[serde(rename = "profiles")]
    pub profile: Profile,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckInFlavor {
    #[serde(rename = "flavors")]
    pub flavor: Flavor,
}

/// One row of the image grid, decoupled from the joined projection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckInImage {
    pub id: DbId,
    pub created_by: ProfileId,
    #[serde(default)]
    pub image_file: Option<String>,
    #[serde(default)]
    pub blur_hash: Option<BlurHash>,
}

// ---- listing queries ----

/// How to page the activity feed: by row range, or everything newer than an
/// already-loaded check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityFeedQuery {
    Paginated(PageRange),
    AfterId(DbId),
}

/// Listing filters for a profile's own check-in history.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileCheckInQuery {
    Paginated(PageRange),
    DateRange {
        range: PageRange,
        start: Timestamp,
        end: Timestamp,
    },
    Location {
        range: PageRange,
        location_id: LocationId,
    },
}

/// Which image grid to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageQuery {
    Profile(ProfileId),
    Product(DbId),
}

impl ImageQuery {
    pub fn filter(self) -> (&'static str, String) {
        match self {
            ImageQuery::Profile(id) => ("created_by", id.to_string()),
            ImageQuery::Product(id) => ("check_ins.product_id", id.to_string()),
        }
    }
}

// ---- wire DTOs ----

/// Serializes a `timestamptz` literal the backend accepts verbatim.
pub fn wire_timestamp(at: Timestamp) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn blank_review_as_null<S: Serializer>(
    review: &Option<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match review {
        Some(text) if !text.trim().is_empty() => serializer.serialize_some(text),
        _ => serializer.serialize_none(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCheckInParams {
    #[serde(rename = "p_product_id")]
    pub product_id: DbId,
    #[serde(rename = "p_rating", skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(rename = "p_review", serialize_with = "blank_review_as_null")]
    pub review: Option<String>,
    #[serde(rename = "p_blur_hash", skip_serializing_if = "Option::is_none")]
    pub blur_hash: Option<String>,
    #[serde(rename = "p_manufacturer_id", skip_serializing_if = "Option::is_none")]
    pub manufacturer_id: Option<DbId>,
    #[serde(rename = "p_serving_style_id", skip_serializing_if = "Option::is_none")]
    pub serving_style_id: Option<DbId>,
    #[serde(rename = "p_friend_ids", skip_serializing_if = "Option::is_none")]
    pub tagged_friend_ids: Option<Vec<ProfileId>>,
    #[serde(rename = "p_flavor_ids", skip_serializing_if = "Option::is_none")]
    pub flavor_ids: Option<Vec<DbId>>,
    #[serde(rename = "p_location_id", skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
    #[serde(rename = "p_purchase_location_id", skip_serializing_if = "Option::is_none")]
    pub purchase_location_id: Option<LocationId>,
    #[serde(rename = "p_check_in_at", skip_serializing_if = "Option::is_none")]
    pub check_in_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateCheckInParams {
    #[serde(rename = "p_check_in_id")]
    pub check_in_id: DbId,
    #[serde(rename = "p_product_id")]
    pub product_id: DbId,
    #[serde(rename = "p_rating", skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(rename = "p_review", serialize_with = "blank_review_as_null")]
    pub review: Option<String>,
    #[serde(rename = "p_blur_hash", skip_serializing_if = "Option::is_none")]
    pub blur_hash: Option<String>,
    #[serde(rename = "p_manufacturer_id", skip_serializing_if = "Option::is_none")]
    pub manufacturer_id: Option<DbId>,
    #[serde(rename = "p_serving_style_id", skip_serializing_if = "Option::is_none")]
    pub serving_style_id: Option<DbId>,
    #[serde(rename = "p_friend_ids", skip_serializing_if = "Option::is_none")]
    pub tagged_friend_ids: Option<Vec<ProfileId>>,
    #[serde(rename = "p_flavor_ids", skip_serializing_if = "Option::is_none")]
    pub flavor_ids: Option<Vec<DbId>>,
    #[serde(rename = "p_location_id", skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
    #[serde(rename = "p_purchase_location_id", skip_serializing_if = "Option::is_none")]
    pub purchase_location_id: Option<LocationId>,
    #[serde(rename = "p_check_in_at", skip_serializing_if = "Option::is_none")]
    pub check_in_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteAsModeratorParams {
    #[serde(rename = "p_check_in_id")]
    pub check_in_id: DbId,
}

/// Attaches a blur hash to an uploaded image row, keyed by file name.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateBlurHashParams {
    #[serde(rename = "p_file")]
    pub file: String,
    #[serde(rename = "p_blur_hash")]
    pub blur_hash: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewReaction {
    pub check_in_id: DbId,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    #[test]
    fn segments_share_the_selection_and_differ_in_relation() {
        assert_eq!(Segment::Everyone.relation(), "check_ins");
        assert_eq!(Segment::Friends.relation(), "view__friend_check_ins");
        assert_eq!(Segment::You.relation(), "view__current_user_check_ins");
        // A single shape serves every segment.
        assert!(query(Shape::Joined, false).starts_with(SAVED_COLUMNS));
    }

    #[test]
    fn joined_query_aliases_both_location_embeds() {
        let q = query(Shape::Joined, false);
        assert!(q.contains("locations:location_id(id, name, title"));
        assert!(q.contains("purchase_location:purchase_location_id(id, name, title"));
        assert!(q.contains("check_in_reactions(id, profiles("));
        assert!(q.contains("check_in_flavors(flavors(id, name))"));
    }

    #[test]
    fn image_query_filters() {
        let (column, value) = ImageQuery::Product(42).filter();
        assert_eq!(column, "check_ins.product_id");
        assert_eq!(value, "42");
        let (column, _) = ImageQuery::Profile(uuid::Uuid::nil()).filter();
        assert_eq!(column, "created_by");
    }

    #[test]
    fn blank_review_serializes_as_null() {
        let params = NewCheckInParams {
            product_id: 90,
            rating: Some(7.5),
            review: Some("   ".into()),
            blur_hash: None,
            manufacturer_id: None,
            serving_style_id: None,
            tagged_friend_ids: None,
            flavor_ids: None,
            location_id: None,
            purchase_location_id: None,
            check_in_at: Some(wire_timestamp(
                Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap(),
            )),
        };
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["p_review"], serde_json::Value::Null);
        assert_eq!(value["p_check_in_at"], "2023-11-14T22:13:20Z");
        assert!(value.get("p_flavor_ids").is_none());
    }

    #[test]
    fn full_joined_row_decodes() {
        let check_in: CheckIn = serde_json::from_value(fixture()).unwrap();
        assert_eq!(check_in.id, 1001);
        assert_eq!(check_in.rating, Some(8.0));
        assert_eq!(check_in.product.sub_brand.brand.name, "Nordic Hops");
        assert_eq!(check_in.flavors[0].flavor.name, "smoky");
        assert_eq!(check_in.tagged_profiles.len(), 1);
        assert_eq!(
            check_in.image_path().as_deref(),
            Some("00000000-0000-0000-0000-000000000001/1001_1700000000.jpeg")
        );
        assert!(!check_in.is_empty());
    }

    #[test]
    fn empty_check_in_detection() {
        let mut value = fixture();
        value["rating"] = serde_json::Value::Null;
        value["review"] = serde_json::json!("  ");
        value["check_in_flavors"] = serde_json::json!([]);
        value["purchase_location"] = serde_json::Value::Null;
        let check_in: CheckIn = serde_json::from_value(value).unwrap();
        assert!(check_in.is_empty());
    }

    pub(crate) fn fixture() -> serde_json::Value {
        serde_json::json!({
            "id": 1001,
            "rating": 8.0,
            "review": "Bright and resinous.",
            "image_file": "1001_1700000000.jpeg",
            "check_in_at": "2023-11-14T22:13:20+00:00",
            "blur_hash": "320:240:::L6PZfSjE.AyE_3t7t7R**0o#DgR4",
            "profiles": {
                "id": "00000000-0000-0000-0000-000000000001",
                "is_private": false,
                "preferred_name": "tamara",
                "joined_at": "2023-04-01",
                "profile_avatars": []
            },
            "products": {
                "id": 90,
                "name": "Talvi IPA",
                "description": null,
                "is_verified": true,
                "is_discontinued": false,
                "sub_brands": {
                    "id": 4, "name": null, "is_verified": true,
                    "brands": {
                        "id": 2, "name": "Nordic Hops", "is_verified": true,
                        "companies": { "id": 1, "name": "Ostrobothnia Brewing", "is_verified": true }
                    }
                },
                "categories": { "id": 3, "name": "beer", "icon": "🍺" },
                "subcategories": [
                    {
                        "id": 7, "name": "ipa", "is_verified": true,
                        "categories": { "id": 3, "name": "beer", "icon": "🍺" }
                    }
                ],
                "product_barcodes": []
            },
            "check_in_reactions": [
                {
                    "id": 501,
                    "profiles": {
                        "id": "00000000-0000-0000-0000-000000000002",
                        "is_private": false,
                        "preferred_name": "ville",
                        "joined_at": "2023-05-12",
                        "profile_avatars": []
                    }
                }
            ],
            "check_in_tagged_profiles": [
                {
                    "profiles": {
                        "id": "00000000-0000-0000-0000-000000000002",
                        "is_private": false,
                        "preferred_name": "ville",
                        "joined_at": "2023-05-12",
                        "profile_avatars": []
                    }
                }
            ],
            "check_in_flavors": [ { "flavors": { "id": 11, "name": "smoky" } } ],
            "product_variants": null,
            "serving_styles": { "id": 2, "name": "draft" },
            "locations": {
                "id": "00000000-0000-0000-0000-00000000abcd",
                "name": "Panimoravintola Plevna",
                "country_code": "FI"
            },
            "purchase_location": null
        })
    }
}
