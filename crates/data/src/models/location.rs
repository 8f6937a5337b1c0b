//! Map locations resolved from device search, stored server-side with a
//! get-or-create RPC so coordinates stay canonical.

use serde::{Deserialize, Serialize};
use tastelog_core::types::LocationId;
use tastelog_postgrest::selection::select;

pub const TABLE: &str = "locations";
/// The signed-in user's recently checked-in locations, newest first.
pub const RECENT_VIEW: &str = "view__recent_locations_from_current_user";

const SAVED_COLUMNS: &str = "id, name, title, longitude, latitude, country_code, source";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Saved,
    Joined,
}

pub fn query(shape: Shape, with_table_name: bool) -> String {
    match shape {
        Shape::Saved => select(TABLE, &[SAVED_COLUMNS], with_table_name),
        Shape::Joined => {
            let country = select("countries", &["country_code, name, emoji"], true);
            select(TABLE, &[SAVED_COLUMNS, &country], with_table_name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(rename = "countries", default)]
    pub country: Option<Country>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Country {
    pub country_code: String,
    pub name: String,
    pub emoji: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationSummary {
    pub total_check_ins: i64,
    #[serde(default)]
    pub average_rating: Option<f64>,
}

// ---- wire DTOs ----

/// Parameters for the get-or-create RPC. The function resolves an existing
/// row by coordinates and name before inserting.
#[derive(Debug, Clone, Serialize)]
pub struct NewLocationParams {
    #[serde(rename = "p_name")]
    pub name: String,
    #[serde(rename = "p_title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "p_longitude", skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(rename = "p_latitude", skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(rename = "p_country_code", skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// Coordinates for nearby-location suggestions.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionParams {
    #[serde(rename = "p_longitude")]
    pub longitude: f64,
    #[serde(rename = "p_latitude")]
    pub latitude: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryParams {
    #[serde(rename = "p_location_id")]
    pub location_id: LocationId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joined_query_embeds_the_country() {
        assert_eq!(
            query(Shape::Joined, false),
            "id, name, title, longitude, latitude, country_code, source, \
             countries(country_code, name, emoji)"
        );
    }

    #[test]
    fn decodes_without_optional_columns() {
        let location: Location = serde_json::from_value(serde_json::json!({
            "id": "00000000-0000-0000-0000-00000000abcd",
            "name": "Panimoravintola Plevna"
        }))
        .unwrap();
        assert_eq!(location.country, None);
        assert_eq!(location.latitude, None);
    }
}
