//! User-filed content reports, one nullable foreign key per reportable
//! entity kind.

use serde::{Deserialize, Serialize};
use tastelog_core::types::{DbId, Timestamp};
use tastelog_postgrest::selection::select;

use crate::models::profile::{self, Profile};

pub const TABLE: &str = "reports";

pub fn query(with_table_name: bool) -> String {
    select(
        TABLE,
        &[
            "id, message, created_at",
            &profile::query(profile::Shape::Minimal, true),
        ],
        with_table_name,
    )
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Report {
    pub id: DbId,
    #[serde(default)]
    pub message: Option<String>,
    pub created_at: Timestamp,
    #[serde(rename = "profiles")]
    pub created_by: Profile,
}

/// Exactly one target id should be set; the table enforces it with a check
/// constraint.
#[derive(Debug, Default, Clone, Serialize)]
pub struct NewReport {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_brand_id: Option<DbId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_report_serializes_only_its_target() {
        let report = NewReport {
            message: "duplicate".into(),
            product_id: Some(90),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({ "message": "duplicate", "product_id": 90 })
        );
    }
}
