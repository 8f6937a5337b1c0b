//! Well-known role and permission names.
//!
//! These must match the backend's seeded `roles` and `permissions` rows.
//! Verification gating: deleting a verified entity requires the matching
//! `can_delete_*` permission; the backend enforces it, these names let the
//! UI hide the affordance up front.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MODERATOR: &str = "moderator";
pub const ROLE_USER: &str = "user";

pub const PERMISSION_CAN_DELETE_PRODUCTS: &str = "can_delete_products";
pub const PERMISSION_CAN_DELETE_COMPANIES: &str = "can_delete_companies";
pub const PERMISSION_CAN_DELETE_BRANDS: &str = "can_delete_brands";
pub const PERMISSION_CAN_VERIFY: &str = "can_verify";
pub const PERMISSION_CAN_MERGE_PRODUCTS: &str = "can_merge_products";
pub const PERMISSION_CAN_EDIT_COMPANIES: &str = "can_edit_companies";
pub const PERMISSION_CAN_ADD_BARCODES: &str = "can_add_barcodes";
pub const PERMISSION_CAN_DELETE_CHECK_INS_AS_MODERATOR: &str =
    "can_delete_check_ins_as_moderator";
