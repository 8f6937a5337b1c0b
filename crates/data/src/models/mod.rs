//! Domain model projections, selection shapes, and wire DTOs.
//!
//! Each submodule contains:
//! - One `Deserialize` struct per projection of the entity (deeper
//!   projections embed child projections; equality of two projections of
//!   the same entity is keyed by id)
//! - A shape enum plus a `query(shape, with_table_name)` function compiling
//!   the matching selection string -- the single source of truth for what a
//!   projection selects and decodes
//! - `Serialize` DTOs for inserts, updates, and RPC parameter objects
//!   (RPC wire names carry the `p_` prefix)

pub mod brand;
pub mod category;
pub mod check_in;
pub mod company;
pub mod flavor;
pub mod friend;
pub mod image_entity;
pub mod location;
pub mod notification;
pub mod product;
pub mod profile;
pub mod report;
pub mod sub_brand;
