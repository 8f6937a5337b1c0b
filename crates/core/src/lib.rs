//! Shared domain primitives for the tastelog data layer.
//!
//! Everything here is backend-agnostic: id and timestamp aliases, the
//! classified failure taxonomy every repository returns, the BlurHash wire
//! codec, deep-link paths, pagination ranges, and well-known role and
//! permission names.

pub mod blurhash;
pub mod error;
pub mod links;
pub mod pagination;
pub mod roles;
pub mod types;

pub use error::{Error, Result};
