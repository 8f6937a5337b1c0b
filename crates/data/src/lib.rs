//! Typed domain model and repositories for the tastelog backend.
//!
//! `models` holds immutable projection structs, their selection shapes, and
//! wire DTOs. `repositories` exposes one facade per entity family; every
//! operation returns a [`tastelog_core::Result`] with the classified error
//! taxonomy.

pub mod models;
pub mod repositories;
