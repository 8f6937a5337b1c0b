//! PostgREST transport for the tastelog backend.
//!
//! Wraps the hosted REST/RPC/storage endpoints behind a typed client:
//! - [`selection`] -- the embedded-select grammar compiler primitives
//! - [`builder`] -- fluent, pure-until-executed request construction
//! - [`client`] -- the [`reqwest`]-backed transport with cancellation
//! - [`storage`] -- image bucket uploads and public URL composition
//!
//! All failures are classified into the `tastelog-core` error taxonomy
//! before they leave this crate.

pub mod builder;
pub mod client;
pub mod config;
mod error;
pub mod selection;
pub mod storage;

pub use builder::QueryBuilder;
pub use client::Client;
pub use config::ClientConfig;
pub use storage::Bucket;
