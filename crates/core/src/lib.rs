//! Domain types, validation rules, and pure helpers shared by the DB and API
//! layers.
//!
//! This crate has no I/O: everything here is deterministic and unit-testable.
//! Multipart form payloads arrive as strings; [`coerce`] and [`fields`]
//! normalize them into typed values before the per-resource validators run.

pub mod activities;
pub mod blogs;
pub mod coerce;
pub mod error;
pub mod fields;
pub mod pagination;
pub mod reviews;
pub mod roles;
pub mod slug;
pub mod tours;
pub mod treks;
pub mod types;
pub mod validate;
