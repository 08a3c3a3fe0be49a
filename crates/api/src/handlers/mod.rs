//! HTTP handlers, one module per resource.
//!
//! Catalogue mutations consume `multipart/form-data` through [`crate::forms`]
//! and stage file writes through [`crate::uploads`]; reads are public and
//! return rows projected through [`crate::views`].

pub mod activity;
pub mod auth;
pub mod blog;
pub mod review;
pub mod tour;
pub mod trek;
