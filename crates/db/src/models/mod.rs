//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for partial updates

pub mod activity;
pub mod blog;
pub mod review;
pub mod tour;
pub mod trek;
pub mod user;
