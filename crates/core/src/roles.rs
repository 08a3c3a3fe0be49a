//! User role names.
//!
//! The content API has a single privileged role; write endpoints require it
//! and reads are public.

/// Role granted full content management access.
pub const ROLE_ADMIN: &str = "admin";
