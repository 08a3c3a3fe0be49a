//! Authentication, authorization, and response-header middleware.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT
//!   (Bearer header or `auth_token` cookie).
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`headers::security_headers`] -- Standard security headers on every response.

pub mod auth;
pub mod headers;
pub mod rbac;
