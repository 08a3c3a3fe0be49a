//! Handlers for authentication (login, logout, current user).
//!
//! Login issues a single JWT returned both in the body (for API clients) and
//! as an `auth_token` cookie (for browsers). The cookie's `SameSite` policy
//! depends on whether the request origin is cross-site.

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use trailhead_core::error::{CoreError, FieldErrors};
use trailhead_core::validate::validate_email;
use trailhead_db::models::user::UserResponse;
use trailhead_db::repositories::UserRepo;

use crate::auth::jwt::generate_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, AUTH_COOKIE};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Message for any credential failure. Deliberately does not distinguish
/// unknown email from wrong password.
const INVALID_LOGIN_MESSAGE: &str = "Invalid login details";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
///
/// Fields are optional so absences surface as per-field validation messages
/// instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful login response. The token is also set as the `auth_token`
/// cookie.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Authenticate with email + password. Returns the JWT in the body and sets
/// the `auth_token` cookie (7 days, HttpOnly).
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let mut errors = FieldErrors::new();
    let email = match input.email.as_deref().map(str::trim) {
        Some(email) if !email.is_empty() => {
            errors.capture("email", validate_email(email));
            email.to_string()
        }
        _ => {
            errors.push("email", "The email field is required.");
            String::new()
        }
    };
    let password = match input.password {
        Some(password) if !password.is_empty() => password,
        _ => {
            errors.push("password", "The password field is required.");
            String::new()
        }
    };
    errors.into_result()?;

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_LOGIN_MESSAGE.into())))?;

    let password_valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_LOGIN_MESSAGE.into(),
        )));
    }

    let token = generate_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let max_age_secs = state.config.jwt.token_expiry_days * 24 * 60 * 60;
    let cookie = auth_cookie(
        &token,
        max_age_secs,
        is_cross_site(&headers, &state.config.public_base_url),
        state.config.public_base_url.starts_with("https://"),
    );

    tracing::info!(user_id = user.id, "User logged in");

    let body = LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
    };
    Ok(([(header::SET_COOKIE, cookie)], Json(body)))
}

/// POST /api/auth/logout
///
/// Clears the `auth_token` cookie. Tokens are stateless, so the bearer copy
/// simply expires on its own.
pub async fn logout(user: AuthUser) -> AppResult<impl IntoResponse> {
    tracing::info!(user_id = user.user_id, "User logged out");

    let body = crate::response::MessageResponse::new("Logged out");
    Ok(([(header::SET_COOKIE, expired_cookie())], Json(body)))
}

/// GET /api/auth/me
///
/// The authenticated user's profile.
pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    Ok(Json(ApiResponse::data(UserResponse::from(&user))))
}

// ---------------------------------------------------------------------------
// Cookie helpers
// ---------------------------------------------------------------------------

/// Whether the request's `Origin` differs from the site's own base URL.
/// Requests without an `Origin` header (curl, same-origin GET) are same-site.
fn is_cross_site(headers: &HeaderMap, public_base_url: &str) -> bool {
    match headers.get(header::ORIGIN).and_then(|v| v.to_str().ok()) {
        Some(origin) => origin.trim_end_matches('/') != public_base_url,
        None => false,
    }
}

/// Build the `auth_token` Set-Cookie value.
///
/// Cross-site requests need `SameSite=None`, which browsers only accept
/// together with `Secure`. Same-site requests get `SameSite=Lax` and carry
/// `Secure` only when the site itself is HTTPS.
fn auth_cookie(token: &str, max_age_secs: i64, cross_site: bool, https: bool) -> String {
    let mut cookie = format!("{AUTH_COOKIE}={token}; Path=/; Max-Age={max_age_secs}; HttpOnly");
    if cross_site {
        cookie.push_str("; SameSite=None; Secure");
    } else {
        cookie.push_str("; SameSite=Lax");
        if https {
            cookie.push_str("; Secure");
        }
    }
    cookie
}

/// Set-Cookie value that removes the auth cookie.
fn expired_cookie() -> String {
    format!("{AUTH_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}
