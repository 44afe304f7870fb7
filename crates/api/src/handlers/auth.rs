//! Handlers for the `/auth` resource (register, login, refresh, logout, user).

use axum::extract::State;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sigil_core::error::CoreError;
use sigil_db::models::session::CreateSession;
use sigil_db::models::user::{CreateUser, RegisterUser, User, UserResponse};
use sigil_db::repositories::{SessionRepo, UserRepo};
use sqlx::PgConnection;
use validator::Validate;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::{self, Created, Envelope};
use crate::state::AppState;

const USERS_EMAIL_UNIQUE: &str = "uq_users_email";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Issued credentials, returned by register, login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account and sign it in. The very first account becomes admin.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterUser>,
) -> AppResult<Created<AuthResponse>> {
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::internal(format!("Password hashing error: {e}")))?;

    let new_user = CreateUser {
        name: input.name.trim().to_string(),
        email: normalize_email(&input.email),
        password_hash,
    };

    let mut tx = state.pool.begin().await?;
    let user = UserRepo::create(&mut tx, &new_user).await.map_err(|err| {
        if sigil_db::is_unique_violation(&err, USERS_EMAIL_UNIQUE) {
            AppError::conflict(
                "email_already_exists",
                format!("An account with email {} already exists", new_user.email),
            )
        } else {
            err.into()
        }
    })?;
    let response = create_auth_response(&state, &mut tx, user).await?;
    tx.commit().await?;

    tracing::info!(user_id = response.user.id, role = %response.user.role, "User registered");
    Ok(response::created("user_created", response))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<Envelope<AuthResponse>> {
    let mut tx = state.pool.begin().await?;

    let user = UserRepo::find_by_email(&mut tx, &normalize_email(&input.email))
        .await?
        .ok_or_else(invalid_credentials)?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Rejected login with wrong password");
        return Err(invalid_credentials());
    }

    let response = create_auth_response(&state, &mut tx, user).await?;
    tx.commit().await?;

    Ok(response::ok("token_generated", response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens. The old
/// session is revoked.
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RefreshRequest>,
) -> AppResult<Envelope<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);
    let mut tx = state.pool.begin().await?;

    let session = SessionRepo::find_by_refresh_token_hash(&mut tx, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    SessionRepo::revoke(&mut tx, session.id).await?;

    let user = UserRepo::find_by_id(&mut tx, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let response = create_auth_response(&state, &mut tx, user).await?;
    tx.commit().await?;

    Ok(response::ok("token_refreshed", response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Envelope<()>> {
    let mut tx = state.pool.begin().await?;
    let revoked = SessionRepo::revoke_all_for_user(&mut tx, auth_user.user_id).await?;
    tx.commit().await?;

    tracing::debug!(user_id = auth_user.user_id, revoked, "User logged out");
    Ok(response::message("token_invalidated"))
}

/// GET /api/v1/auth/user
pub async fn current_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Envelope<UserResponse>> {
    let mut conn = state.pool.acquire().await?;
    let user = UserRepo::find_by_id(&mut conn, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("user", auth_user.user_id))?;
    Ok(response::ok("authenticated_user", user.into()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    conn: &mut PgConnection,
    user: User,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::internal(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let session_input = CreateSession {
        user_id: user.id,
        refresh_token_hash: refresh_hash,
        expires_at: Utc::now()
            + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days),
    };
    SessionRepo::create(conn, &session_input).await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: user.into(),
    })
}
