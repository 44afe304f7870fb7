//! Admin-only user management.

use axum::extract::{Path, State};
use serde::Deserialize;
use sigil_core::types::DbId;
use sigil_db::models::user::UserResponse;
use sigil_db::repositories::{SessionRepo, UserRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{self, Envelope};
use crate::state::AppState;

/// Request body for `PATCH /users/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserStatus {
    pub is_active: bool,
}

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Envelope<Vec<UserResponse>>> {
    let mut conn = state.pool.acquire().await?;
    let users = UserRepo::list(&mut conn).await?;
    Ok(response::ok(
        "users_list",
        users.into_iter().map(UserResponse::from).collect(),
    ))
}

/// PATCH /api/v1/users/{id}
///
/// Activate or deactivate an account. Deactivation also revokes every open
/// session of that user.
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateUserStatus>,
) -> AppResult<Envelope<UserResponse>> {
    let mut tx = state.pool.begin().await?;

    if !UserRepo::set_active(&mut tx, id, input.is_active).await? {
        return Err(AppError::not_found("user", id));
    }
    if !input.is_active {
        SessionRepo::revoke_all_for_user(&mut tx, id).await?;
    }
    let user = UserRepo::find_by_id(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found("user", id))?;
    tx.commit().await?;

    tracing::info!(
        admin_id = admin.user_id,
        user_id = id,
        is_active = input.is_active,
        "User status changed"
    );
    Ok(response::ok("user_updated", user.into()))
}
