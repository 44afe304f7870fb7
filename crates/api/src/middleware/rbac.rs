//! Admin gate for the `/users` endpoints.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sigil_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// An [`AuthUser`] holding the `admin` role.
///
/// Missing or invalid tokens are still 401; a valid player token is 403.
#[derive(Debug)]
pub struct RequireAdmin(pub AuthUser);

impl TryFrom<AuthUser> for RequireAdmin {
    type Error = AppError;

    fn try_from(user: AuthUser) -> Result<Self, Self::Error> {
        if user.is_admin() {
            Ok(Self(user))
        } else {
            tracing::debug!(user_id = user.user_id, role = %user.role, "Admin route refused");
            Err(AppError::Core(CoreError::Forbidden(
                "Only administrators may manage user accounts".into(),
            )))
        }
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        AuthUser::from_request_parts(parts, state)
            .await?
            .try_into()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use sigil_core::roles::{ROLE_ADMIN, ROLE_PLAYER};

    use super::*;

    fn user(role: &str) -> AuthUser {
        AuthUser {
            user_id: 7,
            role: role.to_string(),
        }
    }

    #[test]
    fn admin_passes() {
        let RequireAdmin(admin) = RequireAdmin::try_from(user(ROLE_ADMIN)).unwrap();
        assert_eq!(admin.user_id, 7);
    }

    #[test]
    fn player_is_forbidden() {
        assert_matches!(
            RequireAdmin::try_from(user(ROLE_PLAYER)),
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
    }
}
