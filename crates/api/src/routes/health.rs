//! Service health, mounted at `/health` outside the versioned API.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `ok` or `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthReport {
    fn new(db_healthy: bool) -> Self {
        Self {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }

    /// 503 while the database is unreachable.
    fn status_code(&self) -> StatusCode {
        if self.db_healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// GET /health
async fn report(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = HealthReport::new(sigil_db::health_check(&state.pool).await.is_ok());
    if !report.db_healthy {
        tracing::warn!("Health check could not reach the database");
    }
    (report.status_code(), Json(report))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(report))
}
