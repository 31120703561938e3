//! Liveness probe, mounted outside the guarded API scope.

use actix_web::{get, HttpResponse};

/// Report process liveness.
#[utoipa::path(
    get,
    path = "/healthz",
    responses((status = 200, description = "Process is live")),
    tags = ["health"],
    operation_id = "healthz"
)]
#[get("/healthz")]
pub async fn healthz() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
