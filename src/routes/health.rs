use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthData {
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct ServiceInfo {
    pub message: String,
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct ApiIndex {
    pub endpoints: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "OK", body = HealthData),
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthData> {
    Json(HealthData {
        status: "ok".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = ServiceInfo),
    ),
    tag = "Health"
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Movie API is running".to_string(),
        status: "success".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/api",
    responses(
        (status = 200, description = "Top-level API sections", body = ApiIndex),
    ),
    tag = "Health"
)]
pub async fn api_index() -> Json<ApiIndex> {
    let endpoints = ["/api/movies", "/api/auth", "/api/genres"]
        .into_iter()
        .map(String::from)
        .collect();
    Json(ApiIndex { endpoints })
}
