use movie_catalog_api::routes::health::{api_index, health_check, root};

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.status, "ok");
}

#[tokio::test]
async fn root_reports_running_service() {
    let response = root().await;
    assert_eq!(response.0.message, "Movie API is running");
    assert_eq!(response.0.status, "success");
}

#[tokio::test]
async fn api_index_lists_sections() {
    let response = api_index().await;
    assert_eq!(
        response.0.endpoints,
        vec!["/api/movies", "/api/auth", "/api/genres"]
    );
}
