mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use movie_catalog_api::app::build_app;
use serde_json::{Value, json};
use tower::ServiceExt;

use common::setup_state;

async fn test_app() -> anyhow::Result<Router> {
    Ok(build_app(setup_state().await?))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body)?).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

async fn register_and_login(app: &Router, username: &str) -> anyhow::Result<String> {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "pw"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": username, "password": "pw"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    Ok(body["access_token"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn review_flow_rejects_other_users() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({"username": "alice", "email": "a@x.io", "password": "pw"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user_id"], 1);
    assert_eq!(body["message"], "User created successfully");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "alice", "password": "pw"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], 1);
    let alice = body["access_token"].as_str().unwrap_or_default().to_string();
    assert!(!alice.is_empty());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/movies",
        Some(&alice),
        Some(json!({"title": "Dune"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/movies/1/reviews",
        Some(&alice),
        Some(json!({"content": "Great", "rating": 5})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let review_id = body["id"].as_i64().unwrap_or_default();
    assert_eq!(body["user_id"], 1);

    let bob = register_and_login(&app, "bob").await?;
    let uri = format!("/api/movies/reviews/{review_id}");

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&bob), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Unauthorized");

    // Malformed body from a non-author is still refused on ownership.
    let (status, _) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(&bob),
        Some(json!({"rating": "five"})),
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::GET, "/api/movies/1", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Dune");
    assert_eq!(body["reviews"].as_array().map(Vec::len), Some(1));

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&alice), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Review deleted");
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/movies",
        None,
        Some(json!({"title": "Dune"})),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, Method::GET, "/api/auth/profile", Some("garbage"), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token. Please login again.");

    let (status, _) = send(&app, Method::GET, "/api/movies", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn errors_are_json_objects() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (status, body) = send(&app, Method::GET, "/api/nowhere", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not Found"}));

    let (status, body) = send(&app, Method::GET, "/api/movies/404", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Movie not found"}));

    let (status, body) = send(&app, Method::GET, "/api/movies/abc", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not Found"}));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))?;
    let response = app.clone().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&bytes)?;
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn service_info_routes_answer() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (status, body) = send(&app, Method::GET, "/", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let (status, body) = send(&app, Method::GET, "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, Method::GET, "/api", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["endpoints"].is_array());

    let (status, body) = send(&app, Method::GET, "/api/movies/", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn legacy_bucket_list_routes_share_the_favorites_store() -> anyhow::Result<()> {
    let app = test_app().await?;
    let token = register_and_login(&app, "alice").await?;

    let item = json!({
        "movie_id": 550,
        "title": "Fight Club",
        "overview": "An insomniac office worker",
        "release_date": "1999-10-15",
        "poster_path": "/fc.jpg",
        "vote_average": 8.4
    });

    let (status, body) = send(&app, Method::POST, "/api/bucket-list", Some(&token), Some(item.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Added to bucket list");

    let (status, body) = send(&app, Method::POST, "/api/bucket-list", Some(&token), Some(item)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Already in bucket list");

    let (status, body) = send(&app, Method::GET, "/api/bucket-list", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], 550);
    assert_eq!(items[0]["release_year"], 1999);
    assert_eq!(items[0]["vote_average"], 8.4);
    assert_eq!(items[0]["rating"], 8.4);
    assert_eq!(items[0]["poster_path"], items[0]["poster_url"]);
    assert_eq!(items[0]["overview"], "An insomniac office worker");

    // The same row is visible through the canonical route.
    let (status, body) = send(&app, Method::GET, "/api/movies/favorites", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (status, body) = send(&app, Method::DELETE, "/api/bucket-list", Some(&token), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Movie ID required");

    let (status, _) = send(
        &app,
        Method::DELETE,
        "/api/bucket-list",
        Some(&token),
        Some(json!({"movie_id": 550})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::DELETE, "/api/bucket-list/550", Some(&token), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not in bucket list");
    Ok(())
}

#[tokio::test]
async fn favorite_toggle_through_the_api() -> anyhow::Result<()> {
    let app = test_app().await?;
    let token = register_and_login(&app, "alice").await?;

    send(&app, Method::POST, "/api/movies", Some(&token), Some(json!({"title": "Dune"}))).await?;

    let (status, body) = send(&app, Method::POST, "/api/movies/1/favorite", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Added to favorites");

    let (_, body) = send(&app, Method::POST, "/api/movies/1/favorite", Some(&token), None).await?;
    assert_eq!(body["message"], "Removed from favorites");

    let (status, _) = send(&app, Method::POST, "/api/movies/2/favorite", Some(&token), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() -> anyhow::Result<()> {
    let app = test_app().await?;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/movies")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
    Ok(())
}

#[tokio::test]
async fn bucket_list_accepts_string_movie_ids() -> anyhow::Result<()> {
    let app = test_app().await?;
    let token = register_and_login(&app, "alice").await?;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/bucket-list",
        Some(&token),
        Some(json!({"movie_id": "550", "title": "Fight Club"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, Method::GET, "/api/bucket-list", Some(&token), None).await?;
    assert_eq!(body[0]["id"], 550);

    let (status, _) = send(
        &app,
        Method::DELETE,
        "/api/bucket-list",
        Some(&token),
        Some(json!({"movie_id": "550"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/bucket-list",
        Some(&token),
        Some(json!({"movie_id": "fight-club"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    Ok(())
}
