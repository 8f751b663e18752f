use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{delete, get},
};

use crate::{
    dto::favorites::{AddBucketListRequest, FavoriteMovieList, RemoveBucketListRequest},
    error::{AppError, AppResult, ErrorBody},
    middleware::auth::AuthUser,
    response::{AppJson, AppPath, MessageResponse},
    services::favorite_service::{self, BucketListOutcome},
    state::AppState,
};

/// `/api/bucket-list`, kept for clients written against the older API.
pub fn bucket_list_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_favorites)
                .post(add_to_bucket_list)
                .delete(remove_from_bucket_list),
        )
        .route("/{movie_id}", delete(remove_bucket_list_item))
}

#[utoipa::path(
    post,
    path = "/api/movies/{id}/favorite",
    params(
        ("id" = i32, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Favorite added or removed", body = MessageResponse),
        (status = 404, description = "Movie not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(movie_id): AppPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    let outcome = favorite_service::toggle_favorite(&state, &user, movie_id).await?;
    Ok(Json(MessageResponse::new(outcome.message())))
}

#[utoipa::path(
    get,
    path = "/api/movies/favorites",
    responses(
        (status = 200, description = "Saved movies of the caller", body = FavoriteMovieList),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<FavoriteMovieList>> {
    let items = favorite_service::list_favorites(&state, &user).await?;
    Ok(Json(FavoriteMovieList { items }))
}

#[utoipa::path(
    post,
    path = "/api/bucket-list",
    request_body = AddBucketListRequest,
    responses(
        (status = 201, description = "Added to bucket list", body = MessageResponse),
        (status = 200, description = "Already in bucket list", body = MessageResponse),
        (status = 400, description = "Movie ID required", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn add_to_bucket_list(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<AddBucketListRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let outcome = favorite_service::add_to_bucket_list(&state, &user, payload).await?;
    let status = match outcome {
        BucketListOutcome::Added => StatusCode::CREATED,
        BucketListOutcome::AlreadyPresent => StatusCode::OK,
    };
    Ok((status, Json(MessageResponse::new(outcome.message()))))
}

#[utoipa::path(
    delete,
    path = "/api/bucket-list",
    request_body = RemoveBucketListRequest,
    responses(
        (status = 200, description = "Removed from bucket list", body = MessageResponse),
        (status = 400, description = "Movie ID required", body = ErrorBody),
        (status = 404, description = "Not in bucket list", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn remove_from_bucket_list(
    State(state): State<AppState>,
    user: AuthUser,
    body: Bytes,
) -> AppResult<Json<MessageResponse>> {
    // The body is optional here, so it is parsed by hand rather than through AppJson.
    let movie_id = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        serde_json::from_slice::<RemoveBucketListRequest>(&body)
            .map_err(|err| AppError::validation(format!("Invalid JSON body: {err}")))?
            .movie_id
    };
    favorite_service::remove_favorite(&state, &user, movie_id).await?;
    Ok(Json(MessageResponse::new("Removed from bucket list")))
}

#[utoipa::path(
    delete,
    path = "/api/bucket-list/{movie_id}",
    params(
        ("movie_id" = i32, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Removed from bucket list", body = MessageResponse),
        (status = 404, description = "Not in bucket list", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn remove_bucket_list_item(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(movie_id): AppPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    favorite_service::remove_favorite(&state, &user, Some(movie_id)).await?;
    Ok(Json(MessageResponse::new("Removed from bucket list")))
}
