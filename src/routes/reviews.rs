use axum::{Json, extract::State, http::StatusCode};

use crate::{
    dto::reviews::{AddReviewRequest, UpdateReviewRequest},
    error::{AppError, AppResult, ErrorBody},
    middleware::auth::AuthUser,
    models::Review,
    response::{AppJson, AppPath, MessageResponse},
    services::review_service,
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/movies/{id}/reviews",
    params(
        ("id" = i32, Path, description = "Movie ID")
    ),
    request_body = AddReviewRequest,
    responses(
        (status = 201, description = "Review added", body = Review),
        (status = 400, description = "Content and rating are required", body = ErrorBody),
        (status = 404, description = "Movie not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn add_review(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(movie_id): AppPath<i32>,
    AppJson(payload): AppJson<AddReviewRequest>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let review = review_service::add_review(&state, &user, movie_id, payload).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

#[utoipa::path(
    patch,
    path = "/api/movies/reviews/{review_id}",
    params(
        ("review_id" = i32, Path, description = "Review ID")
    ),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Updated review", body = Review),
        (status = 403, description = "Caller is not the author", body = ErrorBody),
        (status = 404, description = "Review not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn update_review(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(review_id): AppPath<i32>,
    payload: Result<AppJson<UpdateReviewRequest>, AppError>,
) -> AppResult<Json<Review>> {
    // A bad body must not mask the ownership check, so the service decides when to fail on it.
    let payload = payload.map(|AppJson(p)| p);
    let review = review_service::update_review(&state, &user, review_id, payload).await?;
    Ok(Json(review))
}

#[utoipa::path(
    delete,
    path = "/api/movies/reviews/{review_id}",
    params(
        ("review_id" = i32, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review deleted", body = MessageResponse),
        (status = 403, description = "Caller is not the author", body = ErrorBody),
        (status = 404, description = "Review not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn delete_review(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(review_id): AppPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    review_service::delete_review(&state, &user, review_id).await?;
    Ok(Json(MessageResponse::new("Review deleted")))
}
