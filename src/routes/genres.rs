use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get},
};

use crate::{
    dto::genres::CreateGenreRequest,
    error::{AppResult, ErrorBody},
    middleware::auth::AuthUser,
    models::Genre,
    response::{AppJson, AppPath, MessageResponse},
    services::genre_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_genres).post(create_genre))
        .route("/{id}", delete(delete_genre))
}

#[utoipa::path(
    get,
    path = "/api/genres",
    responses(
        (status = 200, description = "All genres", body = Vec<Genre>)
    ),
    tag = "Genres"
)]
pub async fn list_genres(State(state): State<AppState>) -> AppResult<Json<Vec<Genre>>> {
    let genres = genre_service::list_genres(&state).await?;
    Ok(Json(genres))
}

#[utoipa::path(
    post,
    path = "/api/genres",
    request_body = CreateGenreRequest,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 400, description = "Name missing or already used", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Genres"
)]
pub async fn create_genre(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateGenreRequest>,
) -> AppResult<(StatusCode, Json<Genre>)> {
    let genre = genre_service::create_genre(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(genre)))
}

#[utoipa::path(
    delete,
    path = "/api/genres/{id}",
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Genre deleted", body = MessageResponse),
        (status = 404, description = "Genre not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Genres"
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    genre_service::delete_genre(&state, &user, id).await?;
    Ok(Json(MessageResponse::new("Genre deleted")))
}
