use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch, post},
};

use crate::{
    dto::movies::{CreateMovieRequest, CreateMovieResponse, UpdateMovieRequest},
    error::{AppResult, ErrorBody},
    middleware::auth::AuthUser,
    models::{Movie, MovieDetail},
    response::{AppJson, AppPath, MessageResponse},
    routes::{favorites, reviews},
    services::movie_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_movies).post(create_movie))
        .route("/favorites", get(favorites::list_favorites))
        .route(
            "/reviews/{review_id}",
            patch(reviews::update_review).delete(reviews::delete_review),
        )
        .route("/{id}", get(get_movie).patch(update_movie).delete(delete_movie))
        .route("/{id}/reviews", post(reviews::add_review))
        .route("/{id}/favorite", post(favorites::toggle_favorite))
}

#[utoipa::path(
    get,
    path = "/api/movies",
    responses(
        (status = 200, description = "All movies", body = Vec<Movie>)
    ),
    tag = "Movies"
)]
pub async fn list_movies(State(state): State<AppState>) -> AppResult<Json<Vec<Movie>>> {
    let movies = movie_service::list_movies(&state).await?;
    Ok(Json(movies))
}

#[utoipa::path(
    post,
    path = "/api/movies",
    request_body = CreateMovieRequest,
    responses(
        (status = 201, description = "Movie created", body = CreateMovieResponse),
        (status = 400, description = "Title missing or id already used", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
pub async fn create_movie(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateMovieRequest>,
) -> AppResult<(StatusCode, Json<CreateMovieResponse>)> {
    let resp = movie_service::create_movie(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/movies/{id}",
    params(
        ("id" = i32, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie with reviews, favorites and genres", body = MovieDetail),
        (status = 404, description = "Movie not found", body = ErrorBody)
    ),
    tag = "Movies"
)]
pub async fn get_movie(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<MovieDetail>> {
    let movie = movie_service::get_movie(&state, id).await?;
    Ok(Json(movie))
}

#[utoipa::path(
    patch,
    path = "/api/movies/{id}",
    params(
        ("id" = i32, Path, description = "Movie ID")
    ),
    request_body = UpdateMovieRequest,
    responses(
        (status = 200, description = "Updated movie", body = Movie),
        (status = 404, description = "Movie not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
pub async fn update_movie(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateMovieRequest>,
) -> AppResult<Json<Movie>> {
    let movie = movie_service::update_movie(&state, &user, id, payload).await?;
    Ok(Json(movie))
}

#[utoipa::path(
    delete,
    path = "/api/movies/{id}",
    params(
        ("id" = i32, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie deleted", body = MessageResponse),
        (status = 404, description = "Movie not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    movie_service::delete_movie(&state, &user, id).await?;
    Ok(Json(MessageResponse::new("Movie deleted")))
}
