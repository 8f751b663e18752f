use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod auth;
pub mod doc;
pub mod favorites;
pub mod genres;
pub mod health;
pub mod movies;
pub mod reviews;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(health::api_index))
        .nest("/auth", auth::router())
        .nest("/movies", movies::router())
        .nest("/genres", genres::router())
        .route("/movies/", get(movies::list_movies).post(movies::create_movie))
        .route("/genres/", get(genres::list_genres).post(genres::create_genre))
        .merge(legacy_router())
}

/// Deprecated top-level aliases. They share handlers, and so response shapes,
/// with the canonical routes.
fn legacy_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route(
            "/profile",
            get(auth::profile)
                .patch(auth::update_profile)
                .put(auth::update_profile),
        )
        .nest("/bucket-list", favorites::bucket_list_router())
}
