use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UpdateProfileRequest},
        favorites::{AddBucketListRequest, FavoriteMovieList, RemoveBucketListRequest},
        genres::CreateGenreRequest,
        movies::{CreateMovieRequest, CreateMovieResponse, UpdateMovieRequest},
        reviews::{AddReviewRequest, UpdateReviewRequest},
    },
    error::ErrorBody,
    models::{Favorite, FavoriteMovie, Genre, Movie, MovieDetail, Review, UserProfile},
    response::MessageResponse,
    routes::{auth, favorites, genres, health, movies, reviews},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::root,
        health::api_index,
        auth::register,
        auth::login,
        auth::profile,
        auth::update_profile,
        movies::list_movies,
        movies::create_movie,
        movies::get_movie,
        movies::update_movie,
        movies::delete_movie,
        reviews::add_review,
        reviews::update_review,
        reviews::delete_review,
        favorites::toggle_favorite,
        favorites::list_favorites,
        favorites::add_to_bucket_list,
        favorites::remove_from_bucket_list,
        favorites::remove_bucket_list_item,
        genres::list_genres,
        genres::create_genre,
        genres::delete_genre
    ),
    components(
        schemas(
            UserProfile,
            Movie,
            MovieDetail,
            Review,
            Favorite,
            FavoriteMovie,
            FavoriteMovieList,
            Genre,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            UpdateProfileRequest,
            CreateMovieRequest,
            CreateMovieResponse,
            UpdateMovieRequest,
            AddReviewRequest,
            UpdateReviewRequest,
            AddBucketListRequest,
            RemoveBucketListRequest,
            CreateGenreRequest,
            MessageResponse,
            ErrorBody
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service status endpoints"),
        (name = "Auth", description = "Registration, login and profile"),
        (name = "Movies", description = "Movie catalog"),
        (name = "Reviews", description = "Movie reviews"),
        (name = "Favorites", description = "Favorites and bucket list"),
        (name = "Genres", description = "Genre endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
