use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::{favorites, genres, movies, reviews, users};

/// A user as returned to clients: never carries the password hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub age: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub director: Option<String>,
    pub poster_url: Option<String>,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Review {
    pub id: i32,
    pub content: String,
    pub rating: i32,
    pub user_id: i32,
    pub movie_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub movie_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub movie: Movie,
    pub reviews: Vec<Review>,
    pub favorites: Vec<Favorite>,
    pub genres: Vec<Genre>,
}

/// Bucket-list entry. Older clients were written against a third-party
/// catalog schema, so the aliased fields are emitted next to the canonical ones.
#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteMovie {
    #[serde(flatten)]
    pub movie: Movie,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub vote_average: f64,
}

impl From<Movie> for FavoriteMovie {
    fn from(movie: Movie) -> Self {
        Self {
            poster_path: movie.poster_url.clone(),
            overview: movie.description.clone(),
            vote_average: movie.rating,
            movie,
        }
    }
}

impl From<users::Model> for UserProfile {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            age: model.age,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<movies::Model> for Movie {
    fn from(model: movies::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            release_year: model.release_year,
            director: model.director,
            poster_url: model.poster_url,
            rating: model.rating,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<reviews::Model> for Review {
    fn from(model: reviews::Model) -> Self {
        Self {
            id: model.id,
            content: model.content,
            rating: model.rating,
            user_id: model.user_id,
            movie_id: model.movie_id,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<favorites::Model> for Favorite {
    fn from(model: favorites::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            movie_id: model.movie_id,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<genres::Model> for Genre {
    fn from(model: genres::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}
