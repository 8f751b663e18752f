use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::lenient_id;
use crate::models::FavoriteMovie;

/// Bucket-list payload. Besides the id it carries the catalog fields used to
/// create the movie when it is not stored yet.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AddBucketListRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(value_type = Option<i32>)]
    pub movie_id: Option<i32>,
    pub title: Option<String>,
    pub overview: Option<String>,
    /// `YYYY-MM-DD`; only the year is kept.
    pub release_date: Option<String>,
    /// Path fragment appended to the poster base URL.
    pub poster_path: Option<String>,
    /// Number or numeric string.
    #[schema(value_type = Option<f64>)]
    pub vote_average: Option<Value>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RemoveBucketListRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(value_type = Option<i32>)]
    pub movie_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FavoriteMovieList {
    #[schema(value_type = Vec<FavoriteMovie>)]
    pub items: Vec<FavoriteMovie>,
}
