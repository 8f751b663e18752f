use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::nullable;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateMovieRequest {
    /// External catalog id; auto-assigned when omitted.
    pub id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub director: Option<String>,
    pub poster_url: Option<String>,
    pub rating: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateMovieResponse {
    pub id: i32,
    pub message: String,
}

/// Patchable movie fields. Keys outside this list, `id` included, are dropped
/// during deserialization.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateMovieRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i32>)]
    pub release_year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub director: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub poster_url: Option<Option<String>>,
    pub rating: Option<f64>,
}

impl UpdateMovieRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.release_year.is_none()
            && self.director.is_none()
            && self.poster_url.is_none()
            && self.rating.is_none()
    }
}
