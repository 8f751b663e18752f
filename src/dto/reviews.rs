use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AddReviewRequest {
    pub content: Option<String>,
    pub rating: Option<i32>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateReviewRequest {
    pub content: Option<String>,
    pub rating: Option<i32>,
}

impl UpdateReviewRequest {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.rating.is_none()
    }
}
