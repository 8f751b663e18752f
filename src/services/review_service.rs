use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, Set, TransactionTrait};
use sea_orm::ActiveValue::NotSet;

use crate::{
    dto::reviews::{AddReviewRequest, UpdateReviewRequest},
    entity::{
        movies::Entity as Movies,
        reviews::{ActiveModel as ReviewActive, Entity as Reviews, Model as ReviewModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Review,
    state::AppState,
};

pub async fn add_review(
    state: &AppState,
    user: &AuthUser,
    movie_id: i32,
    payload: AddReviewRequest,
) -> AppResult<Review> {
    let (Some(content), Some(rating)) = (payload.content, payload.rating) else {
        return Err(AppError::validation("Content and rating are required"));
    };

    let txn = state.orm.begin().await?;

    if Movies::find_by_id(movie_id).one(&txn).await?.is_none() {
        return Err(AppError::not_found("Movie not found"));
    }

    let review = ReviewActive {
        id: NotSet,
        content: Set(content),
        rating: Set(rating),
        user_id: Set(user.user_id),
        movie_id: Set(movie_id),
        created_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(user_id = user.user_id, movie_id, review_id = review.id, "review added");

    Ok(Review::from(review))
}

/// Ownership is checked before the payload, so a non-author is refused with 403
/// whatever they sent.
pub async fn update_review(
    state: &AppState,
    user: &AuthUser,
    review_id: i32,
    payload: AppResult<UpdateReviewRequest>,
) -> AppResult<Review> {
    let txn = state.orm.begin().await?;

    let review = find_owned_review(&txn, user, review_id).await?;

    let payload = payload?;
    if payload.is_empty() {
        return Err(AppError::validation("No data provided"));
    }

    let mut active: ReviewActive = review.into();
    if let Some(content) = payload.content {
        active.content = Set(content);
    }
    if let Some(rating) = payload.rating {
        active.rating = Set(rating);
    }

    let review = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(user_id = user.user_id, review_id, "review updated");

    Ok(Review::from(review))
}

pub async fn delete_review(state: &AppState, user: &AuthUser, review_id: i32) -> AppResult<()> {
    let txn = state.orm.begin().await?;

    let review = find_owned_review(&txn, user, review_id).await?;
    review.delete(&txn).await?;

    txn.commit().await?;

    tracing::info!(user_id = user.user_id, review_id, "review deleted");

    Ok(())
}

async fn find_owned_review<C>(conn: &C, user: &AuthUser, review_id: i32) -> AppResult<ReviewModel>
where
    C: sea_orm::ConnectionTrait,
{
    let review = Reviews::find_by_id(review_id).one(conn).await?;
    let review = match review {
        Some(r) => r,
        None => return Err(AppError::not_found("Review not found")),
    };

    if !user.owns(review.user_id) {
        tracing::warn!(
            user_id = user.user_id,
            owner_id = review.user_id,
            review_id,
            "review ownership mismatch"
        );
        return Err(AppError::Forbidden("Unauthorized".into()));
    }

    Ok(review)
}
