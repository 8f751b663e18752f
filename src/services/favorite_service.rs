use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use serde_json::Value;

use crate::{
    dto::favorites::AddBucketListRequest,
    entity::{
        favorites::{ActiveModel as FavoriteActive, Column as FavoriteCol, Entity as Favorites, Model as FavoriteModel},
        movies::{ActiveModel as MovieActive, Entity as Movies},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{FavoriteMovie, Movie},
    services::movie_service::sync_movie_id_sequence,
    state::AppState,
};

const UNKNOWN_TITLE: &str = "Unknown Title";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

impl ToggleOutcome {
    pub fn message(self) -> &'static str {
        match self {
            ToggleOutcome::Added => "Added to favorites",
            ToggleOutcome::Removed => "Removed from favorites",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketListOutcome {
    Added,
    AlreadyPresent,
}

impl BucketListOutcome {
    pub fn message(self) -> &'static str {
        match self {
            BucketListOutcome::Added => "Added to bucket list",
            BucketListOutcome::AlreadyPresent => "Already in bucket list",
        }
    }
}

pub async fn toggle_favorite(
    state: &AppState,
    user: &AuthUser,
    movie_id: i32,
) -> AppResult<ToggleOutcome> {
    let txn = state.orm.begin().await?;

    if Movies::find_by_id(movie_id).one(&txn).await?.is_none() {
        return Err(AppError::not_found("Movie not found"));
    }

    let outcome = match find_favorite(&txn, user.user_id, movie_id).await? {
        Some(favorite) => {
            favorite.delete(&txn).await?;
            ToggleOutcome::Removed
        }
        None => {
            insert_favorite(&txn, user.user_id, movie_id).await?;
            ToggleOutcome::Added
        }
    };

    txn.commit().await?;

    tracing::info!(user_id = user.user_id, movie_id, outcome = ?outcome, "favorite toggled");

    Ok(outcome)
}

/// Lists the caller's saved movies. Rows whose movie no longer exists are
/// deleted on the way and left out of the result.
pub async fn list_favorites(state: &AppState, user: &AuthUser) -> AppResult<Vec<FavoriteMovie>> {
    let txn = state.orm.begin().await?;

    if Users::find_by_id(user.user_id).one(&txn).await?.is_none() {
        return Err(AppError::not_found("User not found"));
    }

    let rows = Favorites::find()
        .filter(FavoriteCol::UserId.eq(user.user_id))
        .order_by_asc(FavoriteCol::Id)
        .find_also_related(Movies)
        .all(&txn)
        .await?;

    let mut items = Vec::with_capacity(rows.len());
    let mut orphaned = Vec::new();
    for (favorite, movie) in rows {
        match movie {
            Some(movie) => items.push(FavoriteMovie::from(Movie::from(movie))),
            None => {
                tracing::warn!(
                    user_id = user.user_id,
                    favorite_id = favorite.id,
                    movie_id = favorite.movie_id,
                    "removing orphaned favorite"
                );
                orphaned.push(favorite.id);
            }
        }
    }

    if !orphaned.is_empty() {
        Favorites::delete_many()
            .filter(FavoriteCol::Id.is_in(orphaned))
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;

    Ok(items)
}

/// Saves a movie to the bucket list, first storing the movie from the supplied
/// catalog fields when its id is unknown.
pub async fn add_to_bucket_list(
    state: &AppState,
    user: &AuthUser,
    payload: AddBucketListRequest,
) -> AppResult<BucketListOutcome> {
    let Some(movie_id) = payload.movie_id else {
        return Err(AppError::validation("Movie ID required"));
    };

    let txn = state.orm.begin().await?;

    if find_favorite(&txn, user.user_id, movie_id).await?.is_some() {
        return Ok(BucketListOutcome::AlreadyPresent);
    }

    if Movies::find_by_id(movie_id).one(&txn).await?.is_none() {
        let rating = coerce_rating(payload.vote_average.as_ref())?;
        let movie = MovieActive {
            id: Set(movie_id),
            title: Set(payload
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string())),
            description: Set(Some(payload.overview.unwrap_or_default())),
            release_year: Set(payload.release_date.as_deref().and_then(release_year_from_date)),
            director: Set(None),
            poster_url: Set(poster_url(&state.config.poster_base_url, payload.poster_path.as_deref())),
            rating: Set(rating),
            created_at: Set(Utc::now().into()),
        }
        .insert(&txn)
        .await?;
        sync_movie_id_sequence(&txn).await?;
        tracing::info!(movie_id = movie.id, title = %movie.title, "stored catalog movie");
    }

    insert_favorite(&txn, user.user_id, movie_id).await?;
    txn.commit().await?;

    tracing::info!(user_id = user.user_id, movie_id, "bucket list item added");

    Ok(BucketListOutcome::Added)
}

pub async fn remove_favorite(
    state: &AppState,
    user: &AuthUser,
    movie_id: Option<i32>,
) -> AppResult<()> {
    let Some(movie_id) = movie_id else {
        return Err(AppError::validation("Movie ID required"));
    };

    let result = Favorites::delete_many()
        .filter(FavoriteCol::UserId.eq(user.user_id))
        .filter(FavoriteCol::MovieId.eq(movie_id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("Not in bucket list"));
    }

    tracing::info!(user_id = user.user_id, movie_id, "bucket list item removed");

    Ok(())
}

async fn find_favorite<C>(conn: &C, user_id: i32, movie_id: i32) -> AppResult<Option<FavoriteModel>>
where
    C: ConnectionTrait,
{
    let favorite = Favorites::find()
        .filter(FavoriteCol::UserId.eq(user_id))
        .filter(FavoriteCol::MovieId.eq(movie_id))
        .one(conn)
        .await?;
    Ok(favorite)
}

async fn insert_favorite<C>(conn: &C, user_id: i32, movie_id: i32) -> AppResult<FavoriteModel>
where
    C: ConnectionTrait,
{
    let favorite = FavoriteActive {
        id: NotSet,
        user_id: Set(user_id),
        movie_id: Set(movie_id),
        created_at: Set(Utc::now().into()),
    }
    .insert(conn)
    .await?;
    Ok(favorite)
}

/// Year from the leading characters of a `YYYY-MM-DD` date. Anything
/// unparseable yields `None`.
pub fn release_year_from_date(date: &str) -> Option<i32> {
    let head: String = date.chars().take(4).collect();
    head.trim().parse().ok()
}

pub fn poster_url(base: &str, poster_path: Option<&str>) -> Option<String> {
    poster_path
        .filter(|path| !path.is_empty())
        .map(|path| format!("{base}{path}"))
}

pub fn coerce_rating(value: Option<&Value>) -> AppResult<f64> {
    match value {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| AppError::validation("vote_average must be numeric")),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| AppError::validation("vote_average must be numeric")),
        Some(_) => Err(AppError::validation("vote_average must be numeric")),
    }
}
