use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    dto::genres::CreateGenreRequest,
    entity::{
        genres::{ActiveModel as GenreActive, Column as GenreCol, Entity as Genres},
        movie_genres::{Column as MovieGenreCol, Entity as MovieGenres},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Genre,
    state::AppState,
};

pub async fn list_genres(state: &AppState) -> AppResult<Vec<Genre>> {
    let genres = Genres::find()
        .order_by_asc(GenreCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Genre::from)
        .collect();
    Ok(genres)
}

pub async fn create_genre(
    state: &AppState,
    user: &AuthUser,
    payload: CreateGenreRequest,
) -> AppResult<Genre> {
    let name = match payload.name.map(|n| n.trim().to_string()) {
        Some(n) if !n.is_empty() => n,
        _ => return Err(AppError::validation("Name is required")),
    };

    let txn = state.orm.begin().await?;

    let exists = Genres::find()
        .filter(GenreCol::Name.eq(name.as_str()))
        .one(&txn)
        .await?
        .is_some();
    if exists {
        return Err(AppError::Conflict("Genre already exists".into()));
    }

    let genre = GenreActive {
        id: NotSet,
        name: Set(name),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(user_id = user.user_id, genre_id = genre.id, name = %genre.name, "genre created");

    Ok(Genre::from(genre))
}

pub async fn delete_genre(state: &AppState, user: &AuthUser, id: i32) -> AppResult<()> {
    let txn = state.orm.begin().await?;

    if Genres::find_by_id(id).one(&txn).await?.is_none() {
        return Err(AppError::not_found("Genre not found"));
    }

    MovieGenres::delete_many()
        .filter(MovieGenreCol::GenreId.eq(id))
        .exec(&txn)
        .await?;
    Genres::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(user_id = user.user_id, genre_id = id, "genre deleted");

    Ok(())
}
