use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, Statement, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    dto::{
        is_blank,
        movies::{CreateMovieRequest, CreateMovieResponse, UpdateMovieRequest},
    },
    entity::{
        favorites::{Column as FavoriteCol, Entity as Favorites},
        genres::{Column as GenreCol, Entity as Genres},
        movie_genres::{Column as MovieGenreCol, Entity as MovieGenres},
        movies::{ActiveModel as MovieActive, Column as MovieCol, Entity as Movies},
        reviews::{Column as ReviewCol, Entity as Reviews},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Favorite, Genre, Movie, MovieDetail, Review},
    state::AppState,
};

pub async fn list_movies(state: &AppState) -> AppResult<Vec<Movie>> {
    let movies = Movies::find()
        .order_by_asc(MovieCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Movie::from)
        .collect();
    Ok(movies)
}

pub async fn get_movie(state: &AppState, id: i32) -> AppResult<MovieDetail> {
    let movie = Movies::find_by_id(id).one(&state.orm).await?;
    let movie = match movie {
        Some(m) => m,
        None => return Err(AppError::not_found("Movie not found")),
    };

    let reviews = movie
        .find_related(Reviews)
        .order_by_asc(ReviewCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Review::from)
        .collect();

    let favorites = movie
        .find_related(Favorites)
        .order_by_asc(FavoriteCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Favorite::from)
        .collect();

    let genres = movie
        .find_related(Genres)
        .order_by_asc(GenreCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Genre::from)
        .collect();

    Ok(MovieDetail {
        movie: Movie::from(movie),
        reviews,
        favorites,
        genres,
    })
}

pub async fn create_movie(
    state: &AppState,
    user: &AuthUser,
    payload: CreateMovieRequest,
) -> AppResult<CreateMovieResponse> {
    if is_blank(payload.title.as_deref()) {
        return Err(AppError::validation("Title is required"));
    }

    let txn = state.orm.begin().await?;

    let explicit_id = payload.id.is_some();
    let id = match payload.id {
        Some(id) => {
            if Movies::find_by_id(id).one(&txn).await?.is_some() {
                return Err(AppError::Conflict(format!("Movie {id} already exists")));
            }
            Set(id)
        }
        None => NotSet,
    };

    let movie = MovieActive {
        id,
        title: Set(payload.title.unwrap_or_default()),
        description: Set(payload.description),
        release_year: Set(payload.release_year),
        director: Set(payload.director),
        poster_url: Set(payload.poster_url),
        rating: Set(payload.rating.unwrap_or(0.0)),
        created_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;

    if explicit_id {
        sync_movie_id_sequence(&txn).await?;
    }

    txn.commit().await?;

    tracing::info!(user_id = user.user_id, movie_id = movie.id, "movie created");

    Ok(CreateMovieResponse {
        id: movie.id,
        message: "Movie created".into(),
    })
}

pub async fn update_movie(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateMovieRequest,
) -> AppResult<Movie> {
    let txn = state.orm.begin().await?;

    let existing = Movies::find_by_id(id).one(&txn).await?;
    let existing = match existing {
        Some(m) => m,
        None => return Err(AppError::not_found("Movie not found")),
    };

    // Only unknown keys (e.g. `id`) were sent: nothing to apply.
    if payload.is_empty() {
        return Ok(Movie::from(existing));
    }

    let mut active: MovieActive = existing.into();
    if let Some(title) = payload.title {
        if title.trim().is_empty() {
            return Err(AppError::validation("Title cannot be empty"));
        }
        active.title = Set(title);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(release_year) = payload.release_year {
        active.release_year = Set(release_year);
    }
    if let Some(director) = payload.director {
        active.director = Set(director);
    }
    if let Some(poster_url) = payload.poster_url {
        active.poster_url = Set(poster_url);
    }
    if let Some(rating) = payload.rating {
        active.rating = Set(rating);
    }

    let movie = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(user_id = user.user_id, movie_id = movie.id, "movie updated");

    Ok(Movie::from(movie))
}

/// Deletes the movie with its reviews, favorites and genre links in one transaction.
/// Favorites have no foreign key to movies, so they are removed here explicitly.
pub async fn delete_movie(state: &AppState, user: &AuthUser, id: i32) -> AppResult<()> {
    let txn = state.orm.begin().await?;

    if Movies::find_by_id(id).one(&txn).await?.is_none() {
        return Err(AppError::not_found("Movie not found"));
    }

    let reviews = Reviews::delete_many()
        .filter(ReviewCol::MovieId.eq(id))
        .exec(&txn)
        .await?;
    let favorites = Favorites::delete_many()
        .filter(FavoriteCol::MovieId.eq(id))
        .exec(&txn)
        .await?;
    MovieGenres::delete_many()
        .filter(MovieGenreCol::MovieId.eq(id))
        .exec(&txn)
        .await?;
    Movies::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        user_id = user.user_id,
        movie_id = id,
        reviews = reviews.rows_affected,
        favorites = favorites.rows_affected,
        "movie deleted"
    );

    Ok(())
}

/// Moves the `movies.id` sequence past the highest stored id. Needed on PostgreSQL
/// after inserting an explicit (external) id, which `serial` does not track.
pub(crate) async fn sync_movie_id_sequence<C>(conn: &C) -> AppResult<()>
where
    C: ConnectionTrait,
{
    if conn.get_database_backend() != DbBackend::Postgres {
        return Ok(());
    }

    conn.execute(Statement::from_string(
        DbBackend::Postgres,
        "SELECT setval(pg_get_serial_sequence('movies', 'id'), \
         GREATEST((SELECT MAX(id) FROM movies), 1))",
    ))
    .await?;
    Ok(())
}
