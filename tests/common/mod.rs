#![allow(dead_code)]

use movie_catalog_api::{
    config::{AppConfig, DEFAULT_POSTER_BASE_URL, default_origins},
    db::{create_orm_conn, run_migrations},
    dto::{auth::RegisterRequest, movies::CreateMovieRequest},
    middleware::auth::AuthUser,
    services::{auth_service, movie_service},
    state::AppState,
};

pub const JWT_SECRET: &str = "integration-test-secret";

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: JWT_SECRET.into(),
        jwt_expires_hours: 1,
        cors_origins: default_origins(),
        poster_base_url: DEFAULT_POSTER_BASE_URL.into(),
    }
}

/// Fresh, migrated in-memory database per call.
pub async fn setup_state() -> anyhow::Result<AppState> {
    setup_state_at("sqlite::memory:").await
}

/// Migrated state on an external database, e.g. `TEST_DATABASE_URL`.
pub async fn setup_state_at(database_url: &str) -> anyhow::Result<AppState> {
    let config = AppConfig {
        database_url: database_url.into(),
        ..test_config()
    };
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm, config))
}

pub async fn create_user(state: &AppState, username: &str) -> anyhow::Result<AuthUser> {
    let resp = auth_service::register_user(
        state,
        RegisterRequest {
            username: Some(username.into()),
            email: Some(format!("{username}@example.com")),
            password: Some("pw".into()),
            age: None,
        },
    )
    .await?;
    Ok(AuthUser {
        user_id: resp.user_id,
    })
}

pub async fn create_movie(state: &AppState, user: &AuthUser, title: &str) -> anyhow::Result<i32> {
    let resp = movie_service::create_movie(
        state,
        user,
        CreateMovieRequest {
            title: Some(title.into()),
            ..Default::default()
        },
    )
    .await?;
    Ok(resp.id)
}
