pub use sea_orm_migration::prelude::*;

mod m20250601_000001_users_and_movies;
mod m20250601_000002_genres;
mod m20250601_000003_reviews_and_favorites;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_users_and_movies::Migration),
            Box::new(m20250601_000002_genres::Migration),
            Box::new(m20250601_000003_reviews_and_favorites::Migration),
        ]
    }
}
