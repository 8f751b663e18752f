use chrono::Utc;
use movie_catalog_api::{
    config::AppConfig,
    db::{OrmConn, create_orm_conn, run_migrations},
    entity::{
        genres::{ActiveModel as GenreActive, Column as GenreCol, Entity as Genres},
        movie_genres::ActiveModel as MovieGenreActive,
        movies::{ActiveModel as MovieActive, Column as MovieCol, Entity as Movies},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    },
    services::auth_service::hash_password,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let user_id = ensure_user(&orm, "demo", "demo@example.com", "demo123").await?;
    let genre_ids = seed_genres(&orm).await?;
    seed_movies(&orm, &genre_ids).await?;

    println!("Seed completed. Demo user ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    orm: &OrmConn,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<i32> {
    if let Some(existing) = Users::find()
        .filter(UserCol::Username.eq(username))
        .one(orm)
        .await?
    {
        println!("User {username} already present");
        return Ok(existing.id);
    }

    let password_hash = hash_password(password)?;
    let user = UserActive {
        id: NotSet,
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash),
        age: Set(None),
        created_at: Set(Utc::now().into()),
    }
    .insert(orm)
    .await?;

    println!("Ensured user {username} ({email})");
    Ok(user.id)
}

async fn seed_genres(orm: &OrmConn) -> anyhow::Result<Vec<(String, i32)>> {
    let mut ids = Vec::new();
    for name in ["Drama", "Science Fiction", "Thriller", "Comedy"] {
        let genre = match Genres::find().filter(GenreCol::Name.eq(name)).one(orm).await? {
            Some(genre) => genre,
            None => {
                GenreActive {
                    id: NotSet,
                    name: Set(name.to_string()),
                }
                .insert(orm)
                .await?
            }
        };
        ids.push((genre.name, genre.id));
    }

    println!("Seeded genres");
    Ok(ids)
}

async fn seed_movies(orm: &OrmConn, genre_ids: &[(String, i32)]) -> anyhow::Result<()> {
    let movies = [
        ("Dune", "Paul Atreides arrives on Arrakis.", 2021, "Denis Villeneuve", 8.0, "Science Fiction"),
        ("Parasite", "Greed and class discrimination.", 2019, "Bong Joon-ho", 8.5, "Thriller"),
        ("Amélie", "A shy waitress decides to change lives.", 2001, "Jean-Pierre Jeunet", 8.3, "Comedy"),
        ("Whiplash", "A drummer and his instructor.", 2014, "Damien Chazelle", 8.5, "Drama"),
    ];

    for (title, description, year, director, rating, genre) in movies {
        if Movies::find()
            .filter(MovieCol::Title.eq(title))
            .one(orm)
            .await?
            .is_some()
        {
            continue;
        }

        let movie = MovieActive {
            id: NotSet,
            title: Set(title.to_string()),
            description: Set(Some(description.to_string())),
            release_year: Set(Some(year)),
            director: Set(Some(director.to_string())),
            poster_url: Set(None),
            rating: Set(rating),
            created_at: Set(Utc::now().into()),
        }
        .insert(orm)
        .await?;

        if let Some((_, genre_id)) = genre_ids.iter().find(|(name, _)| name == genre) {
            MovieGenreActive {
                movie_id: Set(movie.id),
                genre_id: Set(*genre_id),
            }
            .insert(orm)
            .await?;
        }
    }

    println!("Seeded movies");
    Ok(())
}
