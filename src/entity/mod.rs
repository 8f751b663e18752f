pub mod favorites;
pub mod genres;
pub mod movie_genres;
pub mod movies;
pub mod reviews;
pub mod users;

pub use favorites::Entity as Favorites;
pub use genres::Entity as Genres;
pub use movie_genres::Entity as MovieGenres;
pub use movies::Entity as Movies;
pub use reviews::Entity as Reviews;
pub use users::Entity as Users;
