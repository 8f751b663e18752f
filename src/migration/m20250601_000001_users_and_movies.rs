use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::Username, 80).unique_key())
                    .col(string_len(Users::Email, 120).unique_key())
                    .col(string(Users::PasswordHash))
                    .col(integer_null(Users::Age))
                    .col(timestamp_with_time_zone(Users::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(pk_auto(Movies::Id))
                    .col(string_len(Movies::Title, 200))
                    .col(text_null(Movies::Description))
                    .col(integer_null(Movies::ReleaseYear))
                    .col(string_len_null(Movies::Director, 100))
                    .col(string_len_null(Movies::PosterUrl, 500))
                    .col(double(Movies::Rating).default(0.0))
                    .col(timestamp_with_time_zone(Movies::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(super) enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Age,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(super) enum Movies {
    Table,
    Id,
    Title,
    Description,
    ReleaseYear,
    Director,
    PosterUrl,
    Rating,
    CreatedAt,
}
