use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // pk_auto renders as INTEGER PRIMARY KEY AUTOINCREMENT on SQLite: a
        // 64-bit rowid whose values are never handed out again after delete.
        manager
            .create_table(
                Table::create()
                    .table(Film::Table)
                    .if_not_exists()
                    .col(pk_auto(Film::Id))
                    .col(string(Film::Title))
                    .col(integer_null(Film::Year))
                    .col(string_null(Film::Director))
                    .col(string(Film::Status))
                    .col(string(Film::DateAdded))
                    .col(string(Film::Note))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Film::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Film {
    Table,
    Id,
    Title,
    Year,
    Director,
    Status,
    DateAdded,
    Note,
}
