use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};

pub async fn connect_and_migrate(
    database_url: &str,
    max_connections: u32,
) -> Result<DatabaseConnection, sea_orm::DbErr> {
    let mut opts = ConnectOptions::new(database_url);
    opts.max_connections(max_connections.max(1)).sqlx_logging(false);

    let db = Database::connect(opts).await?;

    if db.get_database_backend() == sea_orm::DatabaseBackend::Sqlite {
        for pragma in ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"] {
            db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string()))
                .await?;
        }
    }

    // Every migration is create-if-absent, so this is safe on each start.
    Migrator::up(&db, None).await?;
    Ok(db)
}
