mod config;
mod db;
mod entities;
mod error;
mod models;
mod routes;
mod store;

use std::sync::Arc;

use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    store::{FilmStore, MemoryStore, SqlStore},
};

pub struct AppState {
    pub store: Arc<dyn FilmStore>,
}

async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn FilmStore>> {
    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, films are kept in memory and lost on restart");
        return Ok(Arc::new(MemoryStore::new()));
    };

    let db = db::connect_and_migrate(url, config.db_max_connections).await?;
    Ok(Arc::new(SqlStore::new(db)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,filmshelf=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let store = open_store(&config).await?;
    tracing::info!(backend = store.backend(), "film store ready");

    let state = Arc::new(AppState { store });

    let app = routes::router(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(database_url: Option<String>) -> Config {
        Config {
            addr: "127.0.0.1:0".parse().unwrap(),
            database_url,
            db_max_connections: 1,
        }
    }

    #[tokio::test]
    async fn missing_database_url_selects_memory_store() {
        let store = open_store(&config(None)).await.unwrap();
        assert_eq!(store.backend(), "memory");
    }

    #[tokio::test]
    async fn database_url_selects_sqlite_store() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("films.db").display());

        let store = open_store(&config(Some(url))).await.unwrap();
        assert_eq!(store.backend(), "sqlite");
    }
}
