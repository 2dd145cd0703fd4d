use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::info;

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{Film, FilmFields, Message},
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/films", get(list_films).post(create_film))
        .route("/films/{id}", get(get_film).put(update_film).delete(delete_film))
        .with_state(state)
}

pub async fn list_films(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Film>>> {
    let films = state.store.list().await?;
    info!(count = films.len(), "GET /films");
    Ok(Json(films))
}

pub async fn create_film(
    State(state): State<Arc<AppState>>,
    Json(fields): Json<FilmFields>,
) -> AppResult<Json<Film>> {
    info!(payload = ?fields, "POST /films");
    fields.validate().map_err(AppError::Invalid)?;

    let film = state.store.create(fields).await?;
    info!(id = film.id, "created film");
    Ok(Json(film))
}

pub async fn get_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Film>> {
    info!(id, "GET /films/{id}");
    Ok(Json(state.store.get(id).await?))
}

pub async fn update_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(fields): Json<FilmFields>,
) -> AppResult<Json<Film>> {
    info!(id, payload = ?fields, "PUT /films/{id}");
    fields.validate().map_err(AppError::Invalid)?;

    let film = state.store.update(id, fields).await?;
    info!(id, "updated film");
    Ok(Json(film))
}

pub async fn delete_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Message>> {
    info!(id, "DELETE /films/{id}");
    state.store.delete(id).await?;
    info!(id, "deleted film");
    Ok(Json(Message { message: "Film deleted" }))
}
