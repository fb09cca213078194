use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::CategoryRequest;
use super::repo::Category;
use super::services;
use crate::{auth::AdminUser, error::AppResult, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/:id", put(rename_category))
}

#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(services::list(state.catalog.as_ref()).await?))
}

#[instrument(skip(state))]
pub async fn create_category(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(body): Json<CategoryRequest>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let category = services::create(state.catalog.as_ref(), body).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[instrument(skip(state))]
pub async fn rename_category(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(body): Json<CategoryRequest>,
) -> AppResult<Json<Category>> {
    Ok(Json(services::rename(state.catalog.as_ref(), id, body).await?))
}
