use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::instrument;

use super::dto::ServingUnitRequest;
use super::repo::ServingUnit;
use super::services;
use crate::{auth::AdminUser, error::AppResult, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/serving-units", get(list_serving_units).post(create_serving_unit))
}

#[instrument(skip(state))]
pub async fn list_serving_units(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> AppResult<Json<Vec<ServingUnit>>> {
    Ok(Json(services::list(state.catalog.as_ref()).await?))
}

#[instrument(skip(state))]
pub async fn create_serving_unit(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(body): Json<ServingUnitRequest>,
) -> AppResult<(StatusCode, Json<ServingUnit>)> {
    let unit = services::create(state.catalog.as_ref(), body).await?;
    Ok((StatusCode::CREATED, Json(unit)))
}
