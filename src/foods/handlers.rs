use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::FoodListParams;
use super::form::FoodFormValues;
use super::repo_types::Food;
use super::services;
use crate::{auth::AdminUser, error::AppResult, pagination::PaginatedResult, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods).post(create_food))
        .route("/foods/:id", axum::routing::put(update_food).delete(delete_food))
        .route("/foods/:id/form", get(get_food_form))
}

#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Query(params): Query<FoodListParams>,
) -> AppResult<Json<PaginatedResult<Food>>> {
    let filters = params.into_filters(state.config.catalog.default_page_size);
    let page = services::get_foods(state.catalog.as_ref(), &filters).await?;
    Ok(Json(page))
}

/// `null` when the food does not exist; the client then shows a blank form.
#[instrument(skip(state))]
pub async fn get_food_form(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Option<FoodFormValues>>> {
    let values = services::get_food_form(state.catalog.as_ref(), id).await?;
    Ok(Json(values))
}

#[instrument(skip(state, form))]
pub async fn create_food(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(form): Json<FoodFormValues>,
) -> AppResult<(StatusCode, Json<Food>)> {
    let food = services::create_food(state.catalog.as_ref(), form).await?;
    Ok((StatusCode::CREATED, Json(food)))
}

#[instrument(skip(state, form))]
pub async fn update_food(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(form): Json<FoodFormValues>,
) -> AppResult<Json<Food>> {
    let food = services::update_food(state.catalog.as_ref(), id, form).await?;
    Ok(Json(food))
}

#[instrument(skip(state))]
pub async fn delete_food(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    services::delete_food(state.catalog.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
