use tracing::info;
use validator::Validate;

use super::dto::ServingUnitRequest;
use super::repo::ServingUnit;
use crate::catalog::{app_error, CatalogRepo};
use crate::error::{AppError, AppResult};

pub async fn list(catalog: &dyn CatalogRepo) -> AppResult<Vec<ServingUnit>> {
    catalog.list_serving_units().await.map_err(app_error)
}

pub async fn create(catalog: &dyn CatalogRepo, req: ServingUnitRequest) -> AppResult<ServingUnit> {
    let req = ServingUnitRequest {
        name: req.name.trim().to_string(),
    };
    req.validate()?;
    if catalog
        .find_serving_unit_by_name(&req.name)
        .await
        .map_err(app_error)?
        .is_some()
    {
        return Err(AppError::Conflict(format!("serving unit {} already exists", req.name)));
    }
    let unit = catalog
        .create_serving_unit(&req.name)
        .await
        .map_err(app_error)?;
    info!(serving_unit_id = %unit.id, name = %unit.name, "serving unit created");
    Ok(unit)
}
