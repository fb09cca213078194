use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::dto::CategoryRequest;
use super::repo::Category;
use crate::catalog::{app_error, CatalogRepo};
use crate::error::{AppError, AppResult};

pub async fn list(catalog: &dyn CatalogRepo) -> AppResult<Vec<Category>> {
    catalog.list_categories().await.map_err(app_error)
}

async fn unique_name(
    catalog: &dyn CatalogRepo,
    req: &CategoryRequest,
    except: Option<Uuid>,
) -> AppResult<String> {
    let name = req.name.trim().to_string();
    CategoryRequest { name: name.clone() }.validate()?;
    let existing = catalog
        .find_category_by_name(&name)
        .await
        .map_err(app_error)?;
    if let Some(c) = existing {
        if Some(c.id) != except {
            return Err(AppError::Conflict(format!("category {name} already exists")));
        }
    }
    Ok(name)
}

pub async fn create(catalog: &dyn CatalogRepo, req: CategoryRequest) -> AppResult<Category> {
    let name = unique_name(catalog, &req, None).await?;
    let category = catalog
        .create_category(&name)
        .await
        .map_err(app_error)?;
    info!(category_id = %category.id, name = %category.name, "category created");
    Ok(category)
}

pub async fn rename(catalog: &dyn CatalogRepo, id: Uuid, req: CategoryRequest) -> AppResult<Category> {
    let name = unique_name(catalog, &req, Some(id)).await?;
    catalog
        .rename_category(id, &name)
        .await
        .map_err(app_error)?
        .ok_or_else(|| AppError::NotFound(format!("category {id} not found")))
}
