//! Storage seam for the food catalog.
//!
//! Services talk to [`CatalogRepo`]; the server wires in [`PgCatalog`] and
//! tests use [`MemoryCatalog`], which evaluates the same composed queries.

mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::categories::repo::Category;
use crate::error::AppError;
use crate::foods::query::FoodQuery;
use crate::foods::repo_types::{Food, FoodDraft};
use crate::serving_units::repo::ServingUnit;

pub use memory::MemoryCatalog;
pub use postgres::PgCatalog;

const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";

/// Write rejected because of what the caller sent, not because storage failed.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{0}")]
    UnknownReference(String),

    #[error("{0}")]
    DuplicateName(String),
}

/// Lifts foreign-key and unique violations out of a sqlx error; anything
/// else stays an opaque storage error with `what` as context.
pub(crate) fn classify(e: sqlx::Error, what: &str) -> anyhow::Error {
    let code = e
        .as_database_error()
        .and_then(|db| db.code().map(|c| c.into_owned()));
    match code.as_deref() {
        Some(FOREIGN_KEY_VIOLATION) => {
            CatalogError::UnknownReference(format!("{what}: unknown category or serving unit"))
                .into()
        }
        Some(UNIQUE_VIOLATION) => {
            CatalogError::DuplicateName(format!("{what}: name already exists")).into()
        }
        _ => anyhow::Error::new(e).context(what.to_string()),
    }
}

/// Turns a repository error into the API error: caller mistakes keep their
/// own status, everything else is a 500.
pub fn app_error(e: anyhow::Error) -> AppError {
    match e.downcast_ref::<CatalogError>() {
        Some(CatalogError::UnknownReference(msg)) => AppError::Validation(msg.clone()),
        Some(CatalogError::DuplicateName(msg)) => AppError::Conflict(msg.clone()),
        None => AppError::Database(e),
    }
}

#[async_trait]
pub trait CatalogRepo: Send + Sync {
    async fn count_foods(&self, query: &FoodQuery) -> anyhow::Result<i64>;
    async fn fetch_foods(&self, query: &FoodQuery) -> anyhow::Result<Vec<Food>>;
    async fn find_food(&self, id: Uuid) -> anyhow::Result<Option<Food>>;
    async fn create_food(&self, draft: &FoodDraft) -> anyhow::Result<Food>;
    async fn update_food(&self, id: Uuid, draft: &FoodDraft) -> anyhow::Result<Option<Food>>;
    async fn delete_food(&self, id: Uuid) -> anyhow::Result<bool>;

    async fn list_categories(&self) -> anyhow::Result<Vec<Category>>;
    async fn find_category_by_name(&self, name: &str) -> anyhow::Result<Option<Category>>;
    async fn create_category(&self, name: &str) -> anyhow::Result<Category>;
    async fn rename_category(&self, id: Uuid, name: &str) -> anyhow::Result<Option<Category>>;

    async fn list_serving_units(&self) -> anyhow::Result<Vec<ServingUnit>>;
    async fn find_serving_unit_by_name(&self, name: &str) -> anyhow::Result<Option<ServingUnit>>;
    async fn create_serving_unit(&self, name: &str) -> anyhow::Result<ServingUnit>;
}
