use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::CatalogRepo;
use crate::categories::repo::{self as categories, Category};
use crate::foods::query::FoodQuery;
use crate::foods::repo as foods;
use crate::foods::repo_types::{Food, FoodDraft};
use crate::serving_units::repo::{self as serving_units, ServingUnit};

#[derive(Clone)]
pub struct PgCatalog {
    db: PgPool,
}

impl PgCatalog {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepo for PgCatalog {
    async fn count_foods(&self, query: &FoodQuery) -> anyhow::Result<i64> {
        foods::count(&self.db, query).await
    }

    async fn fetch_foods(&self, query: &FoodQuery) -> anyhow::Result<Vec<Food>> {
        foods::fetch_page(&self.db, query).await
    }

    async fn find_food(&self, id: Uuid) -> anyhow::Result<Option<Food>> {
        foods::find_by_id(&self.db, id).await
    }

    async fn create_food(&self, draft: &FoodDraft) -> anyhow::Result<Food> {
        foods::create(&self.db, draft).await
    }

    async fn update_food(&self, id: Uuid, draft: &FoodDraft) -> anyhow::Result<Option<Food>> {
        foods::update(&self.db, id, draft).await
    }

    async fn delete_food(&self, id: Uuid) -> anyhow::Result<bool> {
        foods::delete(&self.db, id).await
    }

    async fn list_categories(&self) -> anyhow::Result<Vec<Category>> {
        categories::list(&self.db).await
    }

    async fn find_category_by_name(&self, name: &str) -> anyhow::Result<Option<Category>> {
        categories::find_by_name(&self.db, name).await
    }

    async fn create_category(&self, name: &str) -> anyhow::Result<Category> {
        categories::create(&self.db, name).await
    }

    async fn rename_category(&self, id: Uuid, name: &str) -> anyhow::Result<Option<Category>> {
        categories::rename(&self.db, id, name).await
    }

    async fn list_serving_units(&self) -> anyhow::Result<Vec<ServingUnit>> {
        serving_units::list(&self.db).await
    }

    async fn find_serving_unit_by_name(&self, name: &str) -> anyhow::Result<Option<ServingUnit>> {
        serving_units::find_by_name(&self.db, name).await
    }

    async fn create_serving_unit(&self, name: &str) -> anyhow::Result<ServingUnit> {
        serving_units::create(&self.db, name).await
    }
}
