use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CatalogError, CatalogRepo};
use crate::categories::repo::Category;
use crate::foods::query::FoodQuery;
use crate::foods::repo_types::{Food, FoodDraft, FoodServingUnit};
use crate::serving_units::repo::ServingUnit;

#[derive(Default)]
struct Tables {
    foods: Vec<(Uuid, FoodDraft)>,
    categories: Vec<Category>,
    serving_units: Vec<ServingUnit>,
}

impl Tables {
    fn check_refs(&self, draft: &FoodDraft) -> anyhow::Result<()> {
        if let Some(cid) = draft.category_id {
            if !self.categories.iter().any(|c| c.id == cid) {
                return Err(CatalogError::UnknownReference(format!("unknown category {cid}")).into());
            }
        }
        for su in &draft.serving_units {
            if !self.serving_units.iter().any(|u| u.id == su.serving_unit_id) {
                return Err(CatalogError::UnknownReference(format!(
                    "unknown serving unit {}",
                    su.serving_unit_id
                ))
                .into());
            }
        }
        Ok(())
    }

    fn materialize(&self, id: Uuid, d: &FoodDraft) -> Food {
        let category_name = d.category_id.and_then(|cid| {
            self.categories
                .iter()
                .find(|c| c.id == cid)
                .map(|c| c.name.clone())
        });
        let serving_units = d
            .serving_units
            .iter()
            .filter_map(|su| {
                self.serving_units
                    .iter()
                    .find(|u| u.id == su.serving_unit_id)
                    .map(|u| FoodServingUnit {
                        serving_unit_id: u.id,
                        serving_unit_name: u.name.clone(),
                        grams: su.grams,
                    })
            })
            .collect();
        Food {
            id,
            name: d.name.clone(),
            calories: d.calories,
            protein: d.protein,
            fat: d.fat,
            carbohydrates: d.carbohydrates,
            fiber: d.fiber,
            sugar: d.sugar,
            category_id: d.category_id,
            category_name,
            serving_units,
        }
    }

    fn matching(&self, query: &FoodQuery) -> Vec<Food> {
        self.foods
            .iter()
            .map(|(id, d)| self.materialize(*id, d))
            .filter(|f| query.matches(f))
            .collect()
    }
}

/// Catalog held in process memory.
#[derive(Default)]
pub struct MemoryCatalog {
    tables: RwLock<Tables>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogRepo for MemoryCatalog {
    async fn count_foods(&self, query: &FoodQuery) -> anyhow::Result<i64> {
        let t = self.tables.read().await;
        Ok(t.matching(query).len() as i64)
    }

    async fn fetch_foods(&self, query: &FoodQuery) -> anyhow::Result<Vec<Food>> {
        let t = self.tables.read().await;
        let mut rows = t.matching(query);
        rows.sort_by(|a, b| query.compare(a, b));
        Ok(rows
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit() as usize)
            .collect())
    }

    async fn find_food(&self, id: Uuid) -> anyhow::Result<Option<Food>> {
        let t = self.tables.read().await;
        Ok(t
            .foods
            .iter()
            .find(|(fid, _)| *fid == id)
            .map(|(fid, d)| t.materialize(*fid, d)))
    }

    async fn create_food(&self, draft: &FoodDraft) -> anyhow::Result<Food> {
        let mut t = self.tables.write().await;
        t.check_refs(draft)?;
        let id = Uuid::new_v4();
        t.foods.push((id, draft.clone()));
        Ok(t.materialize(id, draft))
    }

    async fn update_food(&self, id: Uuid, draft: &FoodDraft) -> anyhow::Result<Option<Food>> {
        let mut t = self.tables.write().await;
        t.check_refs(draft)?;
        let Some(slot) = t.foods.iter_mut().find(|(fid, _)| *fid == id) else {
            return Ok(None);
        };
        slot.1 = draft.clone();
        Ok(Some(t.materialize(id, draft)))
    }

    async fn delete_food(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut t = self.tables.write().await;
        let before = t.foods.len();
        t.foods.retain(|(fid, _)| *fid != id);
        Ok(t.foods.len() != before)
    }

    async fn list_categories(&self) -> anyhow::Result<Vec<Category>> {
        let t = self.tables.read().await;
        let mut rows = t.categories.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find_category_by_name(&self, name: &str) -> anyhow::Result<Option<Category>> {
        let t = self.tables.read().await;
        Ok(t.categories.iter().find(|c| c.name == name).cloned())
    }

    async fn create_category(&self, name: &str) -> anyhow::Result<Category> {
        let mut t = self.tables.write().await;
        if t.categories.iter().any(|c| c.name == name) {
            return Err(CatalogError::DuplicateName(format!("category {name} already exists")).into());
        }
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        t.categories.push(category.clone());
        Ok(category)
    }

    async fn rename_category(&self, id: Uuid, name: &str) -> anyhow::Result<Option<Category>> {
        let mut t = self.tables.write().await;
        if t.categories.iter().any(|c| c.name == name && c.id != id) {
            return Err(CatalogError::DuplicateName(format!("category {name} already exists")).into());
        }
        Ok(t.categories.iter_mut().find(|c| c.id == id).map(|c| {
            c.name = name.to_string();
            c.clone()
        }))
    }

    async fn list_serving_units(&self) -> anyhow::Result<Vec<ServingUnit>> {
        let t = self.tables.read().await;
        let mut rows = t.serving_units.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find_serving_unit_by_name(&self, name: &str) -> anyhow::Result<Option<ServingUnit>> {
        let t = self.tables.read().await;
        Ok(t.serving_units.iter().find(|u| u.name == name).cloned())
    }

    async fn create_serving_unit(&self, name: &str) -> anyhow::Result<ServingUnit> {
        let mut t = self.tables.write().await;
        if t.serving_units.iter().any(|u| u.name == name) {
            return Err(
                CatalogError::DuplicateName(format!("serving unit {name} already exists")).into(),
            );
        }
        let unit = ServingUnit {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        t.serving_units.push(unit.clone());
        Ok(unit)
    }
}
