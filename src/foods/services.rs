use tracing::{debug, info};
use uuid::Uuid;

use super::filters::FilterState;
use super::form::FoodFormValues;
use super::query::FoodQuery;
use super::repo_types::Food;
use crate::catalog::{app_error, CatalogRepo};
use crate::error::{AppError, AppResult};
use crate::pagination::PaginatedResult;

/// Runs the filter query: count and page fetch go out together.
pub async fn get_foods(
    catalog: &dyn CatalogRepo,
    filters: &FilterState,
) -> AppResult<PaginatedResult<Food>> {
    let query = FoodQuery::from_filters(filters)?;
    debug!(predicates = query.predicates().len(), page = query.page, "composed food query");

    let (total, data) = tokio::try_join!(catalog.count_foods(&query), catalog.fetch_foods(&query))
        .map_err(app_error)?;

    Ok(PaginatedResult::new(data, total, query.page, query.page_size))
}

/// Edit-form values for one food, or `None` when it does not exist.
pub async fn get_food_form(catalog: &dyn CatalogRepo, id: Uuid) -> AppResult<Option<FoodFormValues>> {
    let food = catalog.find_food(id).await.map_err(app_error)?;
    Ok(food.as_ref().map(FoodFormValues::for_update))
}

pub async fn create_food(catalog: &dyn CatalogRepo, form: FoodFormValues) -> AppResult<Food> {
    let draft = form.into_draft()?;
    let food = catalog
        .create_food(&draft)
        .await
        .map_err(app_error)?;
    info!(food_id = %food.id, name = %food.name, "food created");
    Ok(food)
}

pub async fn update_food(
    catalog: &dyn CatalogRepo,
    id: Uuid,
    form: FoodFormValues,
) -> AppResult<Food> {
    let draft = form.into_draft()?;
    let food = catalog
        .update_food(id, &draft)
        .await
        .map_err(app_error)?
        .ok_or_else(|| AppError::NotFound(format!("food {id} not found")))?;
    info!(food_id = %food.id, "food updated");
    Ok(food)
}

pub async fn delete_food(catalog: &dyn CatalogRepo, id: Uuid) -> AppResult<()> {
    let deleted = catalog.delete_food(id).await.map_err(app_error)?;
    if !deleted {
        return Err(AppError::NotFound(format!("food {id} not found")));
    }
    info!(food_id = %id, "food deleted");
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use crate::foods::filters::{SortBy, SortOrder};
    use crate::foods::form::ServingUnitFormValue;

    pub(crate) fn food_form(name: &str, calories: f64, protein: f64, category: Option<Uuid>) -> FoodFormValues {
        FoodFormValues {
            name: name.into(),
            calories: calories.to_string(),
            protein: protein.to_string(),
            fat: "1".into(),
            carbohydrates: "10".into(),
            fiber: "0".into(),
            sugar: "0".into(),
            category_id: category.map(|c| c.to_string()).unwrap_or_default(),
            ..FoodFormValues::blank()
        }
    }

    pub(crate) async fn seeded() -> (MemoryCatalog, Uuid) {
        let catalog = MemoryCatalog::new();
        let fruit = catalog.create_category("Fruit").await.unwrap();
        let rows = [
            ("Banana", 89.0, 1.1, Some(fruit.id)),
            ("Apple", 52.0, 0.3, Some(fruit.id)),
            ("Cheddar", 403.0, 25.0, None),
            ("Oats", 389.0, 16.9, None),
            ("Chicken breast", 165.0, 31.0, None),
        ];
        for (name, kcal, protein, cat) in rows {
            create_food(&catalog, food_form(name, kcal, protein, cat)).await.unwrap();
        }
        (catalog, fruit.id)
    }

    fn names(page: &PaginatedResult<Food>) -> Vec<&str> {
        page.data.iter().map(|f| f.name.as_str()).collect()
    }

    #[tokio::test]
    async fn defaults_return_everything_by_name() {
        let (catalog, _) = seeded().await;
        let page = get_foods(&catalog, &FilterState::default()).await.unwrap();
        assert_eq!(names(&page), ["Apple", "Banana", "Cheddar", "Chicken breast", "Oats"]);
        assert_eq!(page.total, 5);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn lower_bound_only() {
        let (catalog, _) = seeded().await;
        let f = FilterState {
            calories_range: ("100".into(), "".into()),
            ..FilterState::default()
        };
        let page = get_foods(&catalog, &f).await.unwrap();
        assert_eq!(names(&page), ["Cheddar", "Chicken breast", "Oats"]);
        assert!(page.data.iter().all(|f| f.calories >= 100.0));
    }

    #[tokio::test]
    async fn upper_bound_only() {
        let (catalog, _) = seeded().await;
        let f = FilterState {
            calories_range: ("".into(), "200".into()),
            ..FilterState::default()
        };
        let page = get_foods(&catalog, &f).await.unwrap();
        assert_eq!(names(&page), ["Apple", "Banana", "Chicken breast"]);
    }

    #[tokio::test]
    async fn any_category_matches_unset() {
        let (catalog, fruit) = seeded().await;
        let unset = get_foods(&catalog, &FilterState::default()).await.unwrap();
        let sentinel = get_foods(
            &catalog,
            &FilterState {
                category_id: Some("0".into()),
                ..FilterState::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(unset, sentinel);

        let only_fruit = get_foods(
            &catalog,
            &FilterState {
                category_id: Some(fruit.to_string()),
                ..FilterState::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(names(&only_fruit), ["Apple", "Banana"]);
        assert_eq!(only_fruit.data[0].category_name.as_deref(), Some("Fruit"));
    }

    #[tokio::test]
    async fn search_sort_and_ranges_combine() {
        let (catalog, _) = seeded().await;
        let f = FilterState {
            search_term: "Ch".into(),
            protein_range: ("20".into(), "40".into()),
            sort_by: SortBy::Protein,
            sort_order: SortOrder::Desc,
            ..FilterState::default()
        };
        let page = get_foods(&catalog, &f).await.unwrap();
        assert_eq!(names(&page), ["Chicken breast", "Cheddar"]);
    }

    #[tokio::test]
    async fn total_ignores_pagination() {
        let catalog = MemoryCatalog::new();
        for i in 0..12 {
            create_food(&catalog, food_form(&format!("Food {i:02}"), 100.0, 1.0, None))
                .await
                .unwrap();
        }
        let f = FilterState {
            page: 2,
            page_size: 5,
            ..FilterState::default()
        };
        let page = get_foods(&catalog, &f).await.unwrap();
        assert_eq!(page.total, 12);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.data.len(), 5);
        assert_eq!(page.data[0].name, "Food 05");
    }

    #[tokio::test]
    async fn no_results_is_not_an_error() {
        let (catalog, _) = seeded().await;
        let f = FilterState {
            search_term: "Durian".into(),
            ..FilterState::default()
        };
        let page = get_foods(&catalog, &f).await.unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn invalid_filters_fail_before_querying() {
        let (catalog, _) = seeded().await;
        let f = FilterState {
            calories_range: ("ten".into(), "".into()),
            ..FilterState::default()
        };
        assert!(matches!(get_foods(&catalog, &f).await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn form_lookup_round_trips_numbers() {
        let catalog = MemoryCatalog::new();
        let cup = catalog.create_serving_unit("cup").await.unwrap();
        let mut form = food_form("Milk", 42.5, 3.4, None);
        form.sugar = "4.8".into();
        form.serving_units = vec![ServingUnitFormValue {
            serving_unit_id: cup.id.to_string(),
            grams: "244".into(),
        }];
        let created = create_food(&catalog, form).await.unwrap();

        let values = get_food_form(&catalog, created.id).await.unwrap().unwrap();
        assert_eq!(values.action, crate::foods::form::FormAction::Update);
        assert_eq!(values.calories.parse::<f64>().unwrap(), created.calories);
        assert_eq!(values.sugar.parse::<f64>().unwrap(), 4.8);
        assert_eq!(values.serving_units[0].grams, "244");

        assert!(get_food_form(&catalog, Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn inverted_range_is_an_empty_page_not_an_error() {
        let (catalog, _) = seeded().await;
        let f = FilterState {
            calories_range: ("300".into(), "100".into()),
            ..FilterState::default()
        };
        let page = get_foods(&catalog, &f).await.unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn whitespace_search_matches_everything() {
        let (catalog, _) = seeded().await;
        let f = FilterState {
            search_term: "   ".into(),
            ..FilterState::default()
        };
        let page = get_foods(&catalog, &f).await.unwrap();
        assert_eq!(page.total, 5);
    }

    #[tokio::test]
    async fn search_keeps_surrounding_spaces() {
        let catalog = MemoryCatalog::new();
        for name in ["Applepie", "Apple pie"] {
            create_food(&catalog, food_form(name, 237.0, 2.0, None)).await.unwrap();
        }
        let f = FilterState {
            search_term: " pie".into(),
            ..FilterState::default()
        };
        let page = get_foods(&catalog, &f).await.unwrap();
        assert_eq!(names(&page), ["Apple pie"]);
    }

    #[tokio::test]
    async fn unknown_references_are_client_errors() {
        let catalog = MemoryCatalog::new();
        let err = create_food(&catalog, food_form("Kale", 49.0, 4.3, Some(Uuid::new_v4())))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("unknown category")));
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);

        let mut form = food_form("Kale", 49.0, 4.3, None);
        form.serving_units = vec![ServingUnitFormValue {
            serving_unit_id: Uuid::new_v4().to_string(),
            grams: "67".into(),
        }];
        let err = create_food(&catalog, form).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("unknown serving unit")));

        let kale = create_food(&catalog, food_form("Kale", 49.0, 4.3, None)).await.unwrap();
        let err = update_food(&catalog, kale.id, food_form("Kale", 49.0, 4.3, Some(Uuid::new_v4())))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let stored = get_food_form(&catalog, kale.id).await.unwrap().unwrap();
        assert_eq!(stored.category_id, "");
    }

    #[tokio::test]
    async fn update_and_delete_missing_food_is_not_found() {
        let catalog = MemoryCatalog::new();
        let id = Uuid::new_v4();
        let err = update_food(&catalog, id, food_form("Kale", 49.0, 4.3, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(matches!(delete_food(&catalog, id).await, Err(AppError::NotFound(_))));
    }
}
