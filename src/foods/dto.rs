use serde::Deserialize;

use super::filters::{FilterState, SortBy, SortOrder};

/// Query string of `GET /foods`. Range bounds are split into flat keys so
/// they survive urlencoding; missing keys fall back to filter defaults.
#[derive(Debug, Default, Deserialize)]
pub struct FoodListParams {
    pub search_term: Option<String>,
    pub calories_min: Option<String>,
    pub calories_max: Option<String>,
    pub protein_min: Option<String>,
    pub protein_max: Option<String>,
    pub category_id: Option<String>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl FoodListParams {
    pub fn into_filters(self, default_page_size: u32) -> FilterState {
        let defaults = FilterState::with_page_size(default_page_size);
        FilterState {
            search_term: self.search_term.unwrap_or_default(),
            calories_range: (
                self.calories_min.unwrap_or_default(),
                self.calories_max.unwrap_or_default(),
            ),
            protein_range: (
                self.protein_min.unwrap_or_default(),
                self.protein_max.unwrap_or_default(),
            ),
            category_id: self.category_id,
            sort_by: self.sort_by.unwrap_or(defaults.sort_by),
            sort_order: self.sort_order.unwrap_or(defaults.sort_order),
            page: self.page.unwrap_or(defaults.page),
            page_size: self.page_size.unwrap_or(defaults.page_size),
        }
    }
}
