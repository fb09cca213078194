use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Sentinel category id meaning "any category".
pub const ANY_CATEGORY: &str = "0";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Name,
    Calories,
    Carbohydrates,
    Fat,
    Protein,
}

impl SortBy {
    pub fn column(self) -> &'static str {
        match self {
            SortBy::Name => "f.name",
            SortBy::Calories => "f.calories",
            SortBy::Carbohydrates => "f.carbohydrates",
            SortBy::Fat => "f.fat",
            SortBy::Protein => "f.protein",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Lower/upper bound pair as typed into the filter form. Empty means unset.
pub type RangeInput = (String, String);

/// Filter selection shared by the dashboard store, the filter form and the
/// food listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    #[validate(length(max = 200, message = "search term is too long"))]
    pub search_term: String,
    pub calories_range: RangeInput,
    pub protein_range: RangeInput,
    pub category_id: Option<String>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    #[validate(range(min = 1, message = "page starts at 1"))]
    pub page: u32,
    #[validate(range(min = 1, max = 100, message = "page size must be between 1 and 100"))]
    pub page_size: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            calories_range: (String::new(), String::new()),
            protein_range: (String::new(), String::new()),
            category_id: None,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterState {
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Same selection, ignoring which page is shown.
    pub fn same_selection(&self, other: &FilterState) -> bool {
        self.search_term == other.search_term
            && self.calories_range == other.calories_range
            && self.protein_range == other.protein_range
            && self.category_id == other.category_id
            && self.sort_by == other.sort_by
            && self.sort_order == other.sort_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let f: FilterState = serde_json::from_str(r#"{"searchTerm":"oat"}"#).unwrap();
        assert_eq!(f.search_term, "oat");
        assert_eq!(f.sort_by, SortBy::Name);
        assert_eq!(f.sort_order, SortOrder::Asc);
        assert_eq!(f.page, 1);
        assert_eq!(f.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn ranges_travel_as_string_pairs() {
        let f: FilterState =
            serde_json::from_str(r#"{"caloriesRange":["100",""],"sortBy":"protein"}"#).unwrap();
        assert_eq!(f.calories_range, ("100".to_string(), String::new()));
        assert_eq!(f.sort_by, SortBy::Protein);
    }

    #[test]
    fn validate_rejects_zero_page() {
        let f = FilterState {
            page: 0,
            ..FilterState::default()
        };
        assert!(f.validate().is_err());
        assert!(FilterState::default().validate().is_ok());
    }

    #[test]
    fn same_selection_ignores_paging() {
        let a = FilterState::default();
        let b = FilterState {
            page: 3,
            ..FilterState::default()
        };
        assert!(a.same_selection(&b));
    }
}
