use super::store::FilterStore;
use crate::error::AppError;
use crate::foods::filters::{FilterState, SortBy, SortOrder};
use crate::foods::query::FoodQuery;

/// Uncommitted edits of the filter drawer. The search term is not part of
/// the drawer: it reaches the store through the debouncer, and the store's
/// value always wins.
#[derive(Debug, Clone)]
pub struct FilterForm {
    draft: FilterState,
}

impl FilterForm {
    pub fn from_store(store: &FilterStore) -> Self {
        Self {
            draft: store.filters().clone(),
        }
    }

    pub fn values(&self) -> &FilterState {
        &self.draft
    }

    pub fn set_calories_range(&mut self, min: impl Into<String>, max: impl Into<String>) {
        self.draft.calories_range = (min.into(), max.into());
    }

    pub fn set_protein_range(&mut self, min: impl Into<String>, max: impl Into<String>) {
        self.draft.protein_range = (min.into(), max.into());
    }

    pub fn set_category(&mut self, category_id: Option<String>) {
        self.draft.category_id = category_id;
    }

    pub fn set_sort(&mut self, sort_by: SortBy, sort_order: SortOrder) {
        self.draft.sort_by = sort_by;
        self.draft.sort_order = sort_order;
    }

    /// Drawer edits laid over the committed filters.
    fn merged(&self, store: &FilterStore) -> FilterState {
        FilterState {
            search_term: store.filters().search_term.clone(),
            page: store.filters().page,
            ..self.draft.clone()
        }
    }

    pub fn is_dirty(&self, store: &FilterStore) -> bool {
        &self.merged(store) != store.filters()
    }

    /// Validates the edits and commits them, starting over at page 1. On
    /// error the store is left untouched and the edits are kept.
    pub fn submit(&mut self, store: &mut FilterStore) -> Result<(), AppError> {
        let mut next = self.merged(store);
        next.page = 1;
        FoodQuery::from_filters(&next)?;
        store.set_filters(next.clone());
        store.close_filter_drawer();
        self.draft = next;
        Ok(())
    }

    /// Drops the edits and goes back to the committed values.
    pub fn cancel(&mut self, store: &FilterStore) {
        self.draft = store.filters().clone();
    }
}
