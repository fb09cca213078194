use uuid::Uuid;

use crate::foods::filters::FilterState;

/// Committed dashboard state. Every change to the committed filters bumps
/// `generation`, which query tickets are checked against.
#[derive(Debug, Clone)]
pub struct FilterStore {
    filters: FilterState,
    defaults: FilterState,
    generation: u64,
    filter_drawer_open: bool,
    category_dialog_open: bool,
    selected_id: Option<Uuid>,
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new(FilterState::default())
    }
}

impl FilterStore {
    pub fn new(defaults: FilterState) -> Self {
        Self {
            filters: defaults.clone(),
            defaults,
            generation: 0,
            filter_drawer_open: false,
            category_dialog_open: false,
            selected_id: None,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        if filters != self.filters {
            self.filters = filters;
            self.generation += 1;
        }
    }

    /// New search term, back on the first page.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.filters.search_term {
            self.filters.search_term = term;
            self.filters.page = 1;
            self.generation += 1;
        }
    }

    pub fn set_page(&mut self, page: u32) {
        if page != self.filters.page {
            self.filters.page = page;
            self.generation += 1;
        }
    }

    pub fn reset_filters(&mut self) {
        self.set_filters(self.defaults.clone());
    }

    /// True when the committed selection differs from the defaults. Paging is
    /// not a filter.
    pub fn has_active_filters(&self) -> bool {
        !self.filters.same_selection(&self.defaults)
    }

    pub fn is_filter_drawer_open(&self) -> bool {
        self.filter_drawer_open
    }

    pub fn open_filter_drawer(&mut self) {
        self.filter_drawer_open = true;
    }

    pub fn close_filter_drawer(&mut self) {
        self.filter_drawer_open = false;
    }

    pub fn is_category_dialog_open(&self) -> bool {
        self.category_dialog_open
    }

    pub fn open_category_dialog(&mut self) {
        self.category_dialog_open = true;
    }

    pub fn close_category_dialog(&mut self) {
        self.category_dialog_open = false;
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        self.selected_id
    }

    pub fn select(&mut self, id: Uuid) {
        self.selected_id = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected_id = None;
    }
}
