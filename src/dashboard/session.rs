use std::sync::Arc;

use tracing::debug;

use tokio::sync::mpsc;
use tokio::time::Duration;

use super::debounce::SearchDebouncer;
use super::store::FilterStore;
use crate::catalog::CatalogRepo;
use crate::config::CatalogConfig;
use crate::error::AppResult;
use crate::foods::filters::FilterState;
use crate::foods::repo_types::Food;
use crate::foods::services;
use crate::pagination::PaginatedResult;

/// Snapshot of the committed filters a query was started with.
#[derive(Debug, Clone)]
pub struct QueryTicket {
    generation: u64,
    filters: FilterState,
}

impl QueryTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Runs the food query for this snapshot. Takes no session borrow, so
    /// several tickets may be in flight at once.
    pub async fn run(&self, catalog: &dyn CatalogRepo) -> AppResult<PaginatedResult<Food>> {
        services::get_foods(catalog, &self.filters).await
    }
}

/// Dashboard view state: the filter store plus the food page currently shown.
pub struct DashboardSession {
    catalog: Arc<dyn CatalogRepo>,
    store: FilterStore,
    results: Option<PaginatedResult<Food>>,
    shown_generation: Option<u64>,
    search_delay: Duration,
}

impl DashboardSession {
    pub fn new(catalog: Arc<dyn CatalogRepo>, config: &CatalogConfig) -> Self {
        Self {
            catalog,
            store: FilterStore::new(FilterState::with_page_size(config.default_page_size)),
            results: None,
            shown_generation: None,
            search_delay: Duration::from_millis(config.search_debounce_ms),
        }
    }

    /// Debouncer for the search box; feed what it settles on to
    /// [`DashboardSession::search_settled`].
    pub fn spawn_search_debouncer(&self) -> (SearchDebouncer, mpsc::UnboundedReceiver<String>) {
        SearchDebouncer::spawn(self.search_delay)
    }

    pub fn catalog(&self) -> Arc<dyn CatalogRepo> {
        Arc::clone(&self.catalog)
    }

    pub fn store(&self) -> &FilterStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FilterStore {
        &mut self.store
    }

    pub fn results(&self) -> Option<&PaginatedResult<Food>> {
        self.results.as_ref()
    }

    /// Whether the shown page reflects the committed filters.
    pub fn is_current(&self) -> bool {
        self.shown_generation == Some(self.store.generation())
    }

    pub fn begin_query(&self) -> QueryTicket {
        QueryTicket {
            generation: self.store.generation(),
            filters: self.store.filters().clone(),
        }
    }

    /// Shows `result` unless the filters moved on after `ticket` was taken.
    pub fn complete(&mut self, ticket: &QueryTicket, result: PaginatedResult<Food>) -> bool {
        if ticket.generation != self.store.generation() {
            debug!(
                ticket = ticket.generation,
                current = self.store.generation(),
                "dropping stale food page"
            );
            return false;
        }
        self.results = Some(result);
        self.shown_generation = Some(ticket.generation);
        true
    }

    /// Applies a settled search term from the debouncer.
    pub fn search_settled(&mut self, term: String) {
        self.store.set_search_term(term);
    }

    pub async fn refresh(&mut self) -> AppResult<bool> {
        let ticket = self.begin_query();
        let page = ticket.run(self.catalog.as_ref()).await?;
        Ok(self.complete(&ticket, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::form::FilterForm;
    use crate::foods::services::tests::seeded;

    async fn session() -> DashboardSession {
        let (catalog, _) = seeded().await;
        DashboardSession::new(Arc::new(catalog), &CatalogConfig::default())
    }

    #[tokio::test]
    async fn refresh_shows_first_page() {
        let mut s = session().await;
        assert!(s.refresh().await.unwrap());
        assert!(s.is_current());
        assert_eq!(s.results().unwrap().total, 5);
    }

    #[tokio::test]
    async fn stale_result_is_dropped() {
        let mut s = session().await;
        let catalog = s.catalog();

        let old = s.begin_query();
        let mut form = FilterForm::from_store(s.store());
        form.set_calories_range("300", "");
        form.submit(s.store_mut()).unwrap();
        let new = s.begin_query();

        let new_page = new.run(catalog.as_ref()).await.unwrap();
        let old_page = old.run(catalog.as_ref()).await.unwrap();

        assert!(s.complete(&new, new_page));
        assert!(!s.complete(&old, old_page));
        assert_eq!(s.results().unwrap().total, 2);
        assert!(s.is_current());
    }

    #[tokio::test]
    async fn result_for_superseded_filters_never_shows() {
        let mut s = session().await;
        let catalog = s.catalog();
        let old = s.begin_query();
        s.store_mut().set_search_term("Oats");
        let page = old.run(catalog.as_ref()).await.unwrap();
        assert!(!s.complete(&old, page));
        assert!(s.results().is_none());
        assert!(!s.is_current());
    }

    #[tokio::test]
    async fn drawer_submit_keeps_debounced_search() {
        let mut s = session().await;
        let mut form = FilterForm::from_store(s.store());
        s.search_settled("Ch".into());

        form.set_calories_range("100", "");
        form.submit(s.store_mut()).unwrap();
        assert_eq!(s.store().filters().search_term, "Ch");

        assert!(s.refresh().await.unwrap());
        let names: Vec<_> = s.results().unwrap().data.iter().map(|f| f.name.clone()).collect();
        assert_eq!(names, ["Cheddar", "Chicken breast"]);
    }

    #[tokio::test(start_paused = true)]
    async fn typing_burst_commits_once() {
        let mut s = session().await;
        let (debouncer, mut settled) = s.spawn_search_debouncer();
        for term in ["C", "Ch", "Che"] {
            debouncer.push(term);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        drop(debouncer);

        let mut commits = 0;
        while let Some(term) = settled.recv().await {
            s.search_settled(term);
            commits += 1;
        }
        assert_eq!(commits, 1);
        assert_eq!(s.store().generation(), 1);
        assert_eq!(s.store().filters().search_term, "Che");

        assert!(s.refresh().await.unwrap());
        let names: Vec<_> = s.results().unwrap().data.iter().map(|f| f.name.clone()).collect();
        assert_eq!(names, ["Cheddar"]);
    }
}
