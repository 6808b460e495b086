//! Public directory surface

use std::sync::Arc;

use shared::directory::{PageSizes, QueryState, SortOrder, ViewMode, ViewModel, compose};
use shared::store::{EmployeeStore, RecordSet, StoreError};

/// Directory list/grid controller
pub struct DirectoryController {
    store: Arc<dyn EmployeeStore>,
    records: RecordSet,
    query: QueryState,
    sizes: PageSizes,
    view: ViewModel,
    loading: bool,
    error: Option<StoreError>,
}

impl DirectoryController {
    pub fn new(store: Arc<dyn EmployeeStore>, sizes: PageSizes) -> Self {
        let records = RecordSet::default();
        let query = QueryState::directory();
        let view = compose(&records.employees, &query, &sizes);
        Self {
            store,
            records,
            query,
            sizes,
            view,
            loading: false,
            error: None,
        }
    }

    /// Fetch the record set and recompose
    ///
    /// A failure keeps the previous records on screen and is remembered in
    /// [`error`](Self::error) until the next successful load.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        self.loading = true;
        let result = self.store.list().await;
        self.loading = false;

        match result {
            Ok(set) => {
                self.error = None;
                self.apply(set);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Directory refresh failed");
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Install a fetched record set unless it is older than the current one
    pub fn apply(&mut self, set: RecordSet) -> bool {
        let applied = self.records.replace_if_newer(set);
        if applied {
            self.recompose();
        }
        applied
    }

    pub fn search(&mut self, term: impl Into<String>) {
        self.query.set_search_term(term);
        self.recompose();
    }

    /// Empty string selects all departments
    pub fn select_department(&mut self, department: impl Into<String>) {
        self.query.set_department(department);
        self.recompose();
    }

    /// Empty string selects all floors
    pub fn select_floor(&mut self, floor: impl Into<String>) {
        self.query.set_floor(floor);
        self.recompose();
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.query.set_view_mode(mode);
        self.recompose();
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.query.set_sort(sort);
        self.recompose();
    }

    pub fn clear_filters(&mut self) {
        self.query.clear_filters();
        self.recompose();
    }

    /// Jump to a page; out-of-range requests are ignored
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let moved = self.query.go_to_page(page, self.view.total_pages);
        if moved {
            self.recompose();
        }
        moved
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&StoreError> {
        self.error.as_ref()
    }

    fn recompose(&mut self) {
        self.view = compose(&self.records.employees, &self.query, &self.sizes);
        // Follow the clamp when the record set shrank under the current page
        if self.view.current_page != self.query.page() {
            self.query
                .go_to_page(self.view.current_page, self.view.total_pages);
        }
    }
}
