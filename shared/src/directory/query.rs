//! Query state owned by the presentation layer

use serde::{Deserialize, Serialize};

/// Directory layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Card,
}

/// Which screen the query drives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    #[default]
    Directory,
    Admin,
}

/// Opt-in ordering applied after filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Keep the store's order
    #[default]
    Default,
    FloorAsc,
    FloorDesc,
}

/// Page size per surface and layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSizes {
    pub list: usize,
    pub card: usize,
    pub admin: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            list: 10,
            card: 12,
            admin: 10,
        }
    }
}

impl PageSizes {
    /// Page size in effect for a query
    pub fn for_query(&self, query: &QueryState) -> usize {
        match (query.surface, query.view_mode) {
            (Surface::Admin, _) => self.admin,
            (Surface::Directory, ViewMode::List) => self.list,
            (Surface::Directory, ViewMode::Card) => self.card,
        }
    }
}

/// User-controlled search, filter, sort, page and layout inputs
///
/// Setters enforce the reset rule: any change that can shrink the result
/// set or alter the page size puts the user back on page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    search_term: String,
    department: Option<String>,
    floor: Option<String>,
    page: usize,
    view_mode: ViewMode,
    surface: Surface,
    sort: SortOrder,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(Surface::Directory)
    }
}

impl QueryState {
    pub fn new(surface: Surface) -> Self {
        Self {
            search_term: String::new(),
            department: None,
            floor: None,
            page: 1,
            view_mode: ViewMode::List,
            surface,
            sort: SortOrder::Default,
        }
    }

    pub fn directory() -> Self {
        Self::new(Surface::Directory)
    }

    pub fn admin() -> Self {
        Self::new(Surface::Admin)
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Selected department, `None` meaning all
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    /// Selected floor, `None` meaning all
    pub fn floor(&self) -> Option<&str> {
        self.floor.as_deref()
    }

    /// Requested page (1-based). The composer clamps it.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.search_term {
            self.search_term = term;
            self.page = 1;
        }
    }

    /// Select a department. An empty string selects all.
    pub fn set_department(&mut self, department: impl Into<String>) {
        let department = non_empty(department.into());
        if department != self.department {
            self.department = department;
            self.page = 1;
        }
    }

    /// Select a floor. An empty string selects all.
    pub fn set_floor(&mut self, floor: impl Into<String>) {
        let floor = non_empty(floor.into());
        if floor != self.floor {
            self.floor = floor;
            self.page = 1;
        }
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        if view_mode != self.view_mode {
            self.view_mode = view_mode;
            self.page = 1;
        }
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        if sort != self.sort {
            self.sort = sort;
            self.page = 1;
        }
    }

    /// Clear search term and filters
    pub fn clear_filters(&mut self) {
        self.set_search_term("");
        self.set_department("");
        self.set_floor("");
    }

    /// Navigate to `page` if it lies within `[1, total_pages]`
    ///
    /// Out-of-range requests are rejected: returns `false` and leaves the
    /// state untouched.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) -> bool {
        if page < 1 || page > total_pages.max(1) {
            return false;
        }
        self.page = page;
        true
    }

    /// Requested page for stateless callers (HTTP query strings)
    ///
    /// No range check here; [`compose`](super::compose) clamps it.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
