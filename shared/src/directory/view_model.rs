//! View-model composer

use super::filter::{distinct_departments, distinct_floors, filter, sort_by_floor};
use super::pagination::{MAX_VISIBLE_PAGES, PageLink, paginate, window_pages};
use super::query::{PageSizes, QueryState};
use crate::models::Employee;
use serde::{Deserialize, Serialize};

/// Headline figures for the admin dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryStats {
    pub total_employees: usize,
    pub departments: usize,
    pub floors: usize,
}

/// Render-ready projection of the record set and query state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    pub records: Vec<Employee>,
    pub total_filtered: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub navigation: Vec<PageLink>,
    pub departments: Vec<String>,
    pub floors: Vec<String>,
    pub stats: DirectoryStats,
    pub summary: String,
}

/// Filter, sort, paginate and window in one pass
///
/// Department and floor choices come from the full record set, so a stale
/// selection simply yields an empty page.
pub fn compose(records: &[Employee], query: &QueryState, sizes: &PageSizes) -> ViewModel {
    let mut filtered = filter(records, query);
    sort_by_floor(&mut filtered, query.sort());

    let page_size = sizes.for_query(query).max(1);
    let page = paginate(&filtered, page_size, query.page());

    let departments = distinct_departments(records);
    let floors = distinct_floors(records);
    let stats = DirectoryStats {
        total_employees: records.len(),
        departments: departments.len(),
        floors: floors.len(),
    };

    let summary = format!(
        "Showing {} of {} employees (Page {} of {})",
        page.items.len(),
        filtered.len(),
        page.current_page,
        page.total_pages
    );

    ViewModel {
        records: page.items.into_iter().cloned().collect(),
        total_filtered: filtered.len(),
        current_page: page.current_page,
        total_pages: page.total_pages,
        page_size,
        navigation: window_pages(page.current_page, page.total_pages, MAX_VISIBLE_PAGES),
        departments,
        floors,
        stats,
        summary,
    }
}

impl ViewModel {
    pub fn is_empty(&self) -> bool {
        self.total_filtered == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{SortOrder, ViewMode};

    fn staff(n: usize) -> Vec<Employee> {
        (0..n)
            .map(|i| Employee {
                id: format!("e{}", i),
                first_name: format!("First{}", i),
                last_name: format!("Last{}", i),
                email: format!("user{}@corp.example", i),
                extension: format!("{}", 1000 + i),
                department: if i % 2 == 0 { "Engineering" } else { "Sales" }.into(),
                role: "Staff".into(),
                floor: format!("{}", i % 4 + 1),
                avatar: None,
            })
            .collect()
    }

    #[test]
    fn test_compose_first_page() {
        let records = staff(23);
        let vm = compose(&records, &QueryState::directory(), &PageSizes::default());

        assert_eq!(vm.records.len(), 10);
        assert_eq!(vm.total_filtered, 23);
        assert_eq!(vm.current_page, 1);
        assert_eq!(vm.total_pages, 3);
        assert_eq!(vm.navigation.len(), 3);
        assert_eq!(vm.departments, vec!["Engineering", "Sales"]);
        assert_eq!(vm.floors, vec!["1", "2", "3", "4"]);
        assert_eq!(
            vm.stats,
            DirectoryStats {
                total_employees: 23,
                departments: 2,
                floors: 4
            }
        );
        assert_eq!(vm.summary, "Showing 10 of 23 employees (Page 1 of 3)");
    }

    #[test]
    fn test_card_view_uses_larger_pages() {
        let records = staff(23);
        let mut q = QueryState::directory();
        q.set_view_mode(ViewMode::Card);
        let vm = compose(&records, &q, &PageSizes::default());
        assert_eq!(vm.page_size, 12);
        assert_eq!(vm.total_pages, 2);
    }

    #[test]
    fn test_deleting_last_record_clamps_page() {
        let mut records = staff(21);
        let mut q = QueryState::directory();
        assert!(q.go_to_page(3, 3));

        let vm = compose(&records, &q, &PageSizes::default());
        assert_eq!(vm.current_page, 3);
        assert_eq!(vm.records.len(), 1);

        records.retain(|e| e.id != vm.records[0].id);
        let vm = compose(&records, &q, &PageSizes::default());
        assert_eq!(vm.total_pages, 2);
        assert_eq!(vm.current_page, 2);
        assert_eq!(vm.records.len(), 10);
    }

    #[test]
    fn test_empty_record_set() {
        let vm = compose(&[], &QueryState::admin(), &PageSizes::default());
        assert!(vm.is_empty());
        assert_eq!(vm.total_pages, 1);
        assert_eq!(vm.current_page, 1);
        assert_eq!(vm.navigation, vec![PageLink::Page(1)]);
        assert_eq!(vm.summary, "Showing 0 of 0 employees (Page 1 of 1)");
    }

    #[test]
    fn test_filter_choices_ignore_current_filter() {
        let records = staff(8);
        let mut q = QueryState::directory();
        q.set_department("Sales");
        let vm = compose(&records, &q, &PageSizes::default());
        assert_eq!(vm.total_filtered, 4);
        assert_eq!(vm.departments, vec!["Engineering", "Sales"]);
    }

    #[test]
    fn test_floor_sort_applies_before_paging() {
        let records = staff(23);
        let mut q = QueryState::directory();
        q.set_sort(SortOrder::FloorDesc);
        let vm = compose(&records, &q, &PageSizes::default());
        assert!(vm.records[..5].iter().all(|e| e.floor == "4"));
        assert!(vm.records[5..].iter().all(|e| e.floor == "3"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let records = staff(40);
        let mut q = QueryState::directory();
        q.set_search_term("last1");
        let a = compose(&records, &q, &PageSizes::default());
        let b = compose(&records, &q, &PageSizes::default());
        assert_eq!(a, b);
    }
}
