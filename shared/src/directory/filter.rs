//! Filter and floor-sort engine

use super::query::{QueryState, SortOrder};
use crate::models::Employee;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Records matching the query, in input order
pub fn filter<'a>(records: &'a [Employee], query: &QueryState) -> Vec<&'a Employee> {
    let term = query.search_term().to_lowercase();
    records
        .iter()
        .filter(|e| matches_lowercase(e, &term, query))
        .collect()
}

/// Whether a single record passes the query
pub fn matches(employee: &Employee, query: &QueryState) -> bool {
    matches_lowercase(employee, &query.search_term().to_lowercase(), query)
}

fn matches_lowercase(employee: &Employee, term: &str, query: &QueryState) -> bool {
    let text = term.is_empty()
        || employee.full_name().to_lowercase().contains(term)
        || employee.email.to_lowercase().contains(term)
        || employee.role.to_lowercase().contains(term)
        || employee.department.to_lowercase().contains(term)
        || employee.floor.to_lowercase().contains(term);

    let department = query
        .department()
        .is_none_or(|d| d == employee.department);
    let floor = query.floor().is_none_or(|f| f == employee.floor);

    text && department && floor
}

/// Unique departments across the full record set, ascending
pub fn distinct_departments(records: &[Employee]) -> Vec<String> {
    distinct(records.iter().map(|e| e.department.as_str()))
}

/// Unique floors across the full record set, ascending
pub fn distinct_floors(records: &[Employee]) -> Vec<String> {
    distinct(records.iter().map(|e| e.floor.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Stable floor ordering, applied to an already filtered sequence
///
/// Floors with a leading integer ("3", "12", "2nd") compare numerically and
/// come before free-text floors ("Ground", "B1"). Ties fall back to plain
/// string comparison; fully equal floors keep their input order.
pub fn sort_by_floor(records: &mut [&Employee], order: SortOrder) {
    match order {
        SortOrder::Default => {}
        SortOrder::FloorAsc => records.sort_by(|a, b| compare_floors(&a.floor, &b.floor)),
        SortOrder::FloorDesc => records.sort_by(|a, b| compare_floors(&b.floor, &a.floor)),
    }
}

fn compare_floors(a: &str, b: &str) -> Ordering {
    match (leading_number(a), leading_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn leading_number(floor: &str) -> Option<u64> {
    let trimmed = floor.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emp(id: &str, first: &str, last: &str, department: &str, floor: &str) -> Employee {
        Employee {
            id: id.into(),
            first_name: first.into(),
            last_name: last.into(),
            email: format!("{}@corp.example", first.to_lowercase()),
            extension: "100".into(),
            department: department.into(),
            role: "Staff".into(),
            floor: floor.into(),
            avatar: None,
        }
    }

    fn sample() -> Vec<Employee> {
        vec![
            emp("1", "Ada", "Lovelace", "Engineering", "3"),
            emp("2", "Grace", "Hopper", "Operations", "12"),
            emp("3", "Alan", "Turing", "Research", "2"),
            emp("4", "Linus", "Ng", "Engineering", "Ground"),
            emp("5", "Barbara", "Liskov", "Sales", "3"),
        ]
    }

    fn ids(records: &[&Employee]) -> Vec<String> {
        records.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_default_query_returns_everything_in_order() {
        let records = sample();
        let out = filter(&records, &QueryState::directory());
        assert_eq!(ids(&out), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_term_matches_department_only() {
        let records = vec![
            emp("1", "Zed", "Quux", "Engineering", "1"),
            emp("2", "Yan", "Bo", "Sales", "1"),
        ];
        let mut q = QueryState::directory();
        q.set_search_term("eng");
        assert_eq!(ids(&filter(&records, &q)), vec!["1"]);
    }

    #[test]
    fn test_term_is_case_insensitive_substring() {
        let records = sample();
        let mut q = QueryState::directory();

        q.set_search_term("LOVE");
        assert_eq!(ids(&filter(&records, &q)), vec!["1"]);

        // full name spans both parts
        q.set_search_term("grace hop");
        assert_eq!(ids(&filter(&records, &q)), vec!["2"]);

        q.set_search_term("ada@corp");
        assert_eq!(ids(&filter(&records, &q)), vec!["1"]);

        // not tokenized
        q.set_search_term("ada turing");
        assert!(filter(&records, &q).is_empty());
    }

    #[test]
    fn test_term_matches_floor_and_role() {
        let records = sample();
        let mut q = QueryState::directory();
        q.set_search_term("grou");
        assert_eq!(ids(&filter(&records, &q)), vec!["4"]);

        q.set_search_term("staff");
        assert_eq!(filter(&records, &q).len(), 5);
    }

    #[test]
    fn test_department_and_floor_are_exact() {
        let records = sample();
        let mut q = QueryState::directory();
        q.set_department("Engineering");
        assert_eq!(ids(&filter(&records, &q)), vec!["1", "4"]);

        q.set_floor("3");
        assert_eq!(ids(&filter(&records, &q)), vec!["1"]);

        q.set_department("engineering");
        assert!(filter(&records, &q).is_empty());
    }

    #[test]
    fn test_vanished_selection_yields_nothing() {
        let records = sample();
        let mut q = QueryState::directory();
        q.set_department("Legal");
        assert!(filter(&records, &q).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent_subset() {
        let records = sample();
        let mut q = QueryState::directory();
        q.set_search_term("a");
        q.set_floor("3");

        let once: Vec<Employee> = filter(&records, &q).into_iter().cloned().collect();
        let twice = filter(&once, &q);
        assert_eq!(ids(&twice), once.iter().map(|e| e.id.clone()).collect::<Vec<_>>());

        // order preserved relative to input
        let positions: Vec<usize> = once
            .iter()
            .map(|e| records.iter().position(|r| r.id == e.id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(once.iter().all(|e| matches(e, &q)));
    }

    #[test]
    fn test_distinct_values_sorted_case_sensitive() {
        let mut records = sample();
        records.push(emp("6", "Kay", "Lo", "engineering", "3"));
        assert_eq!(
            distinct_departments(&records),
            vec!["Engineering", "Operations", "Research", "Sales", "engineering"]
        );
        assert_eq!(distinct_floors(&records), vec!["12", "2", "3", "Ground"]);
        assert!(distinct_floors(&[]).is_empty());
    }

    #[test]
    fn test_sort_by_floor() {
        let records = sample();
        let mut out = filter(&records, &QueryState::directory());

        sort_by_floor(&mut out, SortOrder::Default);
        assert_eq!(ids(&out), vec!["1", "2", "3", "4", "5"]);

        sort_by_floor(&mut out, SortOrder::FloorAsc);
        assert_eq!(ids(&out), vec!["3", "1", "5", "2", "4"]);

        let mut out = filter(&records, &QueryState::directory());
        sort_by_floor(&mut out, SortOrder::FloorDesc);
        assert_eq!(ids(&out), vec!["4", "2", "1", "5", "3"]);
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("12"), Some(12));
        assert_eq!(leading_number("2nd"), Some(2));
        assert_eq!(leading_number("B1"), None);
        assert_eq!(leading_number(""), None);
    }
}
