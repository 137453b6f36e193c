//! Reshaping of an already fetched todo list.

use std::cmp::Ordering;

use super::todo::Todo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Parses an `asc...`/`desc...` directive, ignoring case.
    pub fn from_directive(directive: &str) -> Option<Self> {
        let lower = directive.to_lowercase();
        if lower.starts_with("asc") {
            Some(Self::Ascending)
        } else if lower.starts_with("desc") {
            Some(Self::Descending)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SortOptions {
    pub descending: bool,
}

impl From<SortOrder> for SortOptions {
    fn from(order: SortOrder) -> Self {
        Self { descending: order == SortOrder::Descending }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FilterOptions {
    pub invert: bool,
}

/// Stable sort on `position`. Rows without a position go last in either direction
/// and keep their relative order.
pub fn sort_by_position(mut todos: Vec<Todo>, options: SortOptions) -> Vec<Todo> {
    todos.sort_by(|a, b| match (a.position, b.position) {
        (Some(x), Some(y)) if options.descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    todos
}

/// Keeps completed rows, or the open ones when `invert` is set.
pub fn filter_by_completed(todos: Vec<Todo>, options: FilterOptions) -> Vec<Todo> {
    todos.into_iter().filter(|t| t.completed != options.invert).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::todo::TodoId;
    use chrono::Utc;

    fn todo(id: i64, position: Option<i64>, completed: bool) -> Todo {
        Todo { id: TodoId(id), title: format!("t{id}"), due: None, position, completed, updated: Utc::now() }
    }

    fn ids(todos: &[Todo]) -> Vec<i64> {
        todos.iter().map(|t| t.id.0).collect()
    }

    #[test]
    fn sorts_ascending_and_descending() {
        let rows = vec![todo(1, Some(3), false), todo(2, Some(1), false)];
        let asc = sort_by_position(rows.clone(), SortOptions { descending: false });
        assert_eq!(asc.iter().map(|t| t.position).collect::<Vec<_>>(), vec![Some(1), Some(3)]);
        let desc = sort_by_position(rows, SortOptions { descending: true });
        assert_eq!(desc.iter().map(|t| t.position).collect::<Vec<_>>(), vec![Some(3), Some(1)]);
    }

    #[test]
    fn missing_positions_sort_last_and_stay_stable() {
        let rows = vec![todo(1, None, false), todo(2, Some(5), false), todo(3, None, false), todo(4, Some(5), false)];
        assert_eq!(ids(&sort_by_position(rows.clone(), SortOptions::default())), vec![2, 4, 1, 3]);
        assert_eq!(ids(&sort_by_position(rows, SortOptions { descending: true })), vec![2, 4, 1, 3]);
    }

    #[test]
    fn filters_on_completed() {
        let rows = vec![todo(1, None, true), todo(2, None, false)];
        assert_eq!(ids(&filter_by_completed(rows.clone(), FilterOptions::default())), vec![1]);
        assert_eq!(ids(&filter_by_completed(rows, FilterOptions { invert: true })), vec![2]);
    }

    #[test]
    fn directive_parsing() {
        assert_eq!(SortOrder::from_directive("ASCENDING"), Some(SortOrder::Ascending));
        assert_eq!(SortOrder::from_directive("desc"), Some(SortOrder::Descending));
        assert_eq!(SortOrder::from_directive("sideways"), None);
        assert!(SortOptions::from(SortOrder::Descending).descending);
    }
}
