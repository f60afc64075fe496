use std::cmp::Ordering;

use crate::command::resolve::SortBy;
use crate::command::types::SortDirection;
use crate::engine::types::Row;

/// Stable numeric ordering on one metric column.
pub struct Sorter<'a> {
    sort_by: Option<&'a SortBy>,
}

impl<'a> Sorter<'a> {
    pub fn new(sort_by: Option<&'a SortBy>) -> Self {
        Self { sort_by }
    }

    pub fn apply(&self, mut rows: Vec<Row>) -> Vec<Row> {
        if let Some(sort_by) = self.sort_by {
            rows.sort_by(|a, b| compare_rows(a, b, sort_by));
        }
        rows
    }
}

/// Compares two rows on the sort column; `Less` means `a` is listed first.
pub fn compare_rows(a: &Row, b: &Row, sort_by: &SortBy) -> Ordering {
    let (va, vb) = (a.number(&sort_by.column), b.number(&sort_by.column));
    let ordering = va.partial_cmp(&vb).unwrap_or(Ordering::Equal);
    match sort_by.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}
