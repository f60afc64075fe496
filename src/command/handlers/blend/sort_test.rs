use super::sort::Sorter;
use crate::command::resolve::SortBy;
use crate::command::types::SortDirection;
use crate::engine::types::Row;
use crate::test_helpers::factories::rows;
use serde_json::json;

fn months(rows: &[Row]) -> Vec<String> {
    rows.iter().map(|r| r.key_part("month")).collect()
}

fn sort_by(direction: SortDirection) -> SortBy {
    SortBy {
        column: "sales".to_string(),
        direction,
    }
}

fn input() -> Vec<Row> {
    rows(vec![
        json!({"month": "Jan", "sales": 5}),
        json!({"month": "Feb", "sales": 20}),
        json!({"month": "Mar", "sales": 5}),
        json!({"month": "Apr"}),
        json!({"month": "May", "sales": "12"}),
    ])
}

#[test]
fn sorts_descending_keeping_ties_stable() {
    let sort = sort_by(SortDirection::Desc);
    let output = Sorter::new(Some(&sort)).apply(input());

    assert_eq!(months(&output), vec!["Feb", "May", "Jan", "Mar", "Apr"]);
}

#[test]
fn sorts_ascending_treating_missing_as_zero() {
    let sort = sort_by(SortDirection::Asc);
    let output = Sorter::new(Some(&sort)).apply(input());

    assert_eq!(months(&output), vec!["Apr", "Jan", "Mar", "May", "Feb"]);
}

#[test]
fn no_sort_keeps_blended_order() {
    let output = Sorter::new(None).apply(input());

    assert_eq!(months(&output), vec!["Jan", "Feb", "Mar", "Apr", "May"]);
}
