use super::group_key::{GroupKey, KEY_SEPARATOR};
use crate::engine::types::Row;

#[test]
fn builds_key_from_column_values_in_order() {
    let row = Row::new()
        .with("month", "Jan")
        .with("region", "EU")
        .with("sales", 10i64);

    let key = GroupKey::from_row(&row, &["month", "region"]);
    assert_eq!(key.as_str(), format!("Jan{KEY_SEPARATOR}EU"));
}

#[test]
fn missing_columns_contribute_empty_parts() {
    let row = Row::new().with("month", "Jan");

    let with_missing = GroupKey::from_row(&row, &["month", "region"]);
    let explicit_empty = GroupKey::from_row(&row.clone().with("region", ""), &["month", "region"]);
    assert_eq!(with_missing, explicit_empty);
}

#[test]
fn numbers_and_strings_with_same_text_share_a_key() {
    let numeric = Row::new().with("year", 2024i64);
    let text = Row::new().with("year", "2024");

    assert_eq!(
        GroupKey::from_row(&numeric, &["year"]),
        GroupKey::from_row(&text, &["year"])
    );
}
