use crate::engine::types::Row;

/// Separator between key parts; a control character so it cannot collide
/// with ordinary dimension text.
pub const KEY_SEPARATOR: char = '\u{1f}';

/// Grouping key: the string form of each key column, missing as empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn from_row(row: &Row, columns: &[&str]) -> Self {
        let mut key = String::new();
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                key.push(KEY_SEPARATOR);
            }
            key.push_str(&row.key_part(column));
        }
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
