mod blender;
mod group_key;

#[cfg(test)]
mod group_key_test;

pub use blender::RowBlender;
pub use group_key::{GroupKey, KEY_SEPARATOR};
