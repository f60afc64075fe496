pub mod errors;
pub mod executor;
pub mod schema;
pub mod types;

pub use errors::*;
