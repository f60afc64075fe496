pub mod handlers;
pub mod resolve;
pub mod types;
