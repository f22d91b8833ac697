//! Request extraction helpers

pub mod extract;

pub use extract::{ApiJson, ApiQuery};
