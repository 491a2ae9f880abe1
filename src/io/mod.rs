pub mod csv;
pub mod json;
pub mod store;

pub use json::RunSummary;
pub use store::{DirectoryStore, MemoryStore, RunId, RunStore};
