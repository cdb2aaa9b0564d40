pub mod backend;
pub mod migrations;
pub mod store;

pub use backend::SqliteBackend;
#[cfg(test)]
pub use backend::MemoryBackend;
pub use store::{RecordStore, DEFAULT_STORAGE_KEY};
