mod json_store;
mod memory_store;
mod interface;

pub use interface::{Storage, Result, BackendError};
pub use json_store::JsonStore;
pub use memory_store::MemoryStore;
