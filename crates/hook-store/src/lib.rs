//! Capture store implementations.

mod memory;

pub use hook_types::{CaptureStore, NewRecord, Record};
pub use memory::InMemoryCaptureStore;
