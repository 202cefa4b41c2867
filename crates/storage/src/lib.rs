#![forbid(unsafe_code)]

pub mod progress;
pub mod store;

pub use progress::{MistakeSnapshot, RestoredSession, SessionCounters, load_progress, save_progress};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
