#![forbid(unsafe_code)]

pub mod model;
pub mod parse;
pub mod repository;
pub mod time;

pub use model::{Section, Side, WordEntry, WordPairRecord};
pub use repository::{MistakeOrder, PairRepository, RepositoryError};
pub use time::Clock;
