mod section;
mod word_pair;

pub use section::Section;
pub use word_pair::{Side, WordEntry, WordPairRecord};
