use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//
// ─── SIDES ─────────────────────────────────────────────────────────────────────
//

/// The two contrasted nasal-sound categories of a word pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Front,
    Back,
}

impl Side {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
        }
    }

    /// Human-readable label for feedback messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Front => "front nasal",
            Self::Back => "back nasal",
        }
    }
}

//
// ─── WORD PAIRS ────────────────────────────────────────────────────────────────
//

/// One display form with its pronunciation. Pronunciation may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub text: String,
    pub pinyin: String,
}

impl WordEntry {
    #[must_use]
    pub fn new(text: impl Into<String>, pinyin: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pinyin: pinyin.into(),
        }
    }
}

/// One paired vocabulary entry with its learning metadata.
///
/// Identity is positional: a record is referred to by its index in the
/// repository's ordered sequence, which is stable for the session lifetime.
///
/// Invariant: `mistakes == 0` exactly when `last_mistake_at` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPairRecord {
    pub category: String,
    pub front: WordEntry,
    pub back: WordEntry,
    pub learned: bool,
    pub mistakes: u32,
    pub last_mistake_at: Option<DateTime<Utc>>,
}

impl WordPairRecord {
    /// Create a fresh record with no learning history.
    #[must_use]
    pub fn new(category: impl Into<String>, front: WordEntry, back: WordEntry) -> Self {
        Self {
            category: category.into(),
            front,
            back,
            learned: false,
            mistakes: 0,
            last_mistake_at: None,
        }
    }

    #[must_use]
    pub fn entry(&self, side: Side) -> &WordEntry {
        match side {
            Side::Front => &self.front,
            Side::Back => &self.back,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_record_has_no_history() {
        let record = WordPairRecord::new(
            "an vs ang",
            WordEntry::new("班", "bān"),
            WordEntry::new("帮", "bāng"),
        );
        assert!(!record.learned);
        assert_eq!(record.mistakes, 0);
        assert!(record.last_mistake_at.is_none());
    }

    #[test]
    fn entry_selects_by_side() {
        let record = WordPairRecord::new(
            "c",
            WordEntry::new("班", "bān"),
            WordEntry::new("帮", "bāng"),
        );
        assert_eq!(record.entry(Side::Front).text, "班");
        assert_eq!(record.entry(Side::Back).text, "帮");
        assert_eq!(Side::Front.opposite(), Side::Back);
    }
}
