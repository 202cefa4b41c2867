//! Persistence adapter projecting repository progress onto the key-value
//! store and restoring it defensively.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pairs_core::model::Section;
use pairs_core::repository::PairRepository;

use crate::store::KeyValueStore;

pub const KEY_LEARNED: &str = "learnedPairs";
pub const KEY_MISTAKES: &str = "wrongPairs";
pub const KEY_CURRENT_INDEX: &str = "currentPairIndex";
pub const KEY_SECTION: &str = "lastSection";
pub const KEY_SCORE: &str = "score";
pub const KEY_TOTAL_QUESTIONS: &str = "totalQuestions";

/// Cumulative challenge counters carried across sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionCounters {
    pub score: u32,
    pub questions_asked: u32,
}

/// Durable snapshot of one mistaken record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MistakeSnapshot {
    pub index: usize,
    pub mistakes: u32,
    pub last_mistake_at: Option<DateTime<Utc>>,
}

/// Session state recovered by [`load_progress`]; anything missing or invalid
/// in the store is left at its default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoredSession {
    pub active_index: Option<usize>,
    pub section: Option<Section>,
    pub counters: SessionCounters,
}

/// Write the durable projection of the repository plus session pointers.
///
/// Best-effort: a failed write is logged and swallowed. Losing progress is
/// acceptable; interrupting the session is not.
pub fn save_progress(
    store: &mut dyn KeyValueStore,
    repo: &PairRepository,
    counters: SessionCounters,
    section: Section,
    active_index: usize,
) {
    let learned = repo.learned_indices();
    let snapshots: Vec<MistakeSnapshot> = repo
        .all()
        .iter()
        .enumerate()
        .filter(|(_, r)| r.mistakes > 0)
        .map(|(index, r)| MistakeSnapshot {
            index,
            mistakes: r.mistakes,
            last_mistake_at: r.last_mistake_at,
        })
        .collect();

    put_json(store, KEY_LEARNED, &learned);
    put_json(store, KEY_MISTAKES, &snapshots);
    put(store, KEY_CURRENT_INDEX, &active_index.to_string());
    put(store, KEY_SECTION, section.as_str());
    put(store, KEY_SCORE, &counters.score.to_string());
    put(store, KEY_TOTAL_QUESTIONS, &counters.questions_asked.to_string());
}

/// Restore persisted progress onto the repository and return the recovered
/// session pointers.
///
/// Every key is read defensively: a missing, malformed, or out-of-range value
/// is treated as absent. Mistake snapshots overwrite a record only when the
/// referenced index exists in the current repository.
pub fn load_progress(store: &dyn KeyValueStore, repo: &mut PairRepository) -> RestoredSession {
    if let Some(learned) = get_json::<Vec<usize>>(store, KEY_LEARNED) {
        for index in learned {
            if index < repo.len() {
                let _ = repo.mark_learned(index);
            }
        }
    }

    if let Some(snapshots) = get_json::<Vec<MistakeSnapshot>>(store, KEY_MISTAKES) {
        for snapshot in snapshots {
            if snapshot.index < repo.len() && snapshot.mistakes > 0 {
                let _ = repo.restore_mistakes(
                    snapshot.index,
                    snapshot.mistakes,
                    snapshot.last_mistake_at,
                );
            }
        }
    }

    let active_index = store
        .get(KEY_CURRENT_INDEX)
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&i| i < repo.len());
    let section = store
        .get(KEY_SECTION)
        .and_then(|v| Section::from_str(&v));
    let counters = SessionCounters {
        score: get_u32(store, KEY_SCORE),
        questions_asked: get_u32(store, KEY_TOTAL_QUESTIONS),
    };

    RestoredSession {
        active_index,
        section,
        counters,
    }
}

fn put(store: &mut dyn KeyValueStore, key: &str, value: &str) {
    if let Err(err) = store.set(key, value) {
        tracing::warn!(key, %err, "progress write failed, continuing");
    }
}

fn put_json<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => put(store, key, &json),
        Err(err) => tracing::warn!(key, %err, "progress serialization failed, continuing"),
    }
}

fn get_json<T: for<'de> Deserialize<'de>>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, %err, "ignoring malformed progress value");
            None
        }
    }
}

fn get_u32(store: &dyn KeyValueStore, key: &str) -> u32 {
    store
        .get(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}
