//! In-memory repository owning the canonical ordered record sequence.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::model::WordPairRecord;

/// Errors surfaced by repository mutations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RepositoryError {
    #[error("record index {0} out of range")]
    IndexOutOfRange(usize),
}

/// Ordering for the mistake-book view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MistakeOrder {
    /// Most recent mistake first; frequency breaks ties.
    Recency,
    /// Most mistakes first; recency breaks ties.
    Frequency,
}

/// The sole source of truth for word-pair records and their learning state.
///
/// Records are identified by position. The sequence is replaced only by
/// [`PairRepository::load`]; no record is reordered or removed afterwards, so
/// indices stay valid for the session lifetime.
#[derive(Debug, Clone, Default)]
pub struct PairRepository {
    pairs: Vec<WordPairRecord>,
}

impl PairRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the working sequence. Intended for startup only; any indices
    /// held by callers are invalidated.
    pub fn load(&mut self, records: Vec<WordPairRecord>) {
        self.pairs = records;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&WordPairRecord> {
        self.pairs.get(index)
    }

    #[must_use]
    pub fn all(&self) -> &[WordPairRecord] {
        &self.pairs
    }

    /// Position of a record equal to `record`, if any.
    #[must_use]
    pub fn index_of(&self, record: &WordPairRecord) -> Option<usize> {
        self.pairs.iter().position(|r| r == record)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::IndexOutOfRange` for an unknown index.
    pub fn mark_learned(&mut self, index: usize) -> Result<(), RepositoryError> {
        self.record_mut(index)?.learned = true;
        Ok(())
    }

    /// Increment the mistake counter and stamp the mistake time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::IndexOutOfRange` for an unknown index.
    pub fn record_mistake(
        &mut self,
        index: usize,
        at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let record = self.record_mut(index)?;
        record.mistakes += 1;
        record.last_mistake_at = Some(at);
        Ok(())
    }

    /// Reset a record's mistake history (mistake-book removal).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::IndexOutOfRange` for an unknown index.
    pub fn clear_mistakes(&mut self, index: usize) -> Result<(), RepositoryError> {
        let record = self.record_mut(index)?;
        record.mistakes = 0;
        record.last_mistake_at = None;
        Ok(())
    }

    /// Overwrite a record's mistake snapshot, used when restoring persisted
    /// progress. Keeps the `mistakes == 0 ⇔ last_mistake_at == None` invariant
    /// by rejecting inconsistent snapshots.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::IndexOutOfRange` for an unknown index.
    pub fn restore_mistakes(
        &mut self,
        index: usize,
        mistakes: u32,
        last_mistake_at: Option<DateTime<Utc>>,
    ) -> Result<(), RepositoryError> {
        if (mistakes == 0) != last_mistake_at.is_none() {
            return Ok(());
        }
        let record = self.record_mut(index)?;
        record.mistakes = mistakes;
        record.last_mistake_at = last_mistake_at;
        Ok(())
    }

    #[must_use]
    pub fn learned_indices(&self) -> Vec<usize> {
        self.indices_where(|r| r.learned)
    }

    #[must_use]
    pub fn mistaken_indices(&self) -> Vec<usize> {
        self.indices_where(|r| r.mistakes > 0)
    }

    /// First index with `learned == false`, or `None` when all are learned or
    /// the repository is empty.
    #[must_use]
    pub fn first_unlearned(&self) -> Option<usize> {
        self.pairs.iter().position(|r| !r.learned)
    }

    /// Draw up to `n` distinct record indices uniformly, without replacement,
    /// from the complement of `excluding`. Returns `min(n, population)`
    /// indices.
    #[must_use]
    pub fn random_sample(&self, rng: &mut impl Rng, n: usize, excluding: &[usize]) -> Vec<usize> {
        let mut available: Vec<usize> = (0..self.pairs.len())
            .filter(|i| !excluding.contains(i))
            .collect();
        available.shuffle(rng);
        available.truncate(n);
        available
    }

    /// Indices of all mistaken records, ordered for the mistake book.
    #[must_use]
    pub fn mistake_book(&self, order: MistakeOrder) -> Vec<usize> {
        let mut entries = self.mistaken_indices();
        entries.sort_by(|&a, &b| {
            let (ra, rb) = (&self.pairs[a], &self.pairs[b]);
            let by_time = rb.last_mistake_at.cmp(&ra.last_mistake_at);
            let by_count = rb.mistakes.cmp(&ra.mistakes);
            match order {
                MistakeOrder::Recency => by_time.then(by_count),
                MistakeOrder::Frequency => by_count.then(by_time),
            }
        });
        entries
    }

    fn record_mut(&mut self, index: usize) -> Result<&mut WordPairRecord, RepositoryError> {
        self.pairs
            .get_mut(index)
            .ok_or(RepositoryError::IndexOutOfRange(index))
    }

    fn indices_where(&self, pred: impl Fn(&WordPairRecord) -> bool) -> Vec<usize> {
        self.pairs
            .iter()
            .enumerate()
            .filter_map(|(i, r)| pred(r).then_some(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WordEntry;
    use chrono::Duration;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::time::fixed_now;

    fn build_repo(n: usize) -> PairRepository {
        let records = (0..n)
            .map(|i| {
                WordPairRecord::new(
                    "cat",
                    WordEntry::new(format!("f{i}"), ""),
                    WordEntry::new(format!("b{i}"), ""),
                )
            })
            .collect();
        let mut repo = PairRepository::new();
        repo.load(records);
        repo
    }

    #[test]
    fn record_mistake_counts_and_stamps() {
        let mut repo = build_repo(3);
        let t1 = fixed_now();
        let t2 = t1 + Duration::seconds(5);
        repo.record_mistake(1, t1).unwrap();
        repo.record_mistake(1, t2).unwrap();

        let record = repo.get(1).unwrap();
        assert_eq!(record.mistakes, 2);
        assert_eq!(record.last_mistake_at, Some(t2));
        assert_eq!(repo.mistaken_indices(), vec![1]);
    }

    #[test]
    fn clear_mistakes_restores_invariant() {
        let mut repo = build_repo(2);
        repo.record_mistake(0, fixed_now()).unwrap();
        repo.clear_mistakes(0).unwrap();

        let record = repo.get(0).unwrap();
        assert_eq!(record.mistakes, 0);
        assert!(record.last_mistake_at.is_none());
        assert!(repo.mistaken_indices().is_empty());
    }

    #[test]
    fn out_of_range_mutation_is_an_error() {
        let mut repo = build_repo(2);
        assert_eq!(
            repo.mark_learned(5),
            Err(RepositoryError::IndexOutOfRange(5))
        );
    }

    #[test]
    fn restore_rejects_inconsistent_snapshots() {
        let mut repo = build_repo(1);
        repo.restore_mistakes(0, 3, None).unwrap();
        assert_eq!(repo.get(0).unwrap().mistakes, 0);

        repo.restore_mistakes(0, 3, Some(fixed_now())).unwrap();
        assert_eq!(repo.get(0).unwrap().mistakes, 3);
    }

    #[test]
    fn index_of_finds_the_record_position() {
        let repo = build_repo(3);
        let record = repo.get(2).unwrap().clone();
        assert_eq!(repo.index_of(&record), Some(2));

        let other = WordPairRecord::new("x", WordEntry::new("a", ""), WordEntry::new("b", ""));
        assert_eq!(repo.index_of(&other), None);
    }

    #[test]
    fn first_unlearned_scans_in_order() {
        let mut repo = build_repo(3);
        assert_eq!(repo.first_unlearned(), Some(0));
        repo.mark_learned(0).unwrap();
        repo.mark_learned(1).unwrap();
        assert_eq!(repo.first_unlearned(), Some(2));
        repo.mark_learned(2).unwrap();
        assert_eq!(repo.first_unlearned(), None);
    }

    #[test]
    fn random_sample_respects_exclusions_and_population() {
        let repo = build_repo(6);
        let mut rng = StdRng::seed_from_u64(7);
        let excluding = vec![0, 2, 4];

        for _ in 0..20 {
            let sample = repo.random_sample(&mut rng, 2, &excluding);
            assert_eq!(sample.len(), 2);
            let mut seen = sample.clone();
            seen.dedup();
            assert_eq!(seen.len(), sample.len());
            assert!(sample.iter().all(|i| !excluding.contains(i)));
        }

        // population smaller than n: truncated, never padded
        let sample = repo.random_sample(&mut rng, 10, &excluding);
        assert_eq!(sample.len(), 3);
    }

    #[test]
    fn mistake_book_orders_by_recency_and_frequency() {
        let mut repo = build_repo(3);
        let base = fixed_now();
        repo.record_mistake(0, base).unwrap();
        repo.record_mistake(0, base + Duration::seconds(10)).unwrap();
        repo.record_mistake(2, base + Duration::seconds(20)).unwrap();

        assert_eq!(repo.mistake_book(MistakeOrder::Recency), vec![2, 0]);
        assert_eq!(repo.mistake_book(MistakeOrder::Frequency), vec![0, 2]);
    }
}
