//! Comparison browser: steps through the sequence one pair at a time.

use pairs_core::repository::PairRepository;

use crate::collab::CompareView;
use crate::error::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BrowserState {
    Idle,
    Showing(usize),
}

/// Cursor over the repository's ordered sequence. Wraps at both ends.
#[derive(Debug, Clone, Copy)]
pub struct CompareBrowser {
    state: BrowserState,
}

impl Default for CompareBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl CompareBrowser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: BrowserState::Idle,
        }
    }

    /// Start browsing. Resumes at `preferred` when it is in range, otherwise
    /// at the first unlearned pair, otherwise at the start.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when the repository has no records.
    pub fn open(
        &mut self,
        repo: &PairRepository,
        preferred: Option<usize>,
    ) -> Result<usize, SessionError> {
        if repo.is_empty() {
            return Err(SessionError::Empty);
        }
        let index = preferred
            .filter(|&i| i < repo.len())
            .or_else(|| repo.first_unlearned())
            .unwrap_or(0);
        self.state = BrowserState::Showing(index);
        Ok(index)
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotShowing` when the browser is idle.
    pub fn next(&mut self, repo: &PairRepository) -> Result<usize, SessionError> {
        self.step(repo, 1)
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotShowing` when the browser is idle.
    pub fn previous(&mut self, repo: &PairRepository) -> Result<usize, SessionError> {
        self.step(repo, repo.len().saturating_sub(1))
    }

    #[must_use]
    pub fn current(&self) -> Option<usize> {
        match self.state {
            BrowserState::Showing(index) => Some(index),
            BrowserState::Idle => None,
        }
    }

    pub fn close(&mut self) {
        self.state = BrowserState::Idle;
    }

    fn step(&mut self, repo: &PairRepository, offset: usize) -> Result<usize, SessionError> {
        let BrowserState::Showing(index) = self.state else {
            return Err(SessionError::NotShowing);
        };
        let next = (index + offset) % repo.len();
        self.state = BrowserState::Showing(next);
        Ok(next)
    }
}

/// Render the pair at `index` for presentation. `None` for an out-of-range
/// index.
#[must_use]
pub fn view(repo: &PairRepository, index: usize) -> Option<CompareView> {
    let record = repo.get(index)?;
    Some(CompareView {
        category: record.category.clone(),
        front_text: record.front.text.clone(),
        front_pinyin: record.front.pinyin.clone(),
        back_text: record.back.text.clone(),
        back_pinyin: record.back.pinyin.clone(),
        position: format!("{}/{}", index + 1, repo.len()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairs_core::model::{WordEntry, WordPairRecord};

    fn build_repo(n: usize) -> PairRepository {
        let records = (0..n)
            .map(|i| {
                WordPairRecord::new(
                    "cat",
                    WordEntry::new(format!("f{i}"), "p"),
                    WordEntry::new(format!("b{i}"), "p"),
                )
            })
            .collect();
        let mut repo = PairRepository::new();
        repo.load(records);
        repo
    }

    #[test]
    fn open_prefers_saved_index_then_first_unlearned() {
        let mut repo = build_repo(5);
        let mut browser = CompareBrowser::new();

        assert_eq!(browser.open(&repo, Some(3)).unwrap(), 3);
        assert_eq!(browser.open(&repo, Some(9)).unwrap(), 0);

        repo.mark_learned(0).unwrap();
        repo.mark_learned(1).unwrap();
        assert_eq!(browser.open(&repo, None).unwrap(), 2);
    }

    #[test]
    fn open_empty_repository_fails() {
        let repo = PairRepository::new();
        let mut browser = CompareBrowser::new();
        assert!(matches!(browser.open(&repo, None), Err(SessionError::Empty)));
    }

    #[test]
    fn navigation_wraps_both_directions() {
        let repo = build_repo(3);
        let mut browser = CompareBrowser::new();
        browser.open(&repo, Some(2)).unwrap();

        assert_eq!(browser.next(&repo).unwrap(), 0);
        assert_eq!(browser.previous(&repo).unwrap(), 2);
        assert_eq!(browser.previous(&repo).unwrap(), 1);
    }

    #[test]
    fn idle_browser_rejects_navigation() {
        let repo = build_repo(3);
        let mut browser = CompareBrowser::new();
        assert!(matches!(browser.next(&repo), Err(SessionError::NotShowing)));
        assert_eq!(browser.current(), None);
    }

    #[test]
    fn view_includes_one_based_position() {
        let repo = build_repo(4);
        let v = view(&repo, 2).unwrap();
        assert_eq!(v.position, "3/4");
        assert_eq!(v.front_text, "f2");
        assert_eq!(v.back_text, "b2");
        assert!(view(&repo, 4).is_none());
    }
}
