//! Shared error types for the services crate.

use thiserror::Error;

use pairs_core::repository::RepositoryError;

/// Errors emitted by dataset sources (the remote ingestion tier).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("dataset request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by session engines and the trainer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no word pairs loaded")]
    Empty,
    #[error("no word pair is being shown")]
    NotShowing,
    #[error("no game is in progress")]
    NoActiveGame,
    #[error("no question is awaiting an answer")]
    NoQuestion,
    #[error("unknown card {0}")]
    UnknownCard(usize),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
