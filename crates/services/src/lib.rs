//! Session services for the nasal-pair trainer: dataset ingestion, review
//! selection, the three session engines and the trainer that drives them.

#![forbid(unsafe_code)]

pub mod collab;
pub mod data;
pub mod error;
pub mod loader;
pub mod schedule;
pub mod sessions;
pub mod tracker;
pub mod trainer;

pub use collab::{AudioSink, CardView, CompareView, FeedbackKind, Presenter, ToneKind};
pub use error::{SessionError, SourceError};
pub use loader::{DatasetLoader, DatasetSource, HttpSource, RemoteConfig};
pub use schedule::{DelayedCommand, RoundId, ScheduledTask};
pub use trainer::Trainer;
