//! Collection pipeline for crisiswatch.
//!
//! Fans out over configured news sources (RSS feeds, NewsAPI, Hacker News,
//! Reddit), keyword-matches candidates against a business-distress
//! vocabulary, scores sentiment with a polarity lexicon, deduplicates by
//! URL, and persists survivors through the insert-or-ignore store.

pub mod classify;
pub mod dedupe;
pub mod error;
pub mod pipeline;
pub mod scorer;
pub mod text;
pub mod types;

mod sources;

pub use classify::classify;
pub use dedupe::dedupe_by_link;
pub use error::CollectorError;
pub use pipeline::{run_collection, CollectionOutcome, PipelineError};
pub use scorer::score;
pub use types::{CandidateArticle, CollectorOptions, ScoredCandidate};
