//! Collection pipeline orchestration.

use sqlx::SqlitePool;
use thiserror::Error;

use crisiswatch_core::{FeedSource, SourceTier};
use crisiswatch_db::{insert_articles, DbError, NewArticle};

use crate::classify::classify;
use crate::dedupe::dedupe_by_link;
use crate::scorer::score;
use crate::sources::collect_candidates;
use crate::types::{CandidateArticle, CollectorOptions, ScoredCandidate};

/// Result of one collection cycle.
#[derive(Debug, Clone, Copy)]
pub struct CollectionOutcome {
    /// Unique candidates that survived scoring and dedup this cycle.
    pub collected: usize,
    /// Rows actually inserted — lower than `collected` when URLs were
    /// already stored by earlier cycles.
    pub saved: u64,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("store unavailable: {0}")]
    Db(#[from] DbError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Run one collection cycle and persist the survivors.
///
/// 1. FETCH: gather candidates from every priority-tier source.
/// 2. SCORE+FILTER: classify, score, and apply the inclusion policy.
/// 3. RETRY-FOR-VOLUME: while below `min_target_count`, pull in the
///    secondary tier and then re-poll, up to `max_extra_rounds` rounds.
///    Best-effort only — the cycle always terminates and returns whatever
///    it has once the round budget is spent.
/// 4. DEDUPE: one record per URL, first occurrence wins.
/// 5. PERSIST: insert-or-ignore; previously seen URLs count for nothing.
///
/// Individual source failures are logged inside the fetch layer and never
/// surface here.
///
/// # Errors
///
/// Returns [`PipelineError::Db`] if the store rejects the write — the only
/// fatal condition — or [`PipelineError::Client`] if the HTTP client itself
/// cannot be built.
pub async fn run_collection(
    pool: &SqlitePool,
    options: &CollectorOptions,
    sources: &[FeedSource],
    min_target_count: usize,
) -> Result<CollectionOutcome, PipelineError> {
    let client = build_client(options)?;

    let priority: Vec<FeedSource> = sources
        .iter()
        .filter(|s| s.tier == SourceTier::Priority)
        .cloned()
        .collect();
    let secondary: Vec<FeedSource> = sources
        .iter()
        .filter(|s| s.tier == SourceTier::Secondary)
        .cloned()
        .collect();

    let candidates = collect_candidates(&client, options, &priority).await;
    let mut kept = score_and_filter(candidates, options);

    let mut round: u32 = 0;
    while kept.len() < min_target_count && round < options.max_extra_rounds {
        round += 1;
        // The first extra round reaches for the secondary tier; any later
        // round re-polls everything, since feeds move between rounds.
        let wave: &[FeedSource] = if round == 1 && !secondary.is_empty() {
            &secondary
        } else {
            sources
        };
        tracing::info!(
            round,
            have = kept.len(),
            target = min_target_count,
            "below volume target — fetching additional sources"
        );
        let extra = collect_candidates(&client, options, wave).await;
        kept.extend(score_and_filter(extra, options));
    }

    let unique = dedupe_by_link(kept, |s| s.article.link.as_str());
    let collected = unique.len();

    let rows: Vec<NewArticle> = unique.into_iter().map(new_article).collect();
    let saved = insert_articles(pool, &rows).await?;

    tracing::info!(collected, saved, "collection cycle complete");
    Ok(CollectionOutcome { collected, saved })
}

/// Classify and score candidates, keeping only those that pass the
/// inclusion policy. Candidates with no matched keyword never survive.
fn score_and_filter(
    candidates: Vec<CandidateArticle>,
    options: &CollectorOptions,
) -> Vec<ScoredCandidate> {
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let text = format!("{} {}", candidate.title, candidate.description);
            let (matched, category) = classify(&text);
            if matched.is_empty() {
                return None;
            }
            let sentiment = score(&text);
            if !include_candidate(sentiment, matched.len(), options) {
                return None;
            }
            Some(ScoredCandidate {
                article: candidate,
                matched_keywords: matched,
                sentiment,
                category,
            })
        })
        .collect()
}

/// Inclusion policy: negative-enough sentiment admits a candidate, and
/// multiple independent crisis terms admit it even when the score reads
/// mildly positive.
fn include_candidate(sentiment: f32, matched_count: usize, options: &CollectorOptions) -> bool {
    sentiment <= options.sentiment_threshold
        || matched_count >= options.keyword_override_count
}

fn new_article(scored: ScoredCandidate) -> NewArticle {
    NewArticle {
        title: scored.article.title,
        link: scored.article.link,
        description: scored.article.description,
        published: scored.article.published,
        source: scored.article.source,
        sentiment: f64::from(scored.sentiment),
        keywords: scored.matched_keywords.join(","),
        category: scored.category,
    }
}

fn build_client(options: &CollectorOptions) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(options.per_source_timeout)
        .connect_timeout(std::time::Duration::from_secs(10))
        .user_agent(&options.user_agent)
        .build()
}
